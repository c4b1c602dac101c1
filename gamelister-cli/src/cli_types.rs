//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gamelister")]
#[command(about = "Build filtered game lists from the IGDB catalog", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Search and filter flags; each one overrides the options file.
#[derive(Args, Clone, Default)]
pub(crate) struct SearchArgs {
    /// Free-text search against game names
    #[arg(short, long)]
    pub search: Option<String>,

    /// Platforms to search for (e.g., "Nintendo Switch,Wii U")
    #[arg(long, value_delimiter = ',')]
    pub platforms: Option<Vec<String>>,

    /// How platform search names combine: any or all
    #[arg(long)]
    pub platform_mode: Option<String>,

    /// Genres to search for (e.g., "Puzzle,Adventure")
    #[arg(long, value_delimiter = ',')]
    pub genres: Option<Vec<String>>,

    /// How genre search names combine: any or all
    #[arg(long)]
    pub genre_mode: Option<String>,

    /// Platforms a game may carry besides the searched ones
    #[arg(long, value_delimiter = ',')]
    pub allow_platforms: Option<Vec<String>>,

    /// Platforms that exclude a game
    #[arg(long, value_delimiter = ',')]
    pub deny_platforms: Option<Vec<String>>,

    /// Genres a game may carry besides the searched ones
    #[arg(long, value_delimiter = ',')]
    pub allow_genres: Option<Vec<String>>,

    /// Genres that exclude a game
    #[arg(long, value_delimiter = ',')]
    pub deny_genres: Option<Vec<String>>,

    /// released, unreleased or all
    #[arg(long)]
    pub release_status: Option<String>,

    /// Sort column: name, rating, rating_count, release_date or id
    #[arg(long)]
    pub sort: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Fetch, filter and tabulate games matching the search options
    List {
        /// Search options file (default: ~/.config/gamelister/search.toml)
        #[arg(long)]
        options: Option<PathBuf>,

        #[command(flatten)]
        search: SearchArgs,

        /// Write the table to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File holding the API key on its first line (default: ./.igdb_api_key)
        #[arg(long)]
        key_file: Option<PathBuf>,

        /// Override the IGDB API host
        #[arg(long)]
        base_url: Option<String>,

        /// Only show the computed filters, don't contact the catalog
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// List known platform names and codes
    Platforms,

    /// List known genre names and codes
    Genres,

    /// Manage API key and options configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show where the API key and search options come from
    Show {
        /// Key file to check instead of ./.igdb_api_key
        #[arg(long)]
        key_file: Option<PathBuf>,
    },

    /// Print the config file paths
    Path,
}
