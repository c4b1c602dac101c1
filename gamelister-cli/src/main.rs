//! gamelister CLI
//!
//! Command-line interface for building filtered game lists from IGDB.

mod cli_types;
mod commands;
mod error;

use std::io::Write;

use clap::Parser;
use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use cli_types::{Cli, Commands, ConfigAction};
use gamelister_lib::Domain;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let result = match cli.command {
        Commands::List {
            options,
            search,
            output,
            key_file,
            base_url,
            dry_run,
        } => commands::list::run_list(commands::list::ListArgs {
            options,
            search,
            output,
            key_file,
            base_url,
            dry_run,
            quiet: cli.quiet,
        }),
        Commands::Platforms => {
            commands::tables::run_table(Domain::Platform);
            Ok(())
        }
        Commands::Genres => {
            commands::tables::run_table(Domain::Genre);
            Ok(())
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Show { key_file } => commands::config::run_config_show(key_file),
                ConfigAction::Path => commands::config::run_config_path(),
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stderr, |t| t.red()),
            e
        );
        if e.is_credentials() {
            log::error!("");
            log::error!("Set the API key via {}", gamelister_igdb::KEY_ENV_VAR);
            log::error!(
                "  or put it on the first line of {}",
                gamelister_igdb::DEFAULT_KEY_FILE
            );
            log::error!("  or add [igdb] api_key to the credentials file ('gamelister config path')");
        }
        std::process::exit(1);
    }
}

/// Plain message output for normal runs; timestamps and levels with `--verbose`.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module("gamelister", level)
        .filter_module("gamelister_lib", level)
        .filter_module("gamelister_igdb", level)
        .parse_default_env()
        .target(env_logger::Target::Stdout);

    if !verbose {
        builder.format(|buf, record| match record.level() {
            log::Level::Error | log::Level::Warn => {
                writeln!(buf, "{}: {}", record.level(), record.args())
            }
            _ => writeln!(buf, "{}", record.args()),
        });
    }
    builder.init();
}
