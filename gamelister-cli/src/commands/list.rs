use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamelister_igdb::{Credentials, IgdbClient};
use gamelister_lib::{
    CsvSink, Domain, FilterBuilder, ListEvent, Listing, MatchMode, Report, SearchOptions,
    TabularSink, run_listing,
};

use crate::cli_types::SearchArgs;
use crate::error::CliError;

/// How many of the most common platforms/genres to show in the summary.
const TOP_COUNTS: usize = 5;

pub(crate) struct ListArgs {
    pub options: Option<PathBuf>,
    pub search: SearchArgs,
    pub output: Option<PathBuf>,
    pub key_file: Option<PathBuf>,
    pub base_url: Option<String>,
    pub dry_run: bool,
    pub quiet: bool,
}

pub(crate) fn run_list(args: ListArgs) -> Result<(), CliError> {
    let base = gamelister_lib::settings::load_options(args.options.as_deref())?;
    let options = apply_overrides(base, &args.search)?;

    if args.dry_run {
        let filters = FilterBuilder::build(&options)?;
        log::info!(
            "{} Catalog filters: {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            filters
        );
        return Ok(());
    }

    let creds = Credentials::load(args.key_file.as_deref())?;
    let mut client = IgdbClient::new(creds)?;
    if let Some(url) = args.base_url {
        client = client.with_base_url(url);
    }

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars("/-\\|"));
        }
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    };

    let result = run_listing(&client, &options, &mut |event| report_progress(&pb, &event));
    pb.finish_and_clear();
    let listing = result?;

    log::info!(
        "{} Fetched {} games in {} pages ({} matched the catalog query)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        listing.report.information.fetched,
        listing.pages,
        listing.total,
    );
    if listing.truncated {
        log::warn!(
            "Results were cut off at {} entries; narrow the search to see the rest",
            gamelister_lib::CEILING
        );
    }

    match &args.output {
        Some(path) => {
            let mut sink = CsvSink::create(path)?;
            sink.write_report(&listing.report)?;
            log::info!(
                "{} Wrote {} rows to {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                listing.report.rows.len(),
                path.display().if_supports_color(Stdout, |t| t.cyan()),
            );
        }
        None => print_table(&listing.report),
    }

    print_summary(&listing);
    Ok(())
}

fn report_progress(pb: &ProgressBar, event: &ListEvent) {
    match event {
        ListEvent::Counting => pb.set_message("Counting matching games..."),
        ListEvent::Counted { total } => pb.set_message(format!("{total} games match")),
        ListEvent::Truncated { total, ceiling } => {
            pb.set_message(format!("Fetching the first {ceiling} of {total} games"))
        }
        ListEvent::PageFetched {
            offset,
            returned,
            total,
        } => pb.set_message(format!(
            "Fetched {} of {} games",
            (offset + returned).min(*total),
            total
        )),
        ListEvent::Classified { accepted, rejected } => {
            pb.set_message(format!("{accepted} kept, {rejected} rejected"))
        }
    }
}

/// Command-line flags override whatever the options file set.
pub(crate) fn apply_overrides(
    mut options: SearchOptions,
    args: &SearchArgs,
) -> Result<SearchOptions, CliError> {
    if let Some(search) = &args.search {
        options.search = Some(search.clone());
    }
    if let Some(names) = &args.platforms {
        options.search_platforms = Some(names.clone());
    }
    if let Some(mode) = &args.platform_mode {
        options.search_platform_mode = Some(MatchMode::parse(mode, Domain::Platform)?);
    }
    if let Some(names) = &args.genres {
        options.search_genres = Some(names.clone());
    }
    if let Some(mode) = &args.genre_mode {
        options.search_genre_mode = Some(MatchMode::parse(mode, Domain::Genre)?);
    }
    if let Some(names) = &args.allow_platforms {
        options.allowed_platforms = Some(names.clone());
    }
    if let Some(names) = &args.deny_platforms {
        options.disallowed_platforms = Some(names.clone());
    }
    if let Some(names) = &args.allow_genres {
        options.allowed_genres = Some(names.clone());
    }
    if let Some(names) = &args.deny_genres {
        options.disallowed_genres = Some(names.clone());
    }
    if let Some(status) = &args.release_status {
        options.release_status = Some(status.parse()?);
    }
    if let Some(sort) = &args.sort {
        options.sort = Some(sort.parse()?);
    }
    Ok(options)
}

fn print_table(report: &Report) {
    log::info!("");
    for row in report.with_header() {
        let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        log::info!("{}", cells.join(" | "));
    }
    log::info!("");
}

fn print_summary(listing: &Listing) {
    let report = &listing.report;
    log::info!("{}", "Summary".if_supports_color(Stdout, |t| t.bold()));
    for (label, count) in report.information.rows() {
        if count > 0 {
            log::info!("  {:<22} {}", label, count);
        }
    }

    for (title, counts) in [
        ("Platforms", &report.platform_counts),
        ("Genres", &report.genre_counts),
    ] {
        let top = top_counts(counts.iter().map(|(k, v)| (k.as_str(), *v)), TOP_COUNTS);
        if top.is_empty() {
            continue;
        }
        log::info!("{}", title.if_supports_color(Stdout, |t| t.bold()));
        for (name, count) in top {
            log::info!("  {:<40} {}", name, count);
        }
    }
}

/// Highest counts first; ties keep name order.
fn top_counts<'a>(counts: impl Iterator<Item = (&'a str, usize)>, n: usize) -> Vec<(&'a str, usize)> {
    let mut sorted: Vec<(&str, usize)> = counts.collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted.truncate(n);
    sorted
}
