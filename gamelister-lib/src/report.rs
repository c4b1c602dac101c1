//! Conversion of the kept records into a rectangular table for a sink.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::DateTime;
use gamelister_core::{CatalogRecord, Domain, SearchOptions, SortField};

use crate::classify::Information;
use crate::error::ListError;
use crate::filter::FilterSet;

/// Column headings, in row order.
pub const HEADER: [&str; 5] = ["Rating", "Name", "Genres", "Platforms", "Release Date"];

/// Fixed offset added to stored release timestamps before formatting.
/// This is a plain shift, not a timezone conversion.
const DISPLAY_OFFSET_MILLIS: i64 = 6 * 60 * 60 * 1000;

/// Release date display format, e.g. `March 03, 2017`.
const DATE_FORMAT: &str = "%B %d, %Y";

/// Ratings from this many votes or fewer are left blank.
const MIN_RATING_COUNT: u64 = 1;

/// A single output value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Blank,
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn is_blank(&self) -> bool {
        matches!(self, Cell::Blank)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Blank => Ok(()),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Text(s) => write!(f, "{s}"),
        }
    }
}

/// The finished table plus the counters gathered on the way.
#[derive(Debug, Clone)]
pub struct Report {
    /// One row per kept record, columns as in [`HEADER`].
    pub rows: Vec<Vec<Cell>>,
    pub information: Information,
    /// How many kept records list each platform, by display name.
    pub platform_counts: BTreeMap<String, usize>,
    /// How many kept records list each genre, by display name.
    pub genre_counts: BTreeMap<String, usize>,
}

impl Report {
    pub fn width(&self) -> usize {
        HEADER.len()
    }

    /// Header row followed by the data rows.
    pub fn with_header(&self) -> Vec<Vec<Cell>> {
        let mut out = Vec::with_capacity(self.rows.len() + 1);
        out.push(HEADER.iter().map(|h| Cell::Text(h.to_string())).collect());
        out.extend(self.rows.iter().cloned());
        out
    }
}

/// Sort the kept records and render them into rows.
///
/// An empty record list is fatal: there is nothing worth reporting.
pub fn build_report(
    mut records: Vec<CatalogRecord>,
    options: &SearchOptions,
    information: Information,
    filters: &FilterSet,
) -> Result<Report, ListError> {
    if records.is_empty() {
        return Err(ListError::NoMatches {
            fetched: information.fetched,
            filters: filters.to_string(),
        });
    }

    let sort = options.effective_sort();
    records.sort_by(|a, b| compare(a, b, sort));

    let mut platform_counts = BTreeMap::new();
    let mut genre_counts = BTreeMap::new();
    let mut rows = Vec::with_capacity(records.len());

    for record in &records {
        tally(record.platforms.as_deref(), Domain::Platform, &mut platform_counts);
        tally(record.genres.as_deref(), Domain::Genre, &mut genre_counts);
        rows.push(render_row(record));
    }

    Ok(Report {
        rows,
        information,
        platform_counts,
        genre_counts,
    })
}

/// One output row: rating, name, genres, platforms, release date.
pub fn render_row(record: &CatalogRecord) -> Vec<Cell> {
    vec![
        rating_cell(record),
        record
            .name()
            .map(|n| Cell::Text(n.to_string()))
            .unwrap_or(Cell::Blank),
        names_cell(record.genres.as_deref(), Domain::Genre),
        names_cell(record.platforms.as_deref(), Domain::Platform),
        record
            .release_date
            .and_then(format_release_date)
            .map(Cell::Text)
            .unwrap_or(Cell::Blank),
    ]
}

fn rating_cell(record: &CatalogRecord) -> Cell {
    if record.rating_count.unwrap_or(0) <= MIN_RATING_COUNT {
        return Cell::Blank;
    }
    record.rating.map(Cell::Number).unwrap_or(Cell::Blank)
}

fn names_cell(codes: Option<&[u32]>, domain: Domain) -> Cell {
    match codes {
        Some(codes) if !codes.is_empty() => {
            let table = domain.table();
            let names: Vec<String> = codes.iter().map(|&c| table.display(c)).collect();
            Cell::Text(names.join(", "))
        }
        _ => Cell::Blank,
    }
}

/// Render an epoch-millisecond timestamp as `Month DD, YYYY`, shifted by
/// the fixed display offset.
pub fn format_release_date(millis: i64) -> Option<String> {
    let shifted = millis.checked_add(DISPLAY_OFFSET_MILLIS)?;
    DateTime::from_timestamp_millis(shifted).map(|dt| dt.format(DATE_FORMAT).to_string())
}

fn tally(codes: Option<&[u32]>, domain: Domain, counts: &mut BTreeMap<String, usize>) {
    let table = domain.table();
    for &code in codes.unwrap_or(&[]) {
        *counts.entry(table.display(code)).or_insert(0) += 1;
    }
}

fn compare(a: &CatalogRecord, b: &CatalogRecord, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name().cmp(&b.name()),
        SortField::Rating => match (a.rating, b.rating) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (x, y) => x.is_some().cmp(&y.is_some()),
        },
        SortField::RatingCount => a.rating_count.cmp(&b.rating_count),
        SortField::ReleaseDate => a.release_date.cmp(&b.release_date),
        SortField::Id => a.id.cmp(&b.id),
    }
}
