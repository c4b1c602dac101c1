use std::cell::Cell as Counter;
use std::convert::Infallible;

use gamelister_lib::*;

/// Serves a fixed record list as if it were the whole catalog.
struct FixedCatalog {
    records: Vec<CatalogRecord>,
    calls: Counter<usize>,
    seen_filters: std::cell::RefCell<Option<FilterSet>>,
}

impl FixedCatalog {
    fn new(records: Vec<CatalogRecord>) -> Self {
        Self {
            records,
            calls: Counter::new(0),
            seen_filters: std::cell::RefCell::new(None),
        }
    }
}

impl CatalogSource for FixedCatalog {
    type Error = Infallible;

    fn count(&self, filters: &FilterSet) -> Result<Option<usize>, Infallible> {
        self.calls.set(self.calls.get() + 1);
        *self.seen_filters.borrow_mut() = Some(filters.clone());
        Ok(Some(self.records.len()))
    }

    fn query(
        &self,
        _filters: &FilterSet,
        _fields: &[&str],
        limit: usize,
        offset: usize,
    ) -> Result<Vec<CatalogRecord>, Infallible> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.records.iter().skip(offset).take(limit).cloned().collect())
    }
}

const SWITCH: u32 = 130;

fn switch_scenario() -> Vec<CatalogRecord> {
    vec![
        CatalogRecord::new(1, "Bonus Costume Pack")
            .with_category(Category::Dlc)
            .with_platforms(&[SWITCH])
            .with_release_date(1_600_000_000_000),
        CatalogRecord::new(2, "Someday Quest").with_platforms(&[SWITCH]),
        CatalogRecord::new(3, "Tiny Adventure")
            .with_rating(81.0, 1)
            .with_genres(&[31])
            .with_platforms(&[6, SWITCH])
            .with_release_date(1_600_000_000_000),
    ]
}

fn switch_options() -> SearchOptions {
    SearchOptions::new()
        .search_platforms(&["Nintendo Switch"], MatchMode::All)
        .release_status(ReleaseStatus::Released)
}

#[test]
fn released_switch_games_end_to_end() {
    let catalog = FixedCatalog::new(switch_scenario());
    let mut events = Vec::new();
    let listing = run_listing(&catalog, &switch_options(), &mut |e| events.push(e)).unwrap();

    let filters = catalog.seen_filters.borrow().clone().unwrap();
    assert_eq!(filters.get("[platforms][all]"), Some("130"));
    assert!(filters.get("[first_release_date][lte]").is_some());

    let report = &listing.report;
    assert_eq!(report.rows.len(), 1);
    let row = &report.rows[0];
    assert!(row[0].is_blank(), "single-vote rating should be blank");
    assert_eq!(row[1].as_text(), Some("Tiny Adventure"));
    assert_eq!(row[3].as_text(), Some("Nintendo Switch, PC (Microsoft Windows)"));
    assert!(row[4].as_text().is_some());

    assert_eq!(report.information.fetched, 3);
    assert_eq!(report.information.accepted, 1);
    assert_eq!(report.information.add_on, 1);
    assert_eq!(report.information.no_release_date, 1);
    assert_eq!(listing.pages, 1);
    assert!(!listing.truncated);

    assert_eq!(events.first(), Some(&ListEvent::Counting));
    assert_eq!(
        events.last(),
        Some(&ListEvent::Classified {
            accepted: 1,
            rejected: 2
        })
    );
}

#[test]
fn everything_rejected_is_fatal() {
    let records = vec![
        CatalogRecord::new(1, "duplicate Tiny Adventure").with_platforms(&[SWITCH]),
        CatalogRecord::new(2, "Pack").with_category(Category::Bundle),
    ];
    let catalog = FixedCatalog::new(records);
    let err = run_listing(&catalog, &SearchOptions::new(), &mut |_| {}).unwrap_err();
    match err {
        ListError::NoMatches { fetched, .. } => assert_eq!(fetched, 2),
        other => panic!("expected NoMatches, got {other}"),
    }
}

#[test]
fn empty_catalog_is_fatal() {
    let catalog = FixedCatalog::new(Vec::new());
    let err = run_listing(&catalog, &switch_options(), &mut |_| {}).unwrap_err();
    assert!(matches!(err, ListError::NoRecords { ref filters } if filters.contains("[platforms][all]: 130")));
}

#[test]
fn bad_options_fail_before_any_request() {
    let catalog = FixedCatalog::new(switch_scenario());
    let options = SearchOptions {
        search_genre_mode: Some(MatchMode::All),
        ..Default::default()
    };
    let err = run_listing(&catalog, &options, &mut |_| {}).unwrap_err();
    assert!(matches!(err, ListError::Config(_)));
    assert_eq!(catalog.calls.get(), 0);
}

#[test]
fn report_writes_to_csv() {
    let catalog = FixedCatalog::new(switch_scenario());
    let listing = run_listing(&catalog, &switch_options(), &mut |_| {}).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("switch.csv");
    let mut sink = CsvSink::create(&path).unwrap();
    sink.write_report(&listing.report).unwrap();
    drop(sink);

    let written = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "Rating,Name,Genres,Platforms,Release Date");
    assert!(lines[1].starts_with(",Tiny Adventure,Adventure,"));
}
