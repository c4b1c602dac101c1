pub mod classify;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod pipeline;
pub mod report;
pub mod settings;
pub mod sink;

pub use classify::{Classifier, Information, MatchDecision, RejectReason};
pub use error::ListError;
pub use fetch::{CEILING, CatalogSource, FIELDS, FetchOutcome, PAGE_SIZE, PaginatedFetcher};
pub use filter::{FilterBuilder, FilterSet};
pub use pipeline::{ListEvent, Listing, run_listing};
pub use report::{Cell, HEADER, Report, build_report};
pub use sink::{CsvSink, TabularSink, range_for};

// Re-export the core types so frontends only need this crate.
pub use gamelister_core::{
    CatalogRecord, Category, Domain, LookupTable, MatchMode, OptionsError, ReleaseStatus,
    SearchOptions, SortField, UNKNOWN_CODE, genres, platforms,
};
