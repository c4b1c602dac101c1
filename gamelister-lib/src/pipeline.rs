//! The batch driver: options in, report out.

use gamelister_core::SearchOptions;

use crate::classify::{Classifier, Information};
use crate::error::ListError;
use crate::fetch::{CatalogSource, PaginatedFetcher};
use crate::filter::{FilterBuilder, FilterSet};
use crate::report::{Report, build_report};

/// Progress events emitted during a run, consumed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    /// Asking the catalog how many entries match.
    Counting,
    /// Count query answered (0 if the catalog gave no count).
    Counted { total: usize },
    /// The run will stop at the ceiling.
    Truncated { total: usize, ceiling: usize },
    /// A page came back.
    PageFetched {
        offset: usize,
        returned: usize,
        total: usize,
    },
    /// Local filtering finished.
    Classified { accepted: usize, rejected: usize },
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct Listing {
    pub filters: FilterSet,
    /// Total the catalog reported for the filters.
    pub total: usize,
    pub pages: usize,
    pub truncated: bool,
    pub report: Report,
}

/// Run the whole listing: build filters, fetch every page, classify, and
/// build the report. Any anomaly aborts the run; nothing partial is
/// returned.
pub fn run_listing<S: CatalogSource>(
    source: &S,
    options: &SearchOptions,
    progress: &mut dyn FnMut(ListEvent),
) -> Result<Listing, ListError> {
    let filters = FilterBuilder::build(options)?;
    log::debug!("Catalog filters: {filters}");

    let fetched = PaginatedFetcher::new().fetch(source, &filters, progress)?;
    if fetched.records.is_empty() {
        return Err(ListError::NoRecords {
            filters: filters.to_string(),
        });
    }

    let mut information = Information::default();
    let kept = Classifier::new(options).retain(fetched.records, &mut information);
    progress(ListEvent::Classified {
        accepted: information.accepted,
        rejected: information.rejected,
    });
    log::info!(
        "Kept {} of {} games ({} rejected)",
        information.accepted,
        information.fetched,
        information.rejected
    );

    let report = build_report(kept, options, information, &filters)?;

    Ok(Listing {
        filters,
        total: fetched.total,
        pages: fetched.pages,
        truncated: fetched.truncated,
        report,
    })
}
