//! Offset-based retrieval of every catalog entry matching a [`FilterSet`].

use std::collections::HashSet;

use gamelister_core::CatalogRecord;

use crate::error::ListError;
use crate::filter::FilterSet;
use crate::pipeline::ListEvent;

/// Entries requested per page.
pub const PAGE_SIZE: usize = 50;

/// Absolute cap on the number of entries one run can pull. The catalog
/// refuses offsets past this window.
pub const CEILING: usize = 9_999;

/// Fixed field projection requested for every page.
pub const FIELDS: &[&str] = &[
    "id",
    "name",
    "rating",
    "rating_count",
    "category",
    "genres",
    "platforms",
    "first_release_date",
];

/// The catalog query service the fetcher drives.
///
/// Implementations own transport and authentication. Both calls block
/// until the response is in.
pub trait CatalogSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Number of entries matching `filters`, or `None` when the service did
    /// not report one.
    fn count(&self, filters: &FilterSet) -> Result<Option<usize>, Self::Error>;

    /// One page of entries, projected to `fields`.
    fn query(
        &self,
        filters: &FilterSet,
        fields: &[&str],
        limit: usize,
        offset: usize,
    ) -> Result<Vec<CatalogRecord>, Self::Error>;
}

/// Everything one fetch produced.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    pub records: Vec<CatalogRecord>,
    /// Total reported by the count query (0 if none was reported).
    pub total: usize,
    /// Number of page requests issued.
    pub pages: usize,
    /// True when `total` exceeded the ceiling and the tail was not fetched.
    pub truncated: bool,
    /// Entries dropped because an earlier page already returned their id.
    pub duplicates: usize,
}

/// Drives [`CatalogSource::query`] page by page.
#[derive(Debug, Clone)]
pub struct PaginatedFetcher {
    page_size: usize,
    ceiling: usize,
}

impl Default for PaginatedFetcher {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            ceiling: CEILING,
        }
    }
}

impl PaginatedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch every entry matching `filters`.
    ///
    /// Pages are requested from offset 0 until the offset passes the
    /// reported total or reaches the ceiling. The page that would cross the
    /// ceiling is shrunk so the run stops exactly on it. An empty page is
    /// fatal when it is the first page or lands inside the reported total;
    /// an empty page at or past the total just ends the run.
    pub fn fetch<S: CatalogSource>(
        &self,
        source: &S,
        filters: &FilterSet,
        progress: &mut dyn FnMut(ListEvent),
    ) -> Result<FetchOutcome, ListError> {
        progress(ListEvent::Counting);
        let total = match source.count(filters).map_err(ListError::catalog)? {
            Some(total) => total,
            None => {
                log::warn!("Catalog did not report a result count for {filters}; assuming 0");
                0
            }
        };
        progress(ListEvent::Counted { total });

        let mut outcome = FetchOutcome {
            total,
            truncated: total > self.ceiling,
            ..Default::default()
        };
        let mut seen = HashSet::new();
        let mut offset = 0;

        while offset <= total && offset < self.ceiling {
            let mut limit = self.page_size;
            if offset + limit > self.ceiling {
                limit = self.ceiling - offset;
                if outcome.truncated {
                    log::warn!(
                        "{total} games match but only the first {} can be fetched; truncating",
                        self.ceiling
                    );
                    progress(ListEvent::Truncated {
                        total,
                        ceiling: self.ceiling,
                    });
                }
            }

            log::info!(
                "Pulling results {} to {} (of {total})...",
                offset,
                offset + limit - 1
            );
            let page = source
                .query(filters, FIELDS, limit, offset)
                .map_err(ListError::catalog)?;
            outcome.pages += 1;

            if page.is_empty() {
                if offset == 0 {
                    return Err(ListError::NoRecords {
                        filters: filters.to_string(),
                    });
                }
                if offset < total {
                    return Err(ListError::EmptyPage {
                        offset,
                        total,
                        filters: filters.to_string(),
                    });
                }
                break;
            }

            let returned = page.len();
            for record in page {
                if record.id != 0 && !seen.insert(record.id) {
                    outcome.duplicates += 1;
                    continue;
                }
                outcome.records.push(record);
            }
            progress(ListEvent::PageFetched {
                offset,
                returned,
                total,
            });

            offset += self.page_size;
        }

        if outcome.duplicates > 0 {
            log::debug!("Dropped {} duplicate entries across pages", outcome.duplicates);
        }
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "tests/fetch_tests.rs"]
mod tests;
