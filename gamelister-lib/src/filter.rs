//! Translation of [`SearchOptions`] into server-side catalog predicates.

use std::collections::BTreeMap;

use gamelister_core::{Domain, MatchMode, OptionsError, ReleaseStatus, SearchOptions, UNKNOWN_CODE};

/// Catalog field holding the first release date.
const RELEASE_DATE_FIELD: &str = "first_release_date";

/// Server-side predicate payload passed through to the catalog service.
///
/// Keys are catalog filter paths such as `[platforms][any]`; values are the
/// already-encoded operand. The map is ordered so the set renders the same
/// way every time it shows up in a diagnostic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    predicates: BTreeMap<String, String>,
    search: Option<String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.predicates.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.predicates.get(key).map(String::as_str)
    }

    /// Predicates in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.predicates.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty() && self.search.is_none()
    }

    /// Free-text search term sent alongside the predicates.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }
}

impl std::fmt::Display for FilterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        if let Some(ref search) = self.search {
            write!(f, "search: {search:?}")?;
            first = false;
        }
        for (key, value) in &self.predicates {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
            first = false;
        }
        write!(f, "}}")
    }
}

/// Builds a [`FilterSet`] from search options. Performs no I/O.
pub struct FilterBuilder;

impl FilterBuilder {
    /// Build filters using the current wall-clock time for release predicates.
    pub fn build(options: &SearchOptions) -> Result<FilterSet, OptionsError> {
        Self::build_at(options, chrono::Utc::now().timestamp_millis())
    }

    /// Build filters against a fixed `now` (epoch milliseconds).
    ///
    /// `now` is used as-is, with no timezone adjustment.
    pub fn build_at(options: &SearchOptions, now_millis: i64) -> Result<FilterSet, OptionsError> {
        options.validate()?;

        let mut filters = FilterSet::new();
        filters.search = options
            .search
            .as_ref()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        for domain in [Domain::Platform, Domain::Genre] {
            if let Some(names) = options.search_names(domain) {
                let codes = resolve_search_codes(domain, names)?;
                let key = predicate_key(domain, options.search_mode(domain));
                filters.insert(key, join_codes(&codes));
            }
        }

        match options.effective_release_status() {
            ReleaseStatus::Released => {
                filters.insert(format!("[{RELEASE_DATE_FIELD}][lte]"), now_millis.to_string());
            }
            ReleaseStatus::Unreleased => {
                filters.insert(format!("[{RELEASE_DATE_FIELD}][gt]"), now_millis.to_string());
            }
            ReleaseStatus::All => {}
        }

        Ok(filters)
    }
}

/// Filter key for a domain's search list, e.g. `[platforms][all]`.
fn predicate_key(domain: Domain, mode: MatchMode) -> String {
    format!("[{}s][{}]", domain.label(), mode.as_str())
}

/// Resolve search names to codes, dropping (and warning about) names the
/// lookup table does not know. An entirely unresolvable list is an error:
/// sending it would silently widen the search.
fn resolve_search_codes(domain: Domain, names: &[String]) -> Result<Vec<u32>, OptionsError> {
    let table = domain.table();
    let mut codes = Vec::with_capacity(names.len());
    for name in names {
        let code = table.code(name);
        if code == UNKNOWN_CODE {
            log::warn!("Unknown search {domain} '{name}', ignoring it");
        } else if !codes.contains(&code) {
            codes.push(code);
        }
    }
    if codes.is_empty() {
        return Err(OptionsError::unrecognized(format!(
            "none of the search {domain}s [{}] are known",
            names.join(", ")
        )));
    }
    Ok(codes)
}

fn join_codes(codes: &[u32]) -> String {
    codes
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
