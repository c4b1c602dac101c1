//! Local accept/reject decisions for fetched catalog entries.
//!
//! The catalog only applies the coarse server-side filters. Everything else
//! (add-on and duplicate removal, allow/deny lists, the release-date check)
//! happens here, one record at a time. Classification also moves the
//! searched-for platforms and genres to the front of each record's lists so
//! the report shows them first.

use std::collections::HashSet;

use gamelister_core::{CatalogRecord, Domain, ReleaseStatus, SearchOptions, UNKNOWN_CODE};

/// Name prefix the catalog uses for entries merged into another entry.
const DUPLICATE_PREFIX: &str = "duplicate";

/// Why a record was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// API error object instead of a game.
    Malformed,
    /// No name to list it under.
    Unnamed,
    /// Name does not contain the free-text search.
    SearchMiss,
    /// DLC or bundle.
    AddOn,
    /// Name marks it as a duplicate entry.
    Duplicate,
    /// An allow list is set but the record has no list for that domain.
    MissingField(Domain),
    /// Carries a platform/genre outside the allow list.
    NotAllowed(Domain),
    /// Carries a platform/genre from the deny list.
    Disallowed(Domain),
    /// Only released games were asked for and it has no release date.
    NoReleaseDate,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed"),
            Self::Unnamed => write!(f, "no name"),
            Self::SearchMiss => write!(f, "name does not match search"),
            Self::AddOn => write!(f, "DLC or bundle"),
            Self::Duplicate => write!(f, "duplicate entry"),
            Self::MissingField(d) => write!(f, "no {d}s listed"),
            Self::NotAllowed(d) => write!(f, "{d} not in allowed list"),
            Self::Disallowed(d) => write!(f, "disallowed {d}"),
            Self::NoReleaseDate => write!(f, "no release date"),
        }
    }
}

/// Outcome of classifying one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchDecision {
    /// Every reason the record was rejected, in check order. Empty means
    /// the record is kept.
    pub reasons: Vec<RejectReason>,
}

impl MatchDecision {
    pub fn is_accepted(&self) -> bool {
        self.reasons.is_empty()
    }

    fn reject(&mut self, reason: RejectReason) {
        self.reasons.push(reason);
    }
}

/// Running counters for one listing run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Information {
    pub fetched: usize,
    pub accepted: usize,
    pub rejected: usize,

    pub malformed: usize,
    pub unnamed: usize,
    pub search_miss: usize,
    pub add_on: usize,
    pub duplicate: usize,
    pub no_release_date: usize,
    pub missing_platforms: usize,
    pub missing_genres: usize,

    /// Records whose platforms all passed the allow list.
    pub allowed_platforms: usize,
    /// Records hit by the platform deny list.
    pub disallowed_platforms: usize,
    pub allowed_genres: usize,
    pub disallowed_genres: usize,
    /// Searched-for platform codes moved to the front of a record.
    pub search_platforms: usize,
    pub search_genres: usize,
}

impl Information {
    fn allowed_mut(&mut self, domain: Domain) -> &mut usize {
        match domain {
            Domain::Platform => &mut self.allowed_platforms,
            Domain::Genre => &mut self.allowed_genres,
        }
    }

    fn disallowed_mut(&mut self, domain: Domain) -> &mut usize {
        match domain {
            Domain::Platform => &mut self.disallowed_platforms,
            Domain::Genre => &mut self.disallowed_genres,
        }
    }

    fn search_mut(&mut self, domain: Domain) -> &mut usize {
        match domain {
            Domain::Platform => &mut self.search_platforms,
            Domain::Genre => &mut self.search_genres,
        }
    }

    fn count_rejection(&mut self, reason: RejectReason) {
        let counter = match reason {
            RejectReason::Malformed => &mut self.malformed,
            RejectReason::Unnamed => &mut self.unnamed,
            RejectReason::SearchMiss => &mut self.search_miss,
            RejectReason::AddOn => &mut self.add_on,
            RejectReason::Duplicate => &mut self.duplicate,
            RejectReason::NoReleaseDate => &mut self.no_release_date,
            RejectReason::MissingField(Domain::Platform) => &mut self.missing_platforms,
            RejectReason::MissingField(Domain::Genre) => &mut self.missing_genres,
            // Counted when the list is checked.
            RejectReason::NotAllowed(_) | RejectReason::Disallowed(_) => return,
        };
        *counter += 1;
    }

    /// Counter rows for reporting, in a fixed order.
    pub fn rows(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("fetched", self.fetched),
            ("accepted", self.accepted),
            ("rejected", self.rejected),
            ("malformed", self.malformed),
            ("unnamed", self.unnamed),
            ("search_miss", self.search_miss),
            ("dlc_or_bundle", self.add_on),
            ("duplicate", self.duplicate),
            ("no_release_date", self.no_release_date),
            ("missing_platforms", self.missing_platforms),
            ("missing_genres", self.missing_genres),
            ("allowed_platforms", self.allowed_platforms),
            ("disallowed_platforms", self.disallowed_platforms),
            ("allowed_genres", self.allowed_genres),
            ("disallowed_genres", self.disallowed_genres),
            ("search_platforms", self.search_platforms),
            ("search_genres", self.search_genres),
        ]
    }
}

/// Per-domain code sets resolved once from the options.
#[derive(Debug, Clone)]
struct DomainPolicy {
    domain: Domain,
    /// Search codes in the lookup table's natural (ascending) order.
    search: Vec<u32>,
    /// Allow list joined with the search codes, if an allow list is set.
    allowed: Option<HashSet<u32>>,
    disallowed: Option<HashSet<u32>>,
}

impl DomainPolicy {
    fn new(options: &SearchOptions, domain: Domain) -> Self {
        let table = domain.table();
        let search_names = options.search_names(domain).unwrap_or(&[]);
        let search: Vec<u32> = table
            .iter()
            .filter(|(_, name)| search_names.iter().any(|s| s.trim().eq_ignore_ascii_case(name)))
            .map(|(code, _)| code)
            .collect();

        let allowed = options.allowed(domain).map(|names| {
            let mut codes = resolve_set(domain, names);
            codes.extend(search.iter().copied());
            codes
        });
        let disallowed = options.disallowed(domain).map(|names| resolve_set(domain, names));

        Self {
            domain,
            search,
            allowed,
            disallowed,
        }
    }

    fn codes<'r>(&self, record: &'r CatalogRecord) -> Option<&'r Vec<u32>> {
        match self.domain {
            Domain::Platform => record.platforms.as_ref(),
            Domain::Genre => record.genres.as_ref(),
        }
    }

    fn codes_mut<'r>(&self, record: &'r mut CatalogRecord) -> Option<&'r mut Vec<u32>> {
        match self.domain {
            Domain::Platform => record.platforms.as_mut(),
            Domain::Genre => record.genres.as_mut(),
        }
    }

    /// Allow/deny checks for this domain.
    fn check(&self, record: &CatalogRecord, decision: &mut MatchDecision, info: &mut Information) {
        let codes = self.codes(record);

        if let Some(ref allowed) = self.allowed {
            match codes {
                None => decision.reject(RejectReason::MissingField(self.domain)),
                Some(codes) if codes.iter().all(|c| allowed.contains(c)) => {
                    *info.allowed_mut(self.domain) += 1;
                }
                Some(_) => decision.reject(RejectReason::NotAllowed(self.domain)),
            }
        }

        if let (Some(disallowed), Some(codes)) = (&self.disallowed, codes) {
            if codes.iter().any(|c| disallowed.contains(c)) {
                *info.disallowed_mut(self.domain) += 1;
                decision.reject(RejectReason::Disallowed(self.domain));
            }
        }
    }

    /// Move searched-for codes to the front: matched codes in ascending code
    /// order, then the rest in their original order. Only the first
    /// occurrence of a matched code moves; repeats stay where they were.
    fn reorder(&self, record: &mut CatalogRecord, info: &mut Information) {
        if self.search.is_empty() {
            return;
        }
        let Some(codes) = self.codes_mut(record) else {
            return;
        };

        let front: Vec<u32> = self
            .search
            .iter()
            .copied()
            .filter(|c| codes.contains(c))
            .collect();
        if front.is_empty() {
            return;
        }
        *info.search_mut(self.domain) += front.len();

        let mut rest = codes.clone();
        for code in &front {
            if let Some(pos) = rest.iter().position(|c| c == code) {
                rest.remove(pos);
            }
        }
        let mut reordered = front;
        reordered.extend(rest);
        *codes = reordered;
    }
}

fn resolve_set(domain: Domain, names: &[String]) -> HashSet<u32> {
    let table = domain.table();
    names
        .iter()
        .filter_map(|name| {
            let code = table.code(name);
            if code == UNKNOWN_CODE {
                log::warn!("Unknown {domain} '{name}' in allow/deny list, ignoring it");
                None
            } else {
                Some(code)
            }
        })
        .collect()
}

/// Applies the local filter policy derived from a set of search options.
#[derive(Debug, Clone)]
pub struct Classifier {
    search: Option<String>,
    platforms: DomainPolicy,
    genres: DomainPolicy,
    require_release_date: bool,
}

impl Classifier {
    pub fn new(options: &SearchOptions) -> Self {
        Self {
            search: options
                .search
                .as_ref()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty()),
            platforms: DomainPolicy::new(options, Domain::Platform),
            genres: DomainPolicy::new(options, Domain::Genre),
            require_release_date: options.effective_release_status() == ReleaseStatus::Released,
        }
    }

    /// Classify one record, reordering its platform and genre lists in place.
    ///
    /// Malformed, unnamed and search-miss records are rejected without
    /// further checks. Past that point every check runs, and the counter
    /// updates and reordering happen even when an earlier check already
    /// rejected the record.
    pub fn classify(&self, record: &mut CatalogRecord, info: &mut Information) -> MatchDecision {
        let mut decision = MatchDecision::default();

        if record.is_malformed() {
            decision.reject(RejectReason::Malformed);
            return decision;
        }
        let Some(name) = record.name().map(str::to_lowercase) else {
            decision.reject(RejectReason::Unnamed);
            return decision;
        };

        if let Some(ref search) = self.search {
            if !name.contains(search.as_str()) {
                decision.reject(RejectReason::SearchMiss);
                return decision;
            }
        }

        if record.kind().is_some_and(|c| c.is_add_on()) {
            decision.reject(RejectReason::AddOn);
        }

        if name.starts_with(DUPLICATE_PREFIX) {
            decision.reject(RejectReason::Duplicate);
        }

        self.platforms.check(record, &mut decision, info);
        self.genres.check(record, &mut decision, info);

        self.platforms.reorder(record, info);
        self.genres.reorder(record, info);

        if self.require_release_date && record.release_date.is_none() {
            decision.reject(RejectReason::NoReleaseDate);
        }

        decision
    }

    /// Classify a batch, returning the kept records in their original order.
    pub fn retain(&self, records: Vec<CatalogRecord>, info: &mut Information) -> Vec<CatalogRecord> {
        info.fetched += records.len();
        let mut kept = Vec::with_capacity(records.len());

        for mut record in records {
            let decision = self.classify(&mut record, info);
            if decision.is_accepted() {
                info.accepted += 1;
                kept.push(record);
            } else {
                info.rejected += 1;
                for &reason in &decision.reasons {
                    info.count_rejection(reason);
                }
                log::debug!(
                    "Dropping {} ({}): {}",
                    record.name().unwrap_or("<unnamed>"),
                    record.id,
                    decision
                        .reasons
                        .iter()
                        .map(|r| r.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
        }

        kept
    }
}

#[cfg(test)]
#[path = "tests/classify_tests.rs"]
mod tests;
