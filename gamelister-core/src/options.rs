//! Search options: what to ask the catalog for and what to keep locally.
//!
//! Options come either from code (the `with_*` builders) or from a TOML
//! file. File values are parsed as plain strings first and converted here,
//! so a bad mode or release status is reported as an [`OptionsError`]
//! naming the offending value.

use std::path::Path;

use serde::Deserialize;

use crate::error::OptionsError;
use crate::lookup::Domain;

/// How a list of search names is combined into one server-side predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// The entry matches at least one of the names.
    #[default]
    Any,
    /// The entry matches every one of the names.
    All,
}

impl MatchMode {
    /// Parse a mode for the given domain (case-insensitive).
    pub fn parse(value: &str, domain: Domain) -> Result<Self, OptionsError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "all" => Ok(Self::All),
            _ => Err(OptionsError::InvalidMode {
                domain,
                value: value.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::All => "all",
        }
    }
}

/// Which entries to keep with respect to their release date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseStatus {
    Released,
    Unreleased,
    #[default]
    All,
}

impl ReleaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Released => "RELEASED",
            Self::Unreleased => "UNRELEASED",
            Self::All => "ALL",
        }
    }
}

impl std::str::FromStr for ReleaseStatus {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RELEASED" => Ok(Self::Released),
            "UNRELEASED" => Ok(Self::Unreleased),
            "ALL" => Ok(Self::All),
            _ => Err(OptionsError::InvalidReleaseStatus(s.to_string())),
        }
    }
}

/// Record field the final report is ordered by (ascending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Name,
    Rating,
    RatingCount,
    ReleaseDate,
    Id,
}

impl std::str::FromStr for SortField {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "rating" => Ok(Self::Rating),
            "rating_count" => Ok(Self::RatingCount),
            "release_date" | "first_release_date" => Ok(Self::ReleaseDate),
            "id" => Ok(Self::Id),
            _ => Err(OptionsError::InvalidSortField(s.to_string())),
        }
    }
}

/// Caller-supplied search configuration. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    /// Free-text search, sent to the catalog and re-checked against names.
    pub search: Option<String>,
    /// Platform names to search for, in caller order.
    pub search_platforms: Option<Vec<String>>,
    pub search_platform_mode: Option<MatchMode>,
    /// Genre names to search for, in caller order.
    pub search_genres: Option<Vec<String>>,
    pub search_genre_mode: Option<MatchMode>,
    /// When set, every platform of a kept entry must be in this set or in
    /// `search_platforms`.
    pub allowed_platforms: Option<Vec<String>>,
    /// Entries on any of these platforms are dropped.
    pub disallowed_platforms: Option<Vec<String>>,
    pub allowed_genres: Option<Vec<String>>,
    pub disallowed_genres: Option<Vec<String>>,
    pub release_status: Option<ReleaseStatus>,
    pub sort: Option<SortField>,
}

/// On-disk shape of an options file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OptionsFile {
    search: Option<String>,
    search_platforms: Option<Vec<String>>,
    search_platform_mode: Option<String>,
    search_genres: Option<Vec<String>>,
    search_genre_mode: Option<String>,
    allowed_platforms: Option<Vec<String>>,
    disallowed_platforms: Option<Vec<String>>,
    allowed_genres: Option<Vec<String>>,
    disallowed_genres: Option<Vec<String>>,
    release_status: Option<String>,
    sort: Option<String>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, OptionsError> {
        let file: OptionsFile = toml::from_str(text)?;
        let options = Self {
            search: file.search,
            search_platforms: file.search_platforms,
            search_platform_mode: file
                .search_platform_mode
                .map(|m| MatchMode::parse(&m, Domain::Platform))
                .transpose()?,
            search_genres: file.search_genres,
            search_genre_mode: file
                .search_genre_mode
                .map(|m| MatchMode::parse(&m, Domain::Genre))
                .transpose()?,
            allowed_platforms: file.allowed_platforms,
            disallowed_platforms: file.disallowed_platforms,
            allowed_genres: file.allowed_genres,
            disallowed_genres: file.disallowed_genres,
            release_status: file.release_status.map(|s| s.parse()).transpose()?,
            sort: file.sort.map(|s| s.parse()).transpose()?,
        };
        options.validate()?;
        Ok(options)
    }

    /// Load and validate options from a TOML file.
    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn search_platforms(mut self, names: &[&str], mode: MatchMode) -> Self {
        self.search_platforms = Some(to_owned(names));
        self.search_platform_mode = Some(mode);
        self
    }

    pub fn search_genres(mut self, names: &[&str], mode: MatchMode) -> Self {
        self.search_genres = Some(to_owned(names));
        self.search_genre_mode = Some(mode);
        self
    }

    pub fn allowed_platforms(mut self, names: &[&str]) -> Self {
        self.allowed_platforms = Some(to_owned(names));
        self
    }

    pub fn disallowed_platforms(mut self, names: &[&str]) -> Self {
        self.disallowed_platforms = Some(to_owned(names));
        self
    }

    pub fn allowed_genres(mut self, names: &[&str]) -> Self {
        self.allowed_genres = Some(to_owned(names));
        self
    }

    pub fn disallowed_genres(mut self, names: &[&str]) -> Self {
        self.disallowed_genres = Some(to_owned(names));
        self
    }

    pub fn release_status(mut self, status: ReleaseStatus) -> Self {
        self.release_status = Some(status);
        self
    }

    pub fn sort_by(mut self, field: SortField) -> Self {
        self.sort = Some(field);
        self
    }

    /// Release status with the `ALL` default applied.
    pub fn effective_release_status(&self) -> ReleaseStatus {
        self.release_status.unwrap_or_default()
    }

    pub fn effective_sort(&self) -> SortField {
        self.sort.unwrap_or_default()
    }

    /// Search names for a domain.
    pub fn search_names(&self, domain: Domain) -> Option<&[String]> {
        match domain {
            Domain::Platform => self.search_platforms.as_deref(),
            Domain::Genre => self.search_genres.as_deref(),
        }
    }

    /// Search mode for a domain, defaulting to `any`.
    pub fn search_mode(&self, domain: Domain) -> MatchMode {
        let mode = match domain {
            Domain::Platform => self.search_platform_mode,
            Domain::Genre => self.search_genre_mode,
        };
        mode.unwrap_or_default()
    }

    pub fn allowed(&self, domain: Domain) -> Option<&[String]> {
        match domain {
            Domain::Platform => self.allowed_platforms.as_deref(),
            Domain::Genre => self.allowed_genres.as_deref(),
        }
    }

    pub fn disallowed(&self, domain: Domain) -> Option<&[String]> {
        match domain {
            Domain::Platform => self.disallowed_platforms.as_deref(),
            Domain::Genre => self.disallowed_genres.as_deref(),
        }
    }

    /// Reject combinations that cannot mean anything useful.
    ///
    /// - a search mode without the search list it applies to
    /// - a name that is both allowed and disallowed in the same domain
    pub fn validate(&self) -> Result<(), OptionsError> {
        for domain in [Domain::Platform, Domain::Genre] {
            let mode_set = match domain {
                Domain::Platform => self.search_platform_mode.is_some(),
                Domain::Genre => self.search_genre_mode.is_some(),
            };
            if mode_set && self.search_names(domain).is_none() {
                return Err(OptionsError::unrecognized(format!(
                    "search_{domain}_mode is set but search_{domain}s is not"
                )));
            }

            if let (Some(allowed), Some(disallowed)) =
                (self.allowed(domain), self.disallowed(domain))
            {
                if let Some(name) = allowed
                    .iter()
                    .find(|a| disallowed.iter().any(|d| d.eq_ignore_ascii_case(a)))
                {
                    return Err(OptionsError::unrecognized(format!(
                        "{domain} '{name}' is both allowed and disallowed"
                    )));
                }
            }
        }
        Ok(())
    }
}

fn to_owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
