use crate::lookup::Domain;

/// Problems with a set of search options, raised before any network call.
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("Invalid {domain} search mode '{value}' (expected 'any' or 'all')")]
    InvalidMode { domain: Domain, value: String },

    #[error("Invalid release status '{0}' (expected RELEASED, UNRELEASED or ALL)")]
    InvalidReleaseStatus(String),

    #[error("Invalid sort field '{0}' (expected name, rating, rating_count, release_date or id)")]
    InvalidSortField(String),

    #[error("Unsupported option combination: {0}")]
    Unrecognized(String),

    #[error("Options file error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OptionsError {
    pub fn unrecognized(msg: impl Into<String>) -> Self {
        Self::Unrecognized(msg.into())
    }
}
