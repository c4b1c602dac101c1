use gamelister_core::OptionsError;

/// Errors that abort a listing run. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("Configuration error: {0}")]
    Config(#[from] OptionsError),

    #[error("Catalog request failed: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Catalog returned an empty page at offset {offset} (expected {total} results) for filters {filters}")]
    EmptyPage {
        offset: usize,
        total: usize,
        filters: String,
    },

    #[error("No games returned for filters {filters}")]
    NoRecords { filters: String },

    #[error("No games left after local filtering ({fetched} fetched) for filters {filters}")]
    NoMatches { fetched: usize, filters: String },

    #[error("Output error: {0}")]
    Sink(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ListError {
    pub fn catalog(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Source(Box::new(err))
    }

    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }
}
