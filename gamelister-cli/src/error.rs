use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Bad search options, from the file or the command line
    #[error("{0}")]
    Options(#[from] gamelister_lib::OptionsError),

    /// The listing run aborted
    #[error("{0}")]
    Listing(#[from] gamelister_lib::ListError),

    /// Catalog client setup or API failure
    #[error("{0}")]
    Igdb(#[from] gamelister_igdb::IgdbError),
}

impl CliError {
    /// Whether the failure is about the API key, so the caller can print setup hints.
    pub(crate) fn is_credentials(&self) -> bool {
        use gamelister_igdb::IgdbError;
        match self {
            Self::Igdb(IgdbError::Config(_) | IgdbError::InvalidCredentials(_)) => true,
            Self::Listing(gamelister_lib::ListError::Source(e)) => matches!(
                e.downcast_ref::<IgdbError>(),
                Some(IgdbError::InvalidCredentials(_))
            ),
            _ => false,
        }
    }
}
