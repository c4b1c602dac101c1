pub mod client;
pub mod credentials;
pub mod error;

pub use client::IgdbClient;
pub use credentials::{
    CredentialSource, Credentials, DEFAULT_KEY_FILE, KEY_ENV_VAR, config_path, credential_source,
};
pub use error::IgdbError;
