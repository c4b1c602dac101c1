use std::path::{Path, PathBuf};

use crate::error::IgdbError;

/// Environment variable holding the API key.
pub const KEY_ENV_VAR: &str = "IGDB_API_KEY";

/// Key file looked for in the working directory when none is given.
pub const DEFAULT_KEY_FILE: &str = ".igdb_api_key";

/// Credentials for authenticating with the IGDB API.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
}

/// Where the API key came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// First line of a key file.
    KeyFile(PathBuf),
    /// An explicitly named key file that does not exist; loading fails.
    MissingKeyFile(PathBuf),
    /// Loaded from the config file.
    ConfigFile,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::KeyFile(path) => write!(f, "key file {}", path.display()),
            Self::MissingKeyFile(path) => write!(f, "key file {} (not found)", path.display()),
            Self::ConfigFile => write!(f, "config file"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize)]
struct ConfigFile {
    igdb: Option<IgdbConfig>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct IgdbConfig {
    api_key: Option<String>,
}

impl Credentials {
    /// Load the API key.
    ///
    /// Priority: env var > key file > config file. An explicit `key_file`
    /// must exist; the default `.igdb_api_key` is only used if present.
    pub fn load(key_file: Option<&Path>) -> Result<Self, IgdbError> {
        if let Some(key) = env_key() {
            return Ok(Self { api_key: key });
        }

        match key_file {
            Some(path) => {
                if !path.exists() {
                    return Err(IgdbError::Config(format!(
                        "API key file '{}' not found",
                        path.display()
                    )));
                }
                return Self::from_key_file(path);
            }
            None => {
                let default = Path::new(DEFAULT_KEY_FILE);
                if default.exists() {
                    return Self::from_key_file(default);
                }
            }
        }

        if let Some(key) = config_key() {
            return Ok(Self { api_key: key });
        }

        Err(IgdbError::Config(format!(
            "Missing API key. Set {KEY_ENV_VAR}, create {DEFAULT_KEY_FILE}, or add [igdb] api_key to the config file"
        )))
    }

    /// Read the key from the first line of a file.
    pub fn from_key_file(path: &Path) -> Result<Self, IgdbError> {
        let contents = std::fs::read_to_string(path)?;
        let api_key = contents.lines().next().unwrap_or("").trim().to_string();
        if api_key.is_empty() {
            return Err(IgdbError::Config(format!(
                "API key file '{}' is empty",
                path.display()
            )));
        }
        Ok(Self { api_key })
    }
}

/// Path to the credentials config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gamelister").join("credentials.toml"))
}

/// Report where [`Credentials::load`] would take the key from.
pub fn credential_source(key_file: Option<&Path>) -> CredentialSource {
    if env_key().is_some() {
        return CredentialSource::EnvVar(KEY_ENV_VAR);
    }
    if let Some(source) = key_file_source(key_file) {
        return source;
    }
    if config_key().is_some() {
        return CredentialSource::ConfigFile;
    }
    CredentialSource::Missing
}

/// The key-file step of the priority chain. An explicit file short-circuits
/// the chain whether or not it exists; the default file only when present.
fn key_file_source(key_file: Option<&Path>) -> Option<CredentialSource> {
    match key_file {
        Some(path) if path.exists() => Some(CredentialSource::KeyFile(path.to_path_buf())),
        Some(path) => Some(CredentialSource::MissingKeyFile(path.to_path_buf())),
        None => {
            let default = Path::new(DEFAULT_KEY_FILE);
            default
                .exists()
                .then(|| CredentialSource::KeyFile(default.to_path_buf()))
        }
    }
}

fn env_key() -> Option<String> {
    std::env::var(KEY_ENV_VAR)
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

fn config_key() -> Option<String> {
    let contents = std::fs::read_to_string(config_path()?).ok()?;
    parse_config_key(&contents)
}

fn parse_config_key(contents: &str) -> Option<String> {
    let config: ConfigFile = toml::from_str(contents).ok()?;
    config
        .igdb?
        .api_key
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_file_uses_first_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key");
        std::fs::write(&path, "  abc123  \nsecond line\n").unwrap();
        let creds = Credentials::from_key_file(&path).unwrap();
        assert_eq!(creds.api_key, "abc123");
    }

    #[test]
    fn empty_key_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key");
        std::fs::write(&path, "\n").unwrap();
        assert!(matches!(
            Credentials::from_key_file(&path),
            Err(IgdbError::Config(_))
        ));
    }

    #[test]
    fn config_file_key_is_parsed() {
        assert_eq!(
            parse_config_key("[igdb]\napi_key = \"xyz\"\n").as_deref(),
            Some("xyz")
        );
        assert_eq!(parse_config_key("[igdb]\n"), None);
        assert_eq!(parse_config_key("not toml ["), None);
    }

    #[test]
    fn explicit_key_file_decides_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        assert_eq!(
            key_file_source(Some(&missing)),
            Some(CredentialSource::MissingKeyFile(missing.clone()))
        );

        let present = dir.path().join("key");
        std::fs::write(&present, "abc\n").unwrap();
        assert_eq!(
            key_file_source(Some(&present)),
            Some(CredentialSource::KeyFile(present.clone()))
        );
    }

    #[test]
    fn source_display() {
        assert_eq!(
            CredentialSource::EnvVar(KEY_ENV_VAR).to_string(),
            "env $IGDB_API_KEY"
        );
        assert_eq!(CredentialSource::Missing.to_string(), "not set");
        assert_eq!(
            CredentialSource::MissingKeyFile(PathBuf::from("k.txt")).to_string(),
            "key file k.txt (not found)"
        );
    }
}
