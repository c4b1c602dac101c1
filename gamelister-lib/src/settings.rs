//! Shared file locations and options loading.
//!
//! Search options live in `~/.config/gamelister/search.toml` unless a path
//! is given explicitly. A missing default file just means "no options".

use std::path::{Path, PathBuf};

use gamelister_core::{OptionsError, SearchOptions};

/// `~/.config/gamelister` (or the platform equivalent).
pub fn config_dir() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("gamelister")
}

/// Canonical path to the default search options file.
pub fn options_path() -> PathBuf {
    config_dir().join("search.toml")
}

/// Load search options using a priority chain:
///
/// 1. Explicit path (must exist)
/// 2. The default options file, if present
/// 3. Empty options
pub fn load_options(explicit: Option<&Path>) -> Result<SearchOptions, OptionsError> {
    if let Some(path) = explicit {
        log::debug!("Loading search options from {}", path.display());
        return SearchOptions::load(path);
    }
    let default = options_path();
    if default.exists() {
        log::debug!("Loading search options from {}", default.display());
        return SearchOptions::load(&default);
    }
    Ok(SearchOptions::default())
}
