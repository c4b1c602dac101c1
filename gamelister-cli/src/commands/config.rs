use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamelister_igdb::CredentialSource;

fn mask_value(s: &str) -> String {
    let prefix: String = s.chars().take(2).collect();
    if s.chars().count() <= 2 {
        "****".to_string()
    } else {
        format!("{prefix}****")
    }
}

fn file_status(label: &str, path: Option<PathBuf>) {
    match path {
        Some(p) if p.exists() => log::info!(
            "  {label}: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        ),
        Some(p) => log::info!(
            "  {label}: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => log::info!(
            "  {label}: {}",
            "could not determine path".if_supports_color(Stdout, |t| t.red()),
        ),
    }
}

/// Show where the API key and default search options come from.
pub(crate) fn run_config_show(key_file: Option<PathBuf>) {
    log::info!(
        "{}",
        "gamelister Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    file_status("Credentials file", gamelister_igdb::config_path());
    file_status("Search options", Some(gamelister_lib::settings::options_path()));
    log::info!("");

    let source = gamelister_igdb::credential_source(key_file.as_deref());
    match source {
        CredentialSource::Missing | CredentialSource::MissingKeyFile(_) => log::info!(
            "  api_key: {}",
            source.to_string().if_supports_color(Stdout, |t| t.red()),
        ),
        _ => {
            let masked = gamelister_igdb::Credentials::load(key_file.as_deref())
                .map(|c| mask_value(&c.api_key))
                .unwrap_or_else(|e| format!("unreadable ({e})"));
            log::info!(
                "  api_key: {} {}",
                masked,
                format!("({source})").if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }
}

/// Print the config file paths.
pub(crate) fn run_config_path() {
    match gamelister_igdb::config_path() {
        Some(p) => log::info!("{}", p.display()),
        None => log::warn!("Could not determine the credentials file path"),
    }
    log::info!("{}", gamelister_lib::settings::options_path().display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_all_but_prefix() {
        assert_eq!(mask_value("abcdef"), "ab****");
        assert_eq!(mask_value("ab"), "****");
        assert_eq!(mask_value("éèêë"), "éè****");
    }
}
