use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamelister_lib::Domain;

/// Print every known name in a lookup table with its code.
pub(crate) fn run_table(domain: Domain) {
    let table = domain.table();
    log::info!(
        "{} ({} known):",
        format!("{}s", capitalize(domain.label())).if_supports_color(Stdout, |t| t.bold()),
        table.len()
    );
    log::info!("");

    let mut entries: Vec<(u32, &str)> = table.iter().collect();
    entries.sort_by_key(|(_, name)| name.to_ascii_lowercase());
    for (code, name) in entries {
        log::info!(
            "  {:>4}  {}",
            code.if_supports_color(Stdout, |t| t.cyan()),
            name
        );
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_domain_labels() {
        assert_eq!(capitalize("platform"), "Platform");
        assert_eq!(capitalize(""), "");
    }
}
