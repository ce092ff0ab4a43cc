//! Subcommand implementations
//!
//! Each command takes its input as text and returns what should be printed,
//! so `main` only deals with files and exit codes.

use anyhow::Context as _;
use attendee_model::{render_attendee_list, Context, Membership};
use attendee_plugin::card::views::sort_by_firstname;
use attendee_plugin::{scanner, PluginConfig};
use std::path::Path;

/// Hints for the relevant contexts of a JSON context array, as pretty JSON
pub(crate) fn scan(raw_contexts: &str, config: &PluginConfig) -> anyhow::Result<String> {
    let contexts: Vec<Context> =
        serde_json::from_str(raw_contexts).context("contexts must be a JSON array")?;
    let hints = scanner::generate_hints(&contexts, &config.attendee_list_type);
    tracing::info!(
        contexts = contexts.len(),
        hints = hints.len(),
        "scanned contexts"
    );
    Ok(serde_json::to_string_pretty(&hints)?)
}

/// Committed markup for a JSON membership array, ordered by first name
pub(crate) fn render(raw_memberships: &str) -> anyhow::Result<String> {
    let mut memberships: Vec<Membership> =
        serde_json::from_str(raw_memberships).context("memberships must be a JSON array")?;
    sort_by_firstname(&mut memberships);
    tracing::info!(attendees = memberships.len(), "rendered attendee list");
    Ok(render_attendee_list(&memberships))
}

/// Effective configuration as TOML
pub(crate) fn config(file: Option<&Path>) -> anyhow::Result<PluginConfig> {
    let config = match file {
        Some(path) => PluginConfig::load(path)?,
        None => PluginConfig::default(),
    };
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const CONTEXTS: &str = r#"[
        {
            "region": [10, 20],
            "text": "",
            "context": [
                {
                    "subject": "http://data/attendees/1",
                    "predicate": "a",
                    "object": "http://data.notable.redpencil.io/#AttendeeList"
                }
            ]
        },
        {
            "region": [0, 5],
            "triples": [
                { "subject": "http://data/meetings/1", "predicate": "dct:title", "object": "Agenda" }
            ]
        }
    ]"#;

    #[test]
    fn scan_emits_one_hint_per_attendee_list() {
        let out = scan(CONTEXTS, &PluginConfig::default()).unwrap();
        let hints: serde_json::Value = serde_json::from_str(&out).unwrap();

        let hints = hints.as_array().unwrap();
        assert_eq!(hints.len(), 1);
        assert_eq!(hints[0]["location"], serde_json::json!([10, 20]));
        assert_eq!(hints[0]["resource"], "http://data/attendees/1");
    }

    #[test]
    fn scan_rejects_non_array_input() {
        assert!(scan("{}", &PluginConfig::default()).is_err());
    }

    #[test]
    fn render_orders_by_first_name() {
        let raw = r#"[
            {
                "id": "m2",
                "member": { "id": "p2", "firstname": "Zoe", "lastname": "Young" },
                "role": { "id": "r1", "label": "Chair" }
            },
            {
                "id": "m1",
                "member": {
                    "id": "p1",
                    "firstname": "Ann",
                    "lastname": "Lee",
                    "organization": { "id": "o1", "title": "OrgX" }
                },
                "role": { "id": "r1", "label": "Chair" }
            }
        ]"#;

        let markup = render(raw).unwrap();
        assert!(markup.starts_with("<ul><li "));
        assert!(markup.find(">Ann<").unwrap() < markup.find(">Zoe<").unwrap());
        assert!(markup.contains(r#"<span property="skos:label">OrgX</span>"#));
        assert!(markup.contains(r#"<span property="skos:label"></span>"#));
    }

    #[test]
    fn config_reads_file_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "search_debounce_ms = 0\nlog_filter = \"debug\"").unwrap();

        let config = config(Some(file.path())).unwrap();
        assert_eq!(config.search_debounce_ms, 0);
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.source, PluginConfig::default().source);
    }
}
