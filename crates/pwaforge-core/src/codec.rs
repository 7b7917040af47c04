//! Collection Codec
//!
//! Converts between the in-memory manifest list and its persisted text form:
//! one JSON object per line, editor-only fields stripped, order preserved.
//! A line that cannot be decoded is skipped, never failing the whole batch.

use serde_json::Value;
use tracing::warn;

use crate::manifest::{sanitize_manifest, Manifest};

/// Serialize a manifest list as newline-delimited JSON.
pub fn manifest_list_to_string(manifests: &[Manifest]) -> String {
    manifests
        .iter()
        .filter_map(|m| match serde_json::to_string(&m.for_export()) {
            Ok(line) => Some(line),
            Err(e) => {
                warn!("failed to serialize manifest '{}': {}", m.name, e);
                None
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse newline-delimited JSON into a manifest list.
///
/// Blank lines are ignored; a malformed line is logged and skipped so its
/// siblings still load; every parsed line goes through the sanitizer.
pub fn string_to_manifest_list(text: &str) -> Vec<Manifest> {
    let mut manifests = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(value) => manifests.push(sanitize_manifest(&value)),
            Err(e) => {
                warn!("skipping unparseable manifest line: {}", e);
            }
        }
    }
    manifests
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{Display, Shortcut};

    fn sample(name: &str, url: &str) -> Manifest {
        let mut m = Manifest::default();
        m.set_name(name);
        m.start_url = url.to_string();
        m
    }

    #[test]
    fn test_round_trip_preserves_list() {
        let list = vec![
            sample("A", "https://a.com"),
            sample("B", "https://b.com/app"),
        ];
        let text = manifest_list_to_string(&list);
        let decoded = string_to_manifest_list(&text);
        assert_eq!(decoded, list);
    }

    #[test]
    fn test_round_trip_ignores_appliable_url() {
        let mut m = sample("A", "https://a.com");
        m.appliable_url = Some("/x".to_string());
        let text = manifest_list_to_string(&[m.clone()]);
        assert!(!text.contains("_appliable_url"));
        let decoded = string_to_manifest_list(&text);
        assert_eq!(decoded[0], m.for_export());
    }

    #[test]
    fn test_malformed_line_does_not_abort_batch() {
        let good = sample("Good", "https://a.com");
        let mut text = manifest_list_to_string(&[good.clone()]);
        text.push_str("\n{not json at all\n");
        text.push_str(&manifest_list_to_string(&[sample("Also", "https://b.com")]));

        let decoded = string_to_manifest_list(&text);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].name, "Good");
        assert_eq!(decoded[1].name, "Also");
    }

    #[test]
    fn test_blank_lines_skipped() {
        let text = "\n\n   \n";
        assert!(string_to_manifest_list(text).is_empty());
    }

    #[test]
    fn test_lines_are_sanitized() {
        // missing fields, bare-host start_url: still loads via merge
        let decoded = string_to_manifest_list("{\"name\":\"X\",\"start_url\":\"x.com\"}");
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].name, "X");
        assert_eq!(decoded[0].start_url, "https://x.com");
    }

    #[test]
    fn test_order_and_shortcuts_survive() {
        let mut m = sample("S", "https://s.com");
        m.display = Display::Fullscreen;
        m.shortcuts = vec![Shortcut {
            name: "Inbox".to_string(),
            url: "/inbox".to_string(),
        }];
        let decoded = string_to_manifest_list(&manifest_list_to_string(&[m.clone()]));
        assert_eq!(decoded[0], m);
    }
}
