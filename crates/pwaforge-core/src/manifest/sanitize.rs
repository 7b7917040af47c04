//! Manifest Sanitizer
//!
//! Coerces arbitrary parsed JSON into a well-formed manifest. Tries strict
//! deserialization first, then merges the input's own fields over the
//! defaults, and finally falls back to the plain default. Never fails.

use serde_json::Value;
use tracing::warn;

use super::types::{Icon, Manifest};
use crate::links::normalize_start_url;

/// Turn a loosely-typed JSON value into a manifest satisfying the invariants:
/// non-empty icon list and a `http`/`https` start URL.
pub fn sanitize_manifest(value: &Value) -> Manifest {
    if let Ok(manifest) = serde_json::from_value::<Manifest>(value.clone()) {
        return repair(manifest);
    }

    warn!("manifest failed strict validation, merging over defaults");
    match serde_json::from_value::<Manifest>(merge_over_default(value)) {
        Ok(manifest) => repair(manifest),
        Err(e) => {
            warn!("merged manifest still invalid ({}), using defaults", e);
            repair(Manifest::default())
        }
    }
}

/// Overlay the input's fields on a serialized default manifest, so fields
/// that do match the schema survive while the rest take default values.
fn merge_over_default(value: &Value) -> Value {
    let mut merged = match serde_json::to_value(Manifest::default()) {
        Ok(Value::Object(map)) => map,
        _ => return Value::Null,
    };
    if let Value::Object(fields) = value {
        for (key, field) in fields {
            merged.insert(key.clone(), field.clone());
        }
    }
    Value::Object(merged)
}

fn repair(mut manifest: Manifest) -> Manifest {
    if manifest.icons.is_empty() {
        manifest.icons = vec![Icon::default()];
    }
    manifest.start_url = normalize_start_url(&manifest.start_url);
    manifest
}
