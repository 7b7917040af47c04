//! Chrome Manifest Derivation
//!
//! Chrome wants a `scope` field and absolute shortcut URLs. The scope is the
//! start URL's origin with path, query, and fragment stripped; shortcut URLs
//! are resolved against it. A malformed start URL leaves the manifest as-is.

use serde::Serialize;
use tracing::warn;
use url::Url;

use crate::manifest::{Manifest, Shortcut};

/// A manifest extended with the Chrome-specific `scope` field.
#[derive(Debug, Clone, Serialize)]
pub struct ChromeManifest {
    #[serde(flatten)]
    pub manifest: Manifest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Derive the Chrome form of a manifest. On any URL-construction failure the
/// input fields pass through unchanged, without a scope.
pub fn make_chrome_manifest(manifest: &Manifest) -> ChromeManifest {
    match derive_scope(manifest) {
        Ok((scope, shortcuts)) => ChromeManifest {
            manifest: Manifest {
                shortcuts,
                ..manifest.clone()
            },
            scope: Some(scope),
        },
        Err(e) => {
            warn!("failed to derive chrome scope: {}", e);
            ChromeManifest {
                manifest: manifest.clone(),
                scope: None,
            }
        }
    }
}

fn derive_scope(manifest: &Manifest) -> Result<(String, Vec<Shortcut>), url::ParseError> {
    let mut scope = Url::parse(&manifest.start_url)?;
    scope.set_path("/");
    scope.set_query(None);
    scope.set_fragment(None);

    let shortcuts = manifest
        .shortcuts
        .iter()
        .map(|s| {
            Ok(Shortcut {
                name: s.name.clone(),
                url: scope.join(&s.url)?.to_string(),
            })
        })
        .collect::<Result<Vec<_>, url::ParseError>>()?;

    Ok((scope.to_string(), shortcuts))
}
