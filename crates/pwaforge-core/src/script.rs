//! Apply-Script Generation
//!
//! Renders the fixed script templates under `raw/` by splicing serialized
//! manifests into their placeholder tokens (`$json`, `$manifests`, `$url`).
//! The console and bookmarklet variants are collapsed to one line so they
//! survive a paste into an address bar or devtools prompt.

use crate::chrome::make_chrome_manifest;
use crate::error::Result;
use crate::links::wrap_link;
use crate::manifest::Manifest;

const OVERRIDE_TEMPLATE: &str = include_str!("raw/override-manifest.js");
const USERSCRIPT_TEMPLATE: &str = include_str!("raw/userscript.js");
const PATCH_TEMPLATE: &str = include_str!("raw/patch-bookmarklet.js");

/// Console script that swaps the current page's manifest link for the
/// Chrome-derived form of this manifest.
pub fn override_script(manifest: &Manifest) -> Result<String> {
    let chrome = make_chrome_manifest(&manifest.for_export());
    let json = serde_json::to_string(&chrome)?;
    let script = collapse(OVERRIDE_TEMPLATE, " ").replace("\"$json\"", &format!("`{}`", json));
    Ok(script)
}

/// Tampermonkey userscript carrying the whole saved list; at run time it
/// applies the entry whose start URL contains the browsing host.
pub fn userscript(manifests: &[Manifest]) -> Result<String> {
    let exported: Vec<Manifest> = manifests.iter().map(Manifest::for_export).collect();
    let json = serde_json::to_string(&exported)?;
    Ok(USERSCRIPT_TEMPLATE.replace("$manifests", &json))
}

/// Bookmarklet that fetches a hosted newline-delimited manifest list from
/// `url` and patches the current site with it.
pub fn patch_bookmarklet(url: &str) -> Result<String> {
    let quoted = serde_json::to_string(url)?;
    Ok(collapse(PATCH_TEMPLATE, "").replace("\"$url\"", &quoted))
}

/// Manifest for applying to the editor's own page: the start URL goes back
/// through the viewer wrapper so the installed app reopens the shared link.
pub fn self_manifest(manifest: &Manifest) -> Manifest {
    Manifest {
        start_url: wrap_link(&manifest.start_url),
        ..manifest.for_export()
    }
}

/// `data:` URL form of one manifest, usable as a manifest link href.
pub fn manifest_data_url(manifest: &Manifest) -> Result<String> {
    let json = serde_json::to_string(&manifest.for_export())?;
    Ok(format!(
        "data:application/json;charset=utf-8,{}",
        urlencoding::encode(&json)
    ))
}

fn collapse(template: &str, separator: &str) -> String {
    template
        .lines()
        .map(str::trim_start)
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::LINK_PREFIX;

    fn sample() -> Manifest {
        let mut m = Manifest::default();
        m.set_name("Site");
        m.start_url = "https://a.com/app".to_string();
        m
    }

    #[test]
    fn test_override_script_splices_manifest() {
        let script = override_script(&sample()).unwrap();
        assert!(!script.contains("$json"));
        assert!(script.contains("\"name\":\"Site\""));
        assert!(script.contains("\"scope\":\"https://a.com/\""));
        // collapsed to a single line for pasting
        assert!(!script.contains('\n'));
    }

    #[test]
    fn test_userscript_carries_whole_list() {
        let mut other = Manifest::default();
        other.set_name("Other");
        other.appliable_url = Some("/x".to_string());
        let script = userscript(&[sample(), other]).unwrap();
        assert!(!script.contains("$manifests"));
        assert!(script.contains("\"name\":\"Site\""));
        assert!(script.contains("\"name\":\"Other\""));
        assert!(!script.contains("_appliable_url"));
    }

    #[test]
    fn test_patch_bookmarklet_quotes_url() {
        let script = patch_bookmarklet("https://host/list.txt").unwrap();
        assert!(!script.contains("$url"));
        assert!(script.contains("fetch(\"https://host/list.txt\")"));
        assert!(script.starts_with("javascript:"));
        assert!(!script.contains('\n'));
    }

    #[test]
    fn test_self_manifest_rewraps_start_url() {
        let m = self_manifest(&sample());
        assert!(m.start_url.starts_with(LINK_PREFIX));
        assert!(!m.start_url[LINK_PREFIX.len()..].contains("https"));
    }

    #[test]
    fn test_manifest_data_url_is_encoded_json() {
        let url = manifest_data_url(&sample()).unwrap();
        assert!(url.starts_with("data:application/json;charset=utf-8,"));
        assert!(!url.contains('"'));
    }
}
