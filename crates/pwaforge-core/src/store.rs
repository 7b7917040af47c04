//! Durable Store
//!
//! File-backed mirror of the editor state under `~/.pwaforge/`: the saved
//! manifest list as newline-delimited JSON, and the manifest currently being
//! edited as a single pretty-printed JSON file. The whole list is rewritten
//! on every mutation; a corrupt stored line is dropped, never fatal.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::warn;

use crate::codec::{manifest_list_to_string, string_to_manifest_list};
use crate::error::{Error, Result};
use crate::manifest::{sanitize_manifest, Manifest};

const LIST_FILE: &str = "manifests";
const CURRENT_FILE: &str = "current.json";

/// File-backed manifest storage rooted at a single directory.
pub struct ManifestStore {
    root: PathBuf,
}

impl ManifestStore {
    /// Store under the user's home directory (`~/.pwaforge/`).
    pub fn open_default() -> Result<Self> {
        let home = dirs::home_dir().ok_or(Error::NoHomeDir)?;
        Ok(Self::at_root(home.join(".pwaforge")))
    }

    /// Store rooted at an explicit directory.
    pub fn at_root(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn list_path(&self) -> PathBuf {
        self.root.join(LIST_FILE)
    }

    fn current_path(&self) -> PathBuf {
        self.root.join(CURRENT_FILE)
    }

    /// Load the saved manifest list. Missing file means an empty list.
    pub fn load_list(&self) -> Result<Vec<Manifest>> {
        let path = self.list_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&path)?;
        Ok(string_to_manifest_list(&text))
    }

    /// Persist the whole manifest list.
    pub fn save_list(&self, manifests: &[Manifest]) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.list_path(), manifest_list_to_string(manifests))?;
        Ok(())
    }

    /// Load the manifest being edited. Missing or corrupt state falls back
    /// to the default manifest.
    pub fn load_current(&self) -> Result<Manifest> {
        let path = self.current_path();
        if !path.exists() {
            return Ok(Manifest::default());
        }
        let text = fs::read_to_string(&path)?;
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Ok(sanitize_manifest(&value)),
            Err(e) => {
                warn!("stored editor manifest is corrupt ({}), starting fresh", e);
                Ok(Manifest::default())
            }
        }
    }

    /// Persist the manifest being edited.
    pub fn save_current(&self, manifest: &Manifest) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        let content = serde_json::to_string_pretty(manifest)?;
        fs::write(self.current_path(), content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> ManifestStore {
        let root = std::env::temp_dir().join(format!(
            "pwaforge-store-test-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&root);
        ManifestStore::at_root(root)
    }

    #[test]
    fn test_missing_store_loads_empty() {
        let store = temp_store("missing");
        assert!(store.load_list().unwrap().is_empty());
        assert_eq!(store.load_current().unwrap(), Manifest::default());
    }

    #[test]
    fn test_empty_list_round_trip() {
        let store = temp_store("empty");
        store.save_list(&[]).unwrap();
        assert!(store.load_list().unwrap().is_empty());
    }

    #[test]
    fn test_list_round_trip() {
        let store = temp_store("list");
        let mut a = Manifest::default();
        a.set_name("A");
        a.start_url = "https://a.com".to_string();
        let mut b = Manifest::default();
        b.set_name("B");
        b.start_url = "https://b.com".to_string();

        store.save_list(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(store.load_list().unwrap(), vec![a, b]);
    }

    #[test]
    fn test_corrupt_line_dropped_on_load() {
        let store = temp_store("corrupt");
        let mut a = Manifest::default();
        a.set_name("Kept");
        a.start_url = "https://kept.com".to_string();
        store.save_list(&[a]).unwrap();

        // append garbage behind the valid line
        let path = store.list_path();
        let mut text = fs::read_to_string(&path).unwrap();
        text.push_str("\n{broken");
        fs::write(&path, text).unwrap();

        let loaded = store.load_list().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Kept");
    }

    #[test]
    fn test_current_round_trip() {
        let store = temp_store("current");
        let mut m = Manifest::default();
        m.set_name("Editing");
        m.start_url = "https://edit.me".to_string();
        store.save_current(&m).unwrap();
        assert_eq!(store.load_current().unwrap(), m);
    }
}
