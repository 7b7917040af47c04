//! Editor Session
//!
//! Owns the mutable state of one editing session: the manifest being edited
//! and the saved list, most-recently-used first. Every mutation of the list
//! is mirrored to the store before it returns.

use crate::codec::{manifest_list_to_string, string_to_manifest_list};
use crate::error::{Error, Result};
use crate::manifest::{sanitize_manifest, Display, Manifest};
use crate::store::ManifestStore;

/// Field updates applied across the whole saved list.
#[derive(Debug, Clone, Default)]
pub struct BulkUpdate {
    pub display: Option<Display>,
    pub theme_color: Option<String>,
    pub background_color: Option<String>,
}

/// Single-owner session state: current manifest + saved list + store mirror.
pub struct Session {
    store: ManifestStore,
    current: Manifest,
    manifests: Vec<Manifest>,
}

impl Session {
    /// Restore a session from the store.
    pub fn open(store: ManifestStore) -> Result<Self> {
        let current = store.load_current()?;
        let manifests = store.load_list()?;
        Ok(Self {
            store,
            current,
            manifests,
        })
    }

    pub fn current(&self) -> &Manifest {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut Manifest {
        &mut self.current
    }

    pub fn manifests(&self) -> &[Manifest] {
        &self.manifests
    }

    /// Persist the manifest being edited.
    pub fn save_current(&self) -> Result<()> {
        self.store.save_current(&self.current)
    }

    fn persist_list(&self) -> Result<()> {
        self.store.save_list(&self.manifests)
    }

    /// Push the current manifest onto the front of the saved list.
    pub fn add_current(&mut self) -> Result<()> {
        self.manifests.insert(0, self.current.clone());
        self.persist_list()
    }

    /// Like `add_current`, but first drops saved entries sharing the current
    /// manifest's start URL.
    pub fn update_current(&mut self) -> Result<()> {
        let url = self.current.start_url.clone();
        self.manifests.retain(|m| m.start_url != url);
        self.manifests.insert(0, self.current.clone());
        self.persist_list()
    }

    /// Remove and return the saved manifest at `index`.
    pub fn delete(&mut self, index: usize) -> Result<Manifest> {
        if index >= self.manifests.len() {
            return Err(Error::NoSuchManifest(index));
        }
        let removed = self.manifests.remove(index);
        self.persist_list()?;
        Ok(removed)
    }

    /// Drop every saved manifest.
    pub fn clear(&mut self) -> Result<()> {
        self.manifests.clear();
        self.persist_list()
    }

    /// Load the saved manifest at `index` into the editor. With `keep_look`
    /// the current display mode and colors carry over to the picked entry.
    /// The result goes through the sanitizer before it becomes current.
    pub fn open_saved(&mut self, index: usize, keep_look: bool) -> Result<&Manifest> {
        let Some(picked) = self.manifests.get(index) else {
            return Err(Error::NoSuchManifest(index));
        };
        let mut picked = picked.clone();
        if keep_look {
            picked.display = self.current.display;
            picked.background_color = self.current.background_color.clone();
            picked.theme_color = self.current.theme_color.clone();
        }
        self.current = sanitize_manifest(&serde_json::to_value(&picked)?);
        self.save_current()?;
        Ok(&self.current)
    }

    /// Apply the provided fields to every saved manifest.
    pub fn bulk_update(&mut self, update: &BulkUpdate) -> Result<()> {
        for manifest in &mut self.manifests {
            if let Some(display) = update.display {
                manifest.display = display;
            }
            if let Some(color) = &update.theme_color {
                manifest.theme_color = color.clone();
            }
            if let Some(color) = &update.background_color {
                manifest.background_color = color.clone();
            }
        }
        self.persist_list()
    }

    /// Import newline-delimited JSON, prepending the parsed manifests.
    /// Returns how many were imported.
    pub fn import_text(&mut self, text: &str) -> Result<usize> {
        let imported = string_to_manifest_list(text);
        let count = imported.len();
        self.manifests.splice(0..0, imported);
        self.persist_list()?;
        Ok(count)
    }

    /// Export the saved list as newline-delimited JSON.
    pub fn export_text(&self) -> String {
        manifest_list_to_string(&self.manifests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_session(tag: &str) -> Session {
        let root = std::env::temp_dir().join(format!(
            "pwaforge-session-test-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&root);
        Session::open(ManifestStore::at_root(root)).unwrap()
    }

    fn named(session: &mut Session, name: &str, url: &str) {
        session.current_mut().set_name(name);
        session.current_mut().start_url = url.to_string();
    }

    #[test]
    fn test_add_is_mru_and_never_dedups() {
        let mut s = temp_session("add");
        named(&mut s, "A", "https://a.com");
        s.add_current().unwrap();
        s.add_current().unwrap();
        named(&mut s, "B", "https://b.com");
        s.add_current().unwrap();

        let names: Vec<_> = s.manifests().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["B", "A", "A"]);
    }

    #[test]
    fn test_update_dedups_by_start_url() {
        let mut s = temp_session("update");
        named(&mut s, "Old", "https://a.com");
        s.add_current().unwrap();
        named(&mut s, "Other", "https://b.com");
        s.add_current().unwrap();

        named(&mut s, "New", "https://a.com");
        s.update_current().unwrap();

        let names: Vec<_> = s.manifests().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["New", "Other"]);
    }

    #[test]
    fn test_delete_returns_removed_entry() {
        let mut s = temp_session("delete");
        named(&mut s, "A", "https://a.com");
        s.add_current().unwrap();
        named(&mut s, "B", "https://b.com");
        s.add_current().unwrap();

        let removed = s.delete(1).unwrap();
        assert_eq!(removed.name, "A");
        assert_eq!(s.manifests().len(), 1);

        assert!(matches!(s.delete(5), Err(Error::NoSuchManifest(5))));
    }

    #[test]
    fn test_open_saved_with_keep_look() {
        let mut s = temp_session("open");
        named(&mut s, "Saved", "https://a.com");
        s.current_mut().display = Display::Fullscreen;
        s.add_current().unwrap();

        named(&mut s, "Now", "https://b.com");
        s.current_mut().display = Display::Browser;
        s.current_mut().theme_color = "#112233".to_string();

        s.open_saved(0, true).unwrap();
        assert_eq!(s.current().name, "Saved");
        assert_eq!(s.current().display, Display::Browser);
        assert_eq!(s.current().theme_color, "#112233");
    }

    #[test]
    fn test_bulk_update_touches_only_given_fields() {
        let mut s = temp_session("bulk");
        named(&mut s, "A", "https://a.com");
        s.current_mut().theme_color = "#aaaaaa".to_string();
        s.add_current().unwrap();

        s.bulk_update(&BulkUpdate {
            display: Some(Display::MinimalUi),
            theme_color: None,
            background_color: Some("#ffffff".to_string()),
        })
        .unwrap();

        let m = &s.manifests()[0];
        assert_eq!(m.display, Display::MinimalUi);
        assert_eq!(m.theme_color, "#aaaaaa");
        assert_eq!(m.background_color, "#ffffff");
    }

    #[test]
    fn test_import_prepends_and_persists() {
        let mut s = temp_session("import");
        named(&mut s, "Existing", "https://a.com");
        s.add_current().unwrap();

        let text = "{\"name\":\"In\",\"start_url\":\"in.com\"}";
        let count = s.import_text(text).unwrap();
        assert_eq!(count, 1);
        assert_eq!(s.manifests()[0].name, "In");
        assert_eq!(s.manifests()[1].name, "Existing");

        let reloaded = string_to_manifest_list(&s.export_text());
        assert_eq!(reloaded.len(), 2);
    }

    #[test]
    fn test_clear_then_export_is_empty() {
        let mut s = temp_session("clear");
        named(&mut s, "A", "https://a.com");
        s.add_current().unwrap();
        s.clear().unwrap();
        assert!(s.manifests().is_empty());
        assert_eq!(s.export_text(), "");
    }
}
