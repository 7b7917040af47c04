//! pwaforge core
//!
//! The manifest repository behind the pwaforge editor: the web-app manifest
//! data model, the sanitize/import/export pipeline, the newline-delimited
//! JSON store, and the apply-script generators.

pub mod chrome;
pub mod codec;
pub mod error;
pub mod links;
pub mod manifest;
pub mod remote;
pub mod script;
pub mod session;
pub mod store;

pub use chrome::{make_chrome_manifest, ChromeManifest};
pub use codec::{manifest_list_to_string, string_to_manifest_list};
pub use error::{Error, Result};
pub use links::{normalize_start_url, open_url, unwrap_link, wrap_link, LINK_PREFIX};
pub use manifest::{
    sanitize_manifest, Display, Icon, IconMime, IconPurpose, Manifest, Shortcut,
};
pub use remote::{fetch_manifest_list, fetch_text};
pub use script::{
    manifest_data_url, override_script, patch_bookmarklet, self_manifest, userscript,
};
pub use session::{BulkUpdate, Session};
pub use store::ManifestStore;
