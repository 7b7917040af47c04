//! Manifest Model
//!
//! The web-app manifest record, its closed enumerations, and the sanitizer
//! that coerces arbitrary JSON into a well-formed manifest.

pub mod sanitize;
pub mod types;

pub use sanitize::sanitize_manifest;
pub use types::{Display, Icon, IconMime, IconPurpose, Manifest, Shortcut};
