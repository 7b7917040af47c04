//! Manifest Types
//!
//! Rust structs matching the web-app manifest JSON shape edited by the tool.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display mode of an installed app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    Standalone,
    Browser,
    MinimalUi,
    Fullscreen,
}

impl Display {
    pub const ALL: [Display; 4] = [
        Display::Standalone,
        Display::Browser,
        Display::MinimalUi,
        Display::Fullscreen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Display::Standalone => "standalone",
            Display::Browser => "browser",
            Display::MinimalUi => "minimal-ui",
            Display::Fullscreen => "fullscreen",
        }
    }
}

impl Default for Display {
    fn default() -> Self {
        Display::Standalone
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Display {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standalone" => Ok(Display::Standalone),
            "browser" => Ok(Display::Browser),
            "minimal-ui" => Ok(Display::MinimalUi),
            "fullscreen" => Ok(Display::Fullscreen),
            other => Err(format!("unknown display mode: {}", other)),
        }
    }
}

/// Icon MIME types the editor offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconMime {
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/jpeg")]
    Jpeg,
}

impl IconMime {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconMime::Png => "image/png",
            IconMime::Jpeg => "image/jpeg",
        }
    }
}

impl Default for IconMime {
    fn default() -> Self {
        IconMime::Png
    }
}

impl fmt::Display for IconMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IconMime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image/png" | "png" => Ok(IconMime::Png),
            "image/jpeg" | "jpeg" | "jpg" => Ok(IconMime::Jpeg),
            other => Err(format!("unknown icon type: {}", other)),
        }
    }
}

/// Icon purpose hints understood by install prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconPurpose {
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "monochrome")]
    Monochrome,
    #[serde(rename = "maskable")]
    Maskable,
    #[serde(rename = "maskable any")]
    MaskableAny,
}

impl IconPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconPurpose::Any => "any",
            IconPurpose::Monochrome => "monochrome",
            IconPurpose::Maskable => "maskable",
            IconPurpose::MaskableAny => "maskable any",
        }
    }
}

impl fmt::Display for IconPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IconPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(IconPurpose::Any),
            "monochrome" => Ok(IconPurpose::Monochrome),
            "maskable" => Ok(IconPurpose::Maskable),
            "maskable any" => Ok(IconPurpose::MaskableAny),
            other => Err(format!("unknown icon purpose: {}", other)),
        }
    }
}

/// One entry of the manifest's icon list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime: IconMime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<IconPurpose>,
}

impl Default for Icon {
    fn default() -> Self {
        Self {
            src: String::new(),
            sizes: "128x128".to_string(),
            mime: IconMime::Png,
            purpose: None,
        }
    }
}

/// App shortcut: shown in the long-press / right-click menu of the icon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shortcut {
    pub name: String,
    pub url: String,
}

/// One installable app definition.
///
/// Invariants after sanitization: `icons` is never empty and `start_url`
/// begins with `http://` or `https://`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub short_name: String,
    pub start_url: String,
    pub display: Display,
    pub background_color: String,
    pub theme_color: String,
    pub icons: Vec<Icon>,
    pub shortcuts: Vec<Shortcut>,

    /// Editor-only override for the open/apply target.
    /// Stripped whenever the manifest is exported or persisted.
    #[serde(
        rename = "_appliable_url",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub appliable_url: Option<String>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            name: "App".to_string(),
            short_name: "App".to_string(),
            start_url: "www".to_string(),
            display: Display::Standalone,
            background_color: "#000000".to_string(),
            theme_color: "#000000".to_string(),
            icons: vec![Icon::default()],
            shortcuts: Vec::new(),
            appliable_url: None,
        }
    }
}

impl Manifest {
    /// Rename the app. The editor mirrors `name` into `short_name`.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.short_name = name.clone();
        self.name = name;
    }

    /// Copy without the editor-only fields, ready to serialize.
    pub fn for_export(&self) -> Manifest {
        Manifest {
            appliable_url: None,
            ..self.clone()
        }
    }
}
