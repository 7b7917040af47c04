mod commands;

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pwaforge",
    about = "Author web-app manifests, keep a saved collection, and generate apply scripts"
)]
pub struct Args {
    /// Storage directory (defaults to ~/.pwaforge)
    #[arg(long, global = true, value_name = "DIR")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the manifest being edited
    Show,
    /// Edit fields of the current manifest
    Set(SetArgs),
    /// Manage shortcuts of the current manifest
    Shortcut {
        #[command(subcommand)]
        action: ShortcutAction,
    },
    /// Push the current manifest onto the saved list
    Add,
    /// Save the current manifest, replacing entries with the same start URL
    Update,
    /// List saved manifests
    List,
    /// Load a saved manifest into the editor
    Open {
        index: usize,
        /// Keep the current display mode and colors
        #[arg(long)]
        keep_look: bool,
    },
    /// Delete a saved manifest by index
    Delete { index: usize },
    /// Clear the saved list
    Clear,
    /// Print the saved list as newline-delimited JSON
    Export,
    /// Import newline-delimited JSON from a file (or stdin)
    Import {
        file: Option<PathBuf>,
        /// Replace the saved list instead of prepending
        #[arg(long)]
        replace: bool,
    },
    /// Fetch a manifest collection from a URL and import it
    Fetch {
        url: String,
        /// Print the fetched body without importing
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply a display mode and/or colors across every saved manifest
    BulkUpdate {
        #[arg(long)]
        display: Option<String>,
        #[arg(long)]
        theme_color: Option<String>,
        #[arg(long)]
        background_color: Option<String>,
    },
    /// Emit an apply script for the current manifest or saved list
    Script {
        #[command(subcommand)]
        kind: ScriptKind,
    },
}

#[derive(ClapArgs, Debug)]
pub struct SetArgs {
    /// App name (also mirrored into short_name)
    #[arg(long)]
    pub name: Option<String>,
    /// Start URL; wrapper links are unwrapped and a scheme is forced
    #[arg(long)]
    pub link: Option<String>,
    /// Display mode: standalone, browser, minimal-ui, or fullscreen
    #[arg(long)]
    pub display: Option<String>,
    #[arg(long)]
    pub background_color: Option<String>,
    #[arg(long)]
    pub theme_color: Option<String>,
    /// Source URL of the first icon
    #[arg(long)]
    pub icon_src: Option<String>,
    /// Square size of the first icon (e.g. 192 for 192x192)
    #[arg(long)]
    pub icon_size: Option<u32>,
    /// MIME type of the first icon: image/png or image/jpeg
    #[arg(long)]
    pub icon_mime: Option<String>,
    /// Purpose of the first icon (e.g. maskable); "none" clears it
    #[arg(long)]
    pub icon_purpose: Option<String>,
    /// Override URL used when opening this manifest; "none" clears it
    #[arg(long)]
    pub appliable_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ShortcutAction {
    /// Append a shortcut
    Add { name: String, url: String },
    /// Remove a shortcut by index
    Remove { index: usize },
}

#[derive(Subcommand, Debug)]
pub enum ScriptKind {
    /// Console script overriding the current page's manifest
    Override,
    /// Tampermonkey userscript applying saved manifests by host
    Userscript,
    /// Bookmarklet that patches sites from a hosted manifest list URL
    Bookmarklet { url: String },
    /// data: URL carrying the current manifest
    DataUrl {
        /// Wrap the start URL in the shareable viewer link first
        #[arg(long)]
        self_link: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    commands::run(args).await
}
