use std::fs;
use std::io::Read;

use anyhow::Context;
use pwaforge_core::{
    links, normalize_start_url, script, BulkUpdate, Display, Icon, IconMime, IconPurpose,
    ManifestStore, Session, Shortcut,
};

use crate::{Args, Command, ScriptKind, SetArgs, ShortcutAction};

pub async fn run(args: Args) -> anyhow::Result<()> {
    let store = match args.store {
        Some(root) => ManifestStore::at_root(root),
        None => ManifestStore::open_default()?,
    };
    let mut session = Session::open(store)?;

    match args.command {
        Command::Show => {
            println!("{}", serde_json::to_string_pretty(session.current())?);
        }
        Command::Set(set) => {
            apply_set(&mut session, set)?;
            session.save_current()?;
            println!("{}", serde_json::to_string_pretty(session.current())?);
        }
        Command::Shortcut { action } => {
            match action {
                ShortcutAction::Add { name, url } => {
                    session.current_mut().shortcuts.push(Shortcut { name, url });
                }
                ShortcutAction::Remove { index } => {
                    let shortcuts = &mut session.current_mut().shortcuts;
                    if index >= shortcuts.len() {
                        anyhow::bail!("no shortcut at index {}", index);
                    }
                    shortcuts.remove(index);
                }
            }
            session.save_current()?;
            println!("{}", serde_json::to_string_pretty(session.current())?);
        }
        Command::Add => {
            session.add_current()?;
            println!("Added '{}' to the saved list", session.current().name);
        }
        Command::Update => {
            session.update_current()?;
            println!("Updated '{}' in the saved list", session.current().name);
        }
        Command::List => {
            if session.manifests().is_empty() {
                println!("(no saved manifests)");
            }
            for (i, m) in session.manifests().iter().enumerate() {
                println!("{:3}  {}  {}", i, m.name, links::open_url(m));
            }
        }
        Command::Open { index, keep_look } => {
            let opened = session.open_saved(index, keep_look)?;
            println!("Now editing '{}'", opened.name);
        }
        Command::Delete { index } => {
            let removed = session.delete(index)?;
            println!("Deleted '{}'", removed.name);
        }
        Command::Clear => {
            session.clear()?;
            println!("Cleared the saved list");
        }
        Command::Export => {
            println!("{}", session.export_text());
        }
        Command::Import { file, replace } => {
            let text = match file {
                Some(path) => fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            if replace {
                session.clear()?;
            }
            let count = session.import_text(&text)?;
            println!("Imported {} manifest(s)", count);
        }
        Command::Fetch { url, dry_run } => {
            let text = pwaforge_core::fetch_text(&url)
                .await
                .with_context(|| format!("failed to fetch {}", url))?;
            if dry_run {
                println!("{}", text);
            } else {
                let count = session.import_text(&text)?;
                println!("Imported {} manifest(s) from {}", count, url);
            }
        }
        Command::BulkUpdate {
            display,
            theme_color,
            background_color,
        } => {
            let update = BulkUpdate {
                display: display
                    .as_deref()
                    .map(str::parse::<Display>)
                    .transpose()
                    .map_err(anyhow::Error::msg)?,
                theme_color,
                background_color,
            };
            session.bulk_update(&update)?;
            println!("Updated {} manifest(s)", session.manifests().len());
        }
        Command::Script { kind } => match kind {
            ScriptKind::Override => {
                println!("{}", script::override_script(session.current())?);
            }
            ScriptKind::Userscript => {
                println!("{}", script::userscript(session.manifests())?);
            }
            ScriptKind::Bookmarklet { url } => {
                println!("{}", script::patch_bookmarklet(&url)?);
            }
            ScriptKind::DataUrl { self_link } => {
                let manifest = if self_link {
                    script::self_manifest(session.current())
                } else {
                    session.current().for_export()
                };
                println!("{}", script::manifest_data_url(&manifest)?);
            }
        },
    }

    Ok(())
}

fn apply_set(session: &mut Session, set: SetArgs) -> anyhow::Result<()> {
    let current = session.current_mut();

    if let Some(name) = set.name {
        current.set_name(name);
    }
    if let Some(link) = set.link {
        current.start_url = normalize_start_url(&link);
    }
    if let Some(display) = set.display {
        current.display = display.parse::<Display>().map_err(anyhow::Error::msg)?;
    }
    if let Some(color) = set.background_color {
        current.background_color = color;
    }
    if let Some(color) = set.theme_color {
        current.theme_color = color;
    }

    // field edits target the first icon, like the editor form
    if current.icons.is_empty() {
        current.icons.push(Icon::default());
    }
    if let Some(src) = set.icon_src {
        current.icons[0].src = src;
    }
    if let Some(size) = set.icon_size {
        current.icons[0].sizes = format!("{}x{}", size, size);
    }
    if let Some(mime) = set.icon_mime {
        current.icons[0].mime = mime.parse::<IconMime>().map_err(anyhow::Error::msg)?;
    }
    if let Some(purpose) = set.icon_purpose {
        current.icons[0].purpose = match purpose.as_str() {
            "none" => None,
            other => Some(other.parse::<IconPurpose>().map_err(anyhow::Error::msg)?),
        };
    }
    if let Some(url) = set.appliable_url {
        current.appliable_url = match url.as_str() {
            "none" => None,
            other => Some(other.to_string()),
        };
    }

    Ok(())
}
