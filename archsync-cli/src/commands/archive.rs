//! Archive Commands
//!
//! Lists and inspects archived uploads without contacting the service.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use archsync_core::Payload;

use crate::config::CliConfig;
use crate::display;

/// Lists archived uploads, optionally for one workspace.
pub fn list(config: &CliConfig, id: Option<i64>) -> Result<()> {
    let archive = config.archive()?;
    let entries = match id {
        Some(id) => archive.list_for(id)?,
        None => archive.list()?,
    };

    if entries.is_empty() {
        display::info(&format!(
            "No archived workspaces in {}",
            archive.dir().display()
        ));
        return Ok(());
    }

    display::display_archive_entries(&entries);
    println!();
    display::info(&format!("{} archived upload(s)", entries.len()));
    Ok(())
}

/// Prints the readable header of an archived upload.
pub fn show(file: &Path) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let payload = Payload::parse(&text)?;

    println!("  Workspace:  {}", payload.id());
    println!("  Name:       {}", payload.name());
    match &payload {
        Payload::Plain(workspace) => {
            println!("  Encryption: none");
            println!("  Elements:   {}", workspace.model.element_count());
            println!("  Views:      {}", workspace.views.len());
        }
        Payload::Encrypted(envelope) => match envelope.algorithm() {
            Some(algorithm) => println!("  Encryption: {}", algorithm),
            None => {
                println!("  Encryption: unsupported");
                display::warning("This file was encrypted with an unknown algorithm");
            }
        },
    }
    Ok(())
}
