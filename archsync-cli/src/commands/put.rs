//! Put Command
//!
//! Uploads a workspace JSON file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use archsync_core::serialization;

use crate::config::CliConfig;
use crate::display;

/// Uploads `file` as workspace `id`.
pub fn run(config: &CliConfig, id: i64, file: &Path) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let workspace = serialization::from_json(&text)
        .with_context(|| format!("{} is not a workspace document", file.display()))?;

    let client = config.connect()?;
    let receipt = client.put_workspace(id, &workspace)?;

    display::success(&format!("Workspace {} uploaded", receipt.workspace_id));
    match receipt.archived {
        Some(path) => display::info(&format!("Archived to {}", path.display())),
        None => display::info("Archiving disabled (use --archive-dir to keep a local copy)"),
    }
    if config.passphrase.is_some() {
        display::info(&format!("Encrypted with {}", config.algorithm));
    }
    Ok(())
}
