//! Get Command
//!
//! Downloads a workspace and prints it as JSON.

use std::path::Path;

use anyhow::Result;
use archsync_core::serialization;

use crate::config::CliConfig;
use crate::display;

/// Downloads workspace `id`.
pub fn run(config: &CliConfig, id: i64, output: Option<&Path>) -> Result<()> {
    let client = config.connect()?;
    let workspace = client.get_workspace(id)?;
    let json = serialization::to_json_pretty(&workspace)?;

    super::write_output(&json, output)?;
    if let Some(path) = output {
        display::success(&format!(
            "Workspace {} ({}) written to {}",
            id,
            workspace.name(),
            path.display()
        ));
    }
    Ok(())
}
