//! CLI Commands

pub mod archive;
pub mod decrypt;
pub mod get;
pub mod put;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Writes `text` to `output`, or stdout when no file is given.
fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
        }
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}
