//! Decrypt Command
//!
//! Decrypts an encrypted workspace file, such as an archived upload.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use archsync_core::serialization::{self, decrypt_workspace};
use archsync_core::{EncryptionStrategy, Payload};

use crate::config::CliConfig;
use crate::display;

/// Decrypts `file` with the configured passphrase.
pub fn run(config: &CliConfig, file: &Path, output: Option<&Path>) -> Result<()> {
    let Some(passphrase) = &config.passphrase else {
        bail!("A passphrase is required. Use --passphrase or ARCHSYNC_PASSPHRASE.");
    };

    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let envelope = match Payload::parse(&text)? {
        Payload::Encrypted(envelope) => envelope,
        Payload::Plain(_) => bail!("{} is not encrypted", file.display()),
    };

    // The envelope names its algorithm, so --algorithm is not needed here
    let strategy = EncryptionStrategy::for_metadata(envelope.encryption_strategy(), passphrase)?;
    let workspace = decrypt_workspace(&envelope, &strategy)?;
    let json = serialization::to_json_pretty(&workspace)?;

    super::write_output(&json, output)?;
    if let Some(path) = output {
        display::success(&format!(
            "Workspace {} decrypted to {}",
            workspace.id(),
            path.display()
        ));
    }
    Ok(())
}
