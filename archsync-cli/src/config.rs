//! CLI Configuration

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use archsync_core::{
    ClientConfig, EncryptionAlgorithm, EncryptionStrategy, HttpRemoteStore, PasswordBased,
    WorkspaceArchive, WorkspaceClient,
};
use url::Url;

/// CLI configuration.
#[derive(Clone)]
pub struct CliConfig {
    /// Workspace API base URL.
    pub api_url: Url,
    /// API key.
    pub api_key: String,
    /// API secret.
    pub api_secret: String,
    /// Archive directory, if archiving.
    pub archive_dir: Option<PathBuf>,
    /// Encryption passphrase, if encrypting.
    pub passphrase: Option<String>,
    /// Algorithm used with the passphrase.
    pub algorithm: EncryptionAlgorithm,
    /// Merge remote layout before upload.
    pub merge_from_remote: bool,
    /// User stamped on uploads.
    pub user: Option<String>,
    /// Request timeout.
    pub timeout_secs: u64,
}

impl CliConfig {
    /// Encryption strategy selected on the command line.
    pub fn encryption(&self) -> EncryptionStrategy {
        match &self.passphrase {
            Some(passphrase) => PasswordBased::new(self.algorithm, passphrase).into(),
            None => EncryptionStrategy::None,
        }
    }

    /// Builds the library client configuration.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(&self.api_key, &self.api_secret)
            .with_merge_from_remote(self.merge_from_remote)
            .with_encryption(self.encryption())
            .with_timeout(Duration::from_secs(self.timeout_secs));
        config.api_url = self.api_url.clone();
        if let Some(dir) = &self.archive_dir {
            config = config.with_archive_dir(dir);
        }
        if let Some(user) = &self.user {
            config = config.with_user(user);
        }
        config
    }

    /// Connects a client to the remote API.
    pub fn connect(&self) -> Result<WorkspaceClient<HttpRemoteStore>> {
        if self.api_key.is_empty() || self.api_secret.is_empty() {
            bail!("API key and secret are required. Use --api-key/--api-secret or ARCHSYNC_API_KEY/ARCHSYNC_API_SECRET.");
        }
        Ok(WorkspaceClient::connect(self.client_config())?)
    }

    /// Opens the configured archive.
    pub fn archive(&self) -> Result<WorkspaceArchive> {
        match &self.archive_dir {
            Some(dir) => Ok(WorkspaceArchive::new(dir)),
            None => bail!("No archive directory configured. Use --archive-dir or ARCHSYNC_ARCHIVE_DIR."),
        }
    }
}
