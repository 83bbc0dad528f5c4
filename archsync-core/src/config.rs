// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Client Configuration
//!
//! Immutable settings handed to the client at construction: where the
//! service lives, the API credentials, where to archive uploads, whether to
//! merge with the remote version before uploading, and how to encrypt.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;
use zeroize::Zeroizing;

use crate::encryption::{EncryptionAlgorithm, EncryptionStrategy, PasswordBased};

/// Default API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.structurizr.com";
/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("API key and secret are required")]
    MissingCredentials,

    #[cfg(feature = "http")]
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration for the workspace client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the workspace API.
    pub api_url: Url,

    /// API key (sent with every request).
    pub api_key: String,

    /// API secret (only used to sign requests).
    pub api_secret: Zeroizing<String>,

    /// Directory receiving a copy of every uploaded payload.
    /// `None` disables archiving.
    pub archive_dir: Option<PathBuf>,

    /// Fetch the remote workspace before uploading and keep its layout.
    pub merge_from_remote: bool,

    /// Client-side encryption.
    pub encryption: EncryptionStrategy,

    /// HTTP timeout per request.
    pub timeout: Duration,

    /// User recorded as the last modifier.
    pub user: Option<String>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url.as_str())
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("archive_dir", &self.archive_dir)
            .field("merge_from_remote", &self.merge_from_remote)
            .field("encryption", &self.encryption.algorithm())
            .field("timeout", &self.timeout)
            .field("user", &self.user)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            api_key: String::new(),
            api_secret: Zeroizing::new(String::new()),
            archive_dir: None,
            merge_from_remote: true,
            encryption: EncryptionStrategy::None,
            timeout: DEFAULT_TIMEOUT,
            user: None,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration with API credentials.
    pub fn new(api_key: &str, api_secret: &str) -> Self {
        ClientConfig {
            api_key: api_key.to_string(),
            api_secret: Zeroizing::new(api_secret.to_string()),
            ..Default::default()
        }
    }

    /// Sets the API base URL.
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self, ConfigError> {
        self.api_url = Url::parse(api_url)?;
        Ok(self)
    }

    /// Archives every uploaded payload into `dir`.
    pub fn with_archive_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.archive_dir = Some(dir.into());
        self
    }

    /// Enables or disables merging with the remote version before upload.
    pub fn with_merge_from_remote(mut self, merge: bool) -> Self {
        self.merge_from_remote = merge;
        self
    }

    /// Sets the encryption strategy.
    pub fn with_encryption(mut self, encryption: impl Into<EncryptionStrategy>) -> Self {
        self.encryption = encryption.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user recorded as last modifier.
    pub fn with_user(mut self, user: &str) -> Self {
        self.user = Some(user.to_string());
        self
    }

    /// Returns true if both API credentials are set.
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }

    /// Reads configuration from `ARCHSYNC_*` environment variables.
    ///
    /// - `ARCHSYNC_API_URL`
    /// - `ARCHSYNC_API_KEY`, `ARCHSYNC_API_SECRET`
    /// - `ARCHSYNC_ARCHIVE_DIR`
    /// - `ARCHSYNC_MERGE_FROM_REMOTE` (`true`/`false`)
    /// - `ARCHSYNC_PASSPHRASE`, `ARCHSYNC_ENCRYPTION` (`aes`/`xchacha20`, default `aes`)
    /// - `ARCHSYNC_TIMEOUT_SECS`
    /// - `ARCHSYNC_USER`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ClientConfig::default();

        if let Some(url) = lookup("ARCHSYNC_API_URL") {
            config.api_url = Url::parse(&url)?;
        }
        if let Some(key) = lookup("ARCHSYNC_API_KEY") {
            config.api_key = key;
        }
        if let Some(secret) = lookup("ARCHSYNC_API_SECRET") {
            config.api_secret = Zeroizing::new(secret);
        }
        config.archive_dir = lookup("ARCHSYNC_ARCHIVE_DIR").map(PathBuf::from);

        if let Some(value) = lookup("ARCHSYNC_MERGE_FROM_REMOTE") {
            config.merge_from_remote = parse_bool(&value).ok_or(ConfigError::InvalidValue {
                name: "ARCHSYNC_MERGE_FROM_REMOTE",
                value,
            })?;
        }

        if let Some(passphrase) = lookup("ARCHSYNC_PASSPHRASE") {
            let algorithm = match lookup("ARCHSYNC_ENCRYPTION") {
                Some(value) => value
                    .parse::<EncryptionAlgorithm>()
                    .map_err(|_| ConfigError::InvalidValue {
                        name: "ARCHSYNC_ENCRYPTION",
                        value,
                    })?,
                None => EncryptionAlgorithm::Aes,
            };
            config.encryption = PasswordBased::new(algorithm, &passphrase).into();
        }

        if let Some(value) = lookup("ARCHSYNC_TIMEOUT_SECS") {
            let secs: u64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                name: "ARCHSYNC_TIMEOUT_SECS",
                value: value.clone(),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.user = lookup("ARCHSYNC_USER");
        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url.as_str(), "https://api.structurizr.com/");
        assert!(config.merge_from_remote);
        assert!(config.archive_dir.is_none());
        assert!(!config.encryption.is_enabled());
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("key", "secret")
            .with_archive_dir("/tmp/archive")
            .with_merge_from_remote(false)
            .with_encryption(EncryptionStrategy::aes("password"))
            .with_timeout(Duration::from_secs(5));

        assert!(config.has_credentials());
        assert_eq!(config.archive_dir, Some(PathBuf::from("/tmp/archive")));
        assert!(!config.merge_from_remote);
        assert_eq!(config.encryption.algorithm(), Some(EncryptionAlgorithm::Aes));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_api_url() {
        assert!(matches!(
            ClientConfig::default().with_api_url("not a url"),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = ClientConfig::new("key", "very-secret")
            .with_encryption(EncryptionStrategy::aes("also-secret"));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("also-secret"));
    }

    #[test]
    fn test_from_lookup() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("ARCHSYNC_API_URL", "http://localhost:8080"),
            ("ARCHSYNC_API_KEY", "key"),
            ("ARCHSYNC_API_SECRET", "secret"),
            ("ARCHSYNC_ARCHIVE_DIR", "/var/archive"),
            ("ARCHSYNC_MERGE_FROM_REMOTE", "false"),
            ("ARCHSYNC_PASSPHRASE", "password"),
            ("ARCHSYNC_ENCRYPTION", "xchacha20"),
            ("ARCHSYNC_TIMEOUT_SECS", "10"),
        ]))
        .unwrap();

        assert_eq!(config.api_url.as_str(), "http://localhost:8080/");
        assert!(config.has_credentials());
        assert_eq!(config.archive_dir, Some(PathBuf::from("/var/archive")));
        assert!(!config.merge_from_remote);
        assert_eq!(
            config.encryption.algorithm(),
            Some(EncryptionAlgorithm::XChaCha20)
        );
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_from_lookup_passphrase_defaults_to_aes() {
        let config =
            ClientConfig::from_lookup(lookup_from(&[("ARCHSYNC_PASSPHRASE", "password")])).unwrap();
        assert_eq!(config.encryption.algorithm(), Some(EncryptionAlgorithm::Aes));
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        let err = ClientConfig::from_lookup(lookup_from(&[("ARCHSYNC_MERGE_FROM_REMOTE", "maybe")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "ARCHSYNC_MERGE_FROM_REMOTE",
                ..
            }
        ));

        let err = ClientConfig::from_lookup(lookup_from(&[("ARCHSYNC_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
