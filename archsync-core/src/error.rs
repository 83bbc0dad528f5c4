// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Client Error Types
//!
//! Unified error type for workspace client operations.

use thiserror::Error;

use crate::archive::ArchiveError;
use crate::config::ConfigError;
use crate::encryption::{DecryptionError, EncryptionError};
use crate::remote::TransportError;
use crate::serialization::{PayloadError, SerializationError};
use crate::workspace::WorkspaceError;

/// Unified error type for client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The remote store failed or was unreachable.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// No workspace stored under the id.
    #[error("workspace {0} not found")]
    NotFound(i64),

    /// Payload could not be built or parsed.
    #[error("serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Payload could not be decrypted.
    #[error("decryption error: {0}")]
    Decryption(#[from] DecryptionError),

    /// Payload could not be encrypted.
    #[error("encryption error: {0}")]
    Encryption(#[from] EncryptionError),

    /// The remote store accepted the upload but the local copy failed.
    #[error("workspace {workspace_id} was stored remotely but archiving failed: {source}")]
    Archive {
        workspace_id: i64,
        #[source]
        source: ArchiveError,
    },

    /// Invalid workspace or id.
    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<PayloadError> for ClientError {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::Serialization(e) => ClientError::Serialization(e),
            PayloadError::Encryption(e) => ClientError::Encryption(e),
            PayloadError::Decryption(e) => ClientError::Decryption(e),
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
