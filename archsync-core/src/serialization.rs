// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Workspace Serialization
//!
//! Converts workspaces to and from the JSON payloads exchanged with the
//! remote store and written to the archive.
//!
//! Two payload shapes exist:
//! - plain: the workspace document itself
//! - envelope: `{id, name, ..., encryptionStrategy: {type, ...}, ciphertext}`
//!   where `ciphertext` is the base64 of the encrypted plain payload and the
//!   identifying header fields stay readable for indexing.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::encryption::{
    DecryptionError, EncryptionAlgorithm, EncryptionError, EncryptionMetadata, EncryptionStrategy,
};
use crate::model::ModelError;
use crate::view::ViewError;
use crate::workspace::{Workspace, WorkspaceHeader};

/// Malformed or invalid payloads.
#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Payload is not a workspace document")]
    NotAWorkspace,
    #[error("Invalid workspace model: {0}")]
    InvalidModel(#[from] ModelError),
    #[error("Invalid workspace views: {0}")]
    InvalidViews(#[from] ViewError),
}

/// Any failure turning a workspace into a payload or back.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    #[error(transparent)]
    Encryption(#[from] EncryptionError),
    #[error(transparent)]
    Decryption(#[from] DecryptionError),
}

/// An encrypted workspace: plaintext header plus ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedWorkspace {
    #[serde(flatten)]
    header: WorkspaceHeader,
    encryption_strategy: EncryptionMetadata,
    /// Base64-encoded ciphertext.
    ciphertext: String,
}

impl EncryptedWorkspace {
    pub fn id(&self) -> i64 {
        self.header.id
    }

    pub fn name(&self) -> &str {
        &self.header.name
    }

    pub fn header(&self) -> &WorkspaceHeader {
        &self.header
    }

    pub fn encryption_strategy(&self) -> &EncryptionMetadata {
        &self.encryption_strategy
    }

    /// The algorithm that produced the ciphertext, if supported.
    pub fn algorithm(&self) -> Option<EncryptionAlgorithm> {
        self.encryption_strategy.algorithm()
    }
}

/// A parsed payload of either shape.
#[derive(Debug, Clone)]
pub enum Payload {
    Plain(Workspace),
    Encrypted(EncryptedWorkspace),
}

impl Payload {
    /// Parses a payload, telling plain documents from envelopes.
    ///
    /// An object carrying both `ciphertext` and `encryptionStrategy` is an
    /// envelope; any other object is read as a plain workspace.
    pub fn parse(text: &str) -> Result<Self, SerializationError> {
        let value: Value = serde_json::from_str(text)?;
        let object = value.as_object().ok_or(SerializationError::NotAWorkspace)?;

        if object.contains_key("ciphertext") && object.contains_key("encryptionStrategy") {
            let envelope: EncryptedWorkspace = serde_json::from_value(value)?;
            return Ok(Payload::Encrypted(envelope));
        }
        if !object.contains_key("name") {
            return Err(SerializationError::NotAWorkspace);
        }
        let workspace: Workspace = serde_json::from_value(value)?;
        workspace.model.validate()?;
        workspace.views.validate(&workspace.model)?;
        Ok(Payload::Plain(workspace))
    }

    /// Workspace id, readable without decrypting.
    pub fn id(&self) -> i64 {
        match self {
            Payload::Plain(w) => w.id(),
            Payload::Encrypted(e) => e.id(),
        }
    }

    /// Workspace name, readable without decrypting.
    pub fn name(&self) -> &str {
        match self {
            Payload::Plain(w) => w.name(),
            Payload::Encrypted(e) => e.name(),
        }
    }

    pub fn is_encrypted(&self) -> bool {
        matches!(self, Payload::Encrypted(_))
    }

    /// Resolves to a workspace, decrypting with `strategy` if needed.
    pub fn into_workspace(self, strategy: &EncryptionStrategy) -> Result<Workspace, PayloadError> {
        match self {
            Payload::Plain(workspace) => Ok(workspace),
            Payload::Encrypted(envelope) => decrypt_workspace(&envelope, strategy),
        }
    }
}

/// Serializes a workspace to compact JSON.
pub fn to_json(workspace: &Workspace) -> Result<String, SerializationError> {
    Ok(serde_json::to_string(workspace)?)
}

/// Serializes a workspace to indented JSON.
pub fn to_json_pretty(workspace: &Workspace) -> Result<String, SerializationError> {
    Ok(serde_json::to_string_pretty(workspace)?)
}

/// Parses a plain workspace document.
pub fn from_json(text: &str) -> Result<Workspace, SerializationError> {
    match Payload::parse(text)? {
        Payload::Plain(workspace) => Ok(workspace),
        Payload::Encrypted(_) => Err(SerializationError::NotAWorkspace),
    }
}

/// Parses an encrypted envelope.
pub fn envelope_from_json(text: &str) -> Result<EncryptedWorkspace, SerializationError> {
    match Payload::parse(text)? {
        Payload::Encrypted(envelope) => Ok(envelope),
        Payload::Plain(_) => Err(SerializationError::NotAWorkspace),
    }
}

/// Encrypts a workspace into an envelope.
pub fn encrypt_workspace(
    workspace: &Workspace,
    strategy: &EncryptionStrategy,
) -> Result<EncryptedWorkspace, PayloadError> {
    let plaintext = to_json(workspace)?;
    let sealed = strategy.encrypt(plaintext.as_bytes())?;
    Ok(EncryptedWorkspace {
        header: workspace.header(),
        encryption_strategy: sealed.metadata,
        ciphertext: BASE64.encode(sealed.ciphertext),
    })
}

/// Decrypts an envelope back into a workspace.
///
/// The decrypted id and name must match the envelope's plaintext header.
pub fn decrypt_workspace(
    envelope: &EncryptedWorkspace,
    strategy: &EncryptionStrategy,
) -> Result<Workspace, PayloadError> {
    let ciphertext = BASE64
        .decode(&envelope.ciphertext)
        .map_err(|e| DecryptionError::InvalidMetadata(format!("ciphertext: {}", e)))?;
    let plaintext = strategy.decrypt(&ciphertext, &envelope.encryption_strategy)?;

    let text = std::str::from_utf8(&plaintext).map_err(|_| SerializationError::NotAWorkspace)?;
    let workspace = from_json(text)?;
    if workspace.id() != envelope.id() || workspace.name() != envelope.name() {
        return Err(DecryptionError::EnvelopeMismatch.into());
    }
    Ok(workspace)
}

/// Serializes for upload: plain JSON, or envelope JSON when encrypting.
pub fn serialize(
    workspace: &Workspace,
    strategy: &EncryptionStrategy,
) -> Result<String, PayloadError> {
    if !strategy.is_enabled() {
        return Ok(to_json(workspace)?);
    }
    let envelope = encrypt_workspace(workspace, strategy)?;
    Ok(serde_json::to_string(&envelope).map_err(SerializationError::from)?)
}

/// Deserializes a downloaded payload of either shape.
pub fn deserialize(text: &str, strategy: &EncryptionStrategy) -> Result<Workspace, PayloadError> {
    Payload::parse(text)?.into_workspace(strategy)
}
