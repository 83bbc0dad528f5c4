// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Client-Side Encryption
//!
//! Password-based encryption of serialized workspaces. The strategy is a
//! plain enum selected by configuration:
//!
//! - `None`: payloads are sent as plain JSON.
//! - `PasswordBased` with one of two algorithms:
//!   - `aes`: PBKDF2-HMAC-SHA256 + AES-256-GCM
//!   - `xchacha20`: Argon2id + XChaCha20-Poly1305
//!
//! Every call to `encrypt` uses a fresh random salt and nonce. Those, plus the
//! KDF cost parameters, are returned as [`EncryptionMetadata`] and travel in
//! the envelope next to the ciphertext, so decryption only needs the
//! passphrase.

mod aes;
pub mod kdf;
mod xchacha;

pub use kdf::{Argon2Cost, PasswordKdfError, SymmetricKey};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Errors raised while encrypting.
#[derive(Error, Debug)]
pub enum EncryptionError {
    #[error("No encryption strategy configured")]
    NotConfigured,
    #[error("Random number generation failed")]
    Rng,
    #[error("Encryption failed")]
    EncryptionFailed,
    #[error("Key derivation failed: {0}")]
    Kdf(#[from] PasswordKdfError),
}

/// Errors raised while decrypting.
///
/// Kept apart from serialization errors so callers can tell "wrong key"
/// from "corrupt data".
#[derive(Error, Debug)]
pub enum DecryptionError {
    #[error("Decryption failed: wrong passphrase or corrupted ciphertext")]
    WrongPassphrase,
    #[error("Workspace is encrypted with {found}, but {expected} is configured")]
    AlgorithmMismatch {
        expected: EncryptionAlgorithm,
        found: EncryptionAlgorithm,
    },
    #[error("Workspace is encrypted but no passphrase is configured")]
    MissingPassphrase,
    #[error("Unsupported encryption algorithm in envelope")]
    UnsupportedAlgorithm,
    #[error("Invalid encryption metadata: {0}")]
    InvalidMetadata(String),
    #[error("Ciphertext too short")]
    CiphertextTooShort,
    #[error("Decrypted workspace does not match the envelope header")]
    EnvelopeMismatch,
}

/// Supported password-based algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncryptionAlgorithm {
    /// PBKDF2-HMAC-SHA256 + AES-256-GCM.
    Aes,
    /// Argon2id + XChaCha20-Poly1305.
    XChaCha20,
}

impl EncryptionAlgorithm {
    /// Identifier used in envelope metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            EncryptionAlgorithm::Aes => "aes",
            EncryptionAlgorithm::XChaCha20 => "xchacha20",
        }
    }
}

impl std::fmt::Display for EncryptionAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EncryptionAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aes" => Ok(EncryptionAlgorithm::Aes),
            "xchacha20" => Ok(EncryptionAlgorithm::XChaCha20),
            other => Err(format!("unknown encryption algorithm: {}", other)),
        }
    }
}

/// AES parameters stored in the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AesParameters {
    pub key_size: u32,
    pub iteration_count: u32,
    /// Hex-encoded PBKDF2 salt.
    pub salt: String,
    /// Base64-encoded GCM nonce.
    pub iv: String,
}

/// XChaCha20 parameters stored in the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XChaCha20Parameters {
    /// Argon2id memory cost in KiB.
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
    /// Hex-encoded Argon2id salt.
    pub salt: String,
    /// Base64-encoded 24-byte nonce.
    pub nonce: String,
}

/// Encryption metadata: algorithm id plus its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EncryptionMetadata {
    #[serde(rename = "aes")]
    Aes(AesParameters),
    #[serde(rename = "xchacha20")]
    XChaCha20(XChaCha20Parameters),
    /// Any algorithm id this library does not know.
    #[serde(other)]
    Unsupported,
}

impl EncryptionMetadata {
    /// Returns the algorithm, if supported.
    pub fn algorithm(&self) -> Option<EncryptionAlgorithm> {
        match self {
            EncryptionMetadata::Aes(_) => Some(EncryptionAlgorithm::Aes),
            EncryptionMetadata::XChaCha20(_) => Some(EncryptionAlgorithm::XChaCha20),
            EncryptionMetadata::Unsupported => None,
        }
    }
}

/// Ciphertext plus the metadata needed to decrypt it.
#[derive(Debug, Clone)]
pub struct Sealed {
    pub ciphertext: Vec<u8>,
    pub metadata: EncryptionMetadata,
}

/// A passphrase, zeroized on drop and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Passphrase(String);

impl Passphrase {
    pub fn new(passphrase: &str) -> Self {
        Passphrase(passphrase.to_string())
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Passphrase([REDACTED])")
    }
}

/// Password-based encryption settings.
#[derive(Debug, Clone)]
pub struct PasswordBased {
    algorithm: EncryptionAlgorithm,
    passphrase: Passphrase,
    pbkdf2_iterations: u32,
    argon2_cost: Argon2Cost,
}

impl PasswordBased {
    /// Creates settings with default KDF costs.
    pub fn new(algorithm: EncryptionAlgorithm, passphrase: &str) -> Self {
        PasswordBased {
            algorithm,
            passphrase: Passphrase::new(passphrase),
            pbkdf2_iterations: kdf::PBKDF2_DEFAULT_ITERATIONS,
            argon2_cost: Argon2Cost::default(),
        }
    }

    /// Sets the PBKDF2 iteration count used by the AES algorithm.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.pbkdf2_iterations = iterations;
        self
    }

    /// Sets the Argon2id cost used by the XChaCha20 algorithm.
    pub fn with_argon2_cost(mut self, cost: Argon2Cost) -> Self {
        self.argon2_cost = cost;
        self
    }

    pub fn algorithm(&self) -> EncryptionAlgorithm {
        self.algorithm
    }
}

/// How workspaces are encrypted before upload.
#[derive(Debug, Clone, Default)]
pub enum EncryptionStrategy {
    #[default]
    None,
    PasswordBased(PasswordBased),
}

impl From<PasswordBased> for EncryptionStrategy {
    fn from(settings: PasswordBased) -> Self {
        EncryptionStrategy::PasswordBased(settings)
    }
}

impl EncryptionStrategy {
    /// AES-256-GCM with a PBKDF2 derived key.
    pub fn aes(passphrase: &str) -> Self {
        PasswordBased::new(EncryptionAlgorithm::Aes, passphrase).into()
    }

    /// XChaCha20-Poly1305 with an Argon2id derived key.
    pub fn xchacha20(passphrase: &str) -> Self {
        PasswordBased::new(EncryptionAlgorithm::XChaCha20, passphrase).into()
    }

    /// A strategy able to open envelopes carrying `metadata`.
    pub fn for_metadata(
        metadata: &EncryptionMetadata,
        passphrase: &str,
    ) -> Result<Self, DecryptionError> {
        let algorithm = metadata
            .algorithm()
            .ok_or(DecryptionError::UnsupportedAlgorithm)?;
        Ok(PasswordBased::new(algorithm, passphrase).into())
    }

    /// Returns true unless this is `None`.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, EncryptionStrategy::None)
    }

    /// Returns the configured algorithm.
    pub fn algorithm(&self) -> Option<EncryptionAlgorithm> {
        match self {
            EncryptionStrategy::None => None,
            EncryptionStrategy::PasswordBased(pb) => Some(pb.algorithm),
        }
    }

    /// Encrypts with a fresh salt and nonce.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Sealed, EncryptionError> {
        let pb = match self {
            EncryptionStrategy::None => return Err(EncryptionError::NotConfigured),
            EncryptionStrategy::PasswordBased(pb) => pb,
        };
        match pb.algorithm {
            EncryptionAlgorithm::Aes => {
                aes::seal(pb.passphrase.as_bytes(), pb.pbkdf2_iterations, plaintext)
            }
            EncryptionAlgorithm::XChaCha20 => {
                xchacha::seal(pb.passphrase.as_bytes(), pb.argon2_cost, plaintext)
            }
        }
    }

    /// Decrypts using the parameters recorded in `metadata`.
    pub fn decrypt(
        &self,
        ciphertext: &[u8],
        metadata: &EncryptionMetadata,
    ) -> Result<Vec<u8>, DecryptionError> {
        let pb = match self {
            EncryptionStrategy::None => return Err(DecryptionError::MissingPassphrase),
            EncryptionStrategy::PasswordBased(pb) => pb,
        };
        let found = metadata
            .algorithm()
            .ok_or(DecryptionError::UnsupportedAlgorithm)?;
        match metadata {
            EncryptionMetadata::Aes(params) if pb.algorithm == EncryptionAlgorithm::Aes => {
                aes::open(pb.passphrase.as_bytes(), params, ciphertext)
            }
            EncryptionMetadata::XChaCha20(params)
                if pb.algorithm == EncryptionAlgorithm::XChaCha20 =>
            {
                xchacha::open(pb.passphrase.as_bytes(), params, ciphertext)
            }
            _ => Err(DecryptionError::AlgorithmMismatch {
                expected: pb.algorithm,
                found,
            }),
        }
    }
}
