// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! XChaCha20-Poly1305 with an Argon2id derived key.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use ring::rand::{SecureRandom, SystemRandom};

use super::kdf::{derive_key_argon2id, Argon2Cost};
use super::{DecryptionError, EncryptionError, EncryptionMetadata, Sealed, XChaCha20Parameters};

/// Salt size (128 bits).
const SALT_SIZE: usize = 16;
/// Nonce size for XChaCha20-Poly1305 (192 bits = 24 bytes).
const NONCE_SIZE: usize = 24;
/// Authentication tag size.
const TAG_SIZE: usize = 16;

pub(super) fn seal(
    passphrase: &[u8],
    cost: Argon2Cost,
    plaintext: &[u8],
) -> Result<Sealed, EncryptionError> {
    let rng = SystemRandom::new();

    let mut salt = [0u8; SALT_SIZE];
    rng.fill(&mut salt).map_err(|_| EncryptionError::Rng)?;
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rng.fill(&mut nonce_bytes)
        .map_err(|_| EncryptionError::Rng)?;

    let key = derive_key_argon2id(passphrase, &salt, cost)?;
    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());
    let ciphertext = cipher
        .encrypt(XNonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|_| EncryptionError::EncryptionFailed)?;

    Ok(Sealed {
        ciphertext,
        metadata: EncryptionMetadata::XChaCha20(XChaCha20Parameters {
            memory_cost: cost.memory_kib,
            time_cost: cost.iterations,
            parallelism: cost.parallelism,
            salt: hex::encode(salt),
            nonce: BASE64.encode(nonce_bytes),
        }),
    })
}

pub(super) fn open(
    passphrase: &[u8],
    params: &XChaCha20Parameters,
    ciphertext: &[u8],
) -> Result<Vec<u8>, DecryptionError> {
    let cost = Argon2Cost {
        memory_kib: params.memory_cost,
        iterations: params.time_cost,
        parallelism: params.parallelism,
    };
    cost.check_bounds()
        .map_err(|e| DecryptionError::InvalidMetadata(e.to_string()))?;

    let salt = hex::decode(&params.salt)
        .map_err(|e| DecryptionError::InvalidMetadata(format!("salt: {}", e)))?;
    let nonce_bytes = BASE64
        .decode(&params.nonce)
        .map_err(|e| DecryptionError::InvalidMetadata(format!("nonce: {}", e)))?;
    if nonce_bytes.len() != NONCE_SIZE {
        return Err(DecryptionError::InvalidMetadata("nonce: wrong length".into()));
    }

    if ciphertext.len() < TAG_SIZE {
        return Err(DecryptionError::CiphertextTooShort);
    }

    // Argon2 validates the remaining bounds (salt length, cost minimums)
    let key = derive_key_argon2id(passphrase, &salt, cost)
        .map_err(|e| DecryptionError::InvalidMetadata(e.to_string()))?;

    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());
    cipher
        .decrypt(XNonce::from_slice(&nonce_bytes), ciphertext)
        .map_err(|_| DecryptionError::WrongPassphrase)
}
