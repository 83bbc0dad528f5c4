// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! AES-256-GCM with a PBKDF2-HMAC-SHA256 derived key.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};
use ring::rand::{SecureRandom, SystemRandom};

use super::kdf::{derive_key_pbkdf2, PBKDF2_MAX_ITERATIONS};
use super::{AesParameters, DecryptionError, EncryptionError, EncryptionMetadata, Sealed};

/// Key size recorded in metadata, in bits.
const KEY_SIZE_BITS: u32 = 256;
/// Salt size (128 bits).
const SALT_SIZE: usize = 16;
/// Nonce size for AES-256-GCM (96 bits = 12 bytes).
const NONCE_SIZE: usize = 12;

pub(super) fn seal(
    passphrase: &[u8],
    iterations: u32,
    plaintext: &[u8],
) -> Result<Sealed, EncryptionError> {
    let rng = SystemRandom::new();

    let mut salt = [0u8; SALT_SIZE];
    rng.fill(&mut salt).map_err(|_| EncryptionError::Rng)?;
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rng.fill(&mut nonce_bytes)
        .map_err(|_| EncryptionError::Rng)?;

    let key = derive_key_pbkdf2(passphrase, &salt, iterations)?;
    let unbound_key =
        UnboundKey::new(&AES_256_GCM, key.as_bytes()).map_err(|_| EncryptionError::EncryptionFailed)?;
    let sealing_key = LessSafeKey::new(unbound_key);

    let mut in_out = plaintext.to_vec();
    sealing_key
        .seal_in_place_append_tag(
            Nonce::assume_unique_for_key(nonce_bytes),
            Aad::empty(),
            &mut in_out,
        )
        .map_err(|_| EncryptionError::EncryptionFailed)?;

    Ok(Sealed {
        ciphertext: in_out,
        metadata: EncryptionMetadata::Aes(AesParameters {
            key_size: KEY_SIZE_BITS,
            iteration_count: iterations,
            salt: hex::encode(salt),
            iv: BASE64.encode(nonce_bytes),
        }),
    })
}

pub(super) fn open(
    passphrase: &[u8],
    params: &AesParameters,
    ciphertext: &[u8],
) -> Result<Vec<u8>, DecryptionError> {
    if params.key_size != KEY_SIZE_BITS {
        return Err(DecryptionError::InvalidMetadata(format!(
            "unsupported key size {}",
            params.key_size
        )));
    }
    if params.iteration_count == 0 || params.iteration_count > PBKDF2_MAX_ITERATIONS {
        return Err(DecryptionError::InvalidMetadata(format!(
            "iteration count out of range: {}",
            params.iteration_count
        )));
    }

    let salt = hex::decode(&params.salt)
        .map_err(|e| DecryptionError::InvalidMetadata(format!("salt: {}", e)))?;
    if salt.is_empty() {
        return Err(DecryptionError::InvalidMetadata("salt: empty".into()));
    }
    let nonce_bytes: [u8; NONCE_SIZE] = BASE64
        .decode(&params.iv)
        .map_err(|e| DecryptionError::InvalidMetadata(format!("iv: {}", e)))?
        .try_into()
        .map_err(|_| DecryptionError::InvalidMetadata("iv: wrong length".into()))?;

    if ciphertext.len() < AES_256_GCM.tag_len() {
        return Err(DecryptionError::CiphertextTooShort);
    }

    let key = derive_key_pbkdf2(passphrase, &salt, params.iteration_count)
        .map_err(|e| DecryptionError::InvalidMetadata(e.to_string()))?;
    let unbound_key = UnboundKey::new(&AES_256_GCM, key.as_bytes())
        .map_err(|_| DecryptionError::WrongPassphrase)?;
    let opening_key = LessSafeKey::new(unbound_key);

    let mut buffer = ciphertext.to_vec();
    let plaintext = opening_key
        .open_in_place(
            Nonce::assume_unique_for_key(nonce_bytes),
            Aad::empty(),
            &mut buffer,
        )
        .map_err(|_| DecryptionError::WrongPassphrase)?;

    Ok(plaintext.to_vec())
}
