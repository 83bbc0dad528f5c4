// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Password-Based Key Derivation
//!
//! PBKDF2-HMAC-SHA256 feeds the AES strategy, Argon2id the XChaCha20 one.
//! Both produce a 256-bit key that is zeroized on drop.

use ring::pbkdf2;
use std::num::NonZeroU32;
use zeroize::Zeroize;

/// Default PBKDF2 iterations.
pub const PBKDF2_DEFAULT_ITERATIONS: u32 = 100_000;
/// Upper bound accepted from envelope metadata.
pub const PBKDF2_MAX_ITERATIONS: u32 = 10_000_000;

/// Argon2id memory cost in KiB (64 MB).
pub const ARGON2_DEFAULT_M_COST: u32 = 65536;
/// Argon2id time cost (iterations).
pub const ARGON2_DEFAULT_T_COST: u32 = 3;
/// Argon2id parallelism.
pub const ARGON2_DEFAULT_P_COST: u32 = 4;
/// Upper bound on memory cost accepted from envelope metadata (1 GiB).
pub const ARGON2_MAX_M_COST: u32 = 1024 * 1024;
/// Upper bound on time cost accepted from envelope metadata.
pub const ARGON2_MAX_T_COST: u32 = 64;
/// Upper bound on parallelism accepted from envelope metadata.
pub const ARGON2_MAX_P_COST: u32 = 64;

/// 256-bit symmetric key.
pub struct SymmetricKey {
    bytes: [u8; 32],
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

impl Drop for SymmetricKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl SymmetricKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Cost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for Argon2Cost {
    fn default() -> Self {
        Argon2Cost {
            memory_kib: ARGON2_DEFAULT_M_COST,
            iterations: ARGON2_DEFAULT_T_COST,
            parallelism: ARGON2_DEFAULT_P_COST,
        }
    }
}

impl Argon2Cost {
    /// Checks the cost against the bounds accepted from envelope metadata.
    pub fn check_bounds(&self) -> Result<(), PasswordKdfError> {
        if self.memory_kib > ARGON2_MAX_M_COST {
            return Err(PasswordKdfError::CostOutOfRange(format!(
                "memory cost too large: {} KiB",
                self.memory_kib
            )));
        }
        if self.iterations > ARGON2_MAX_T_COST {
            return Err(PasswordKdfError::CostOutOfRange(format!(
                "time cost too large: {}",
                self.iterations
            )));
        }
        if self.parallelism > ARGON2_MAX_P_COST {
            return Err(PasswordKdfError::CostOutOfRange(format!(
                "parallelism too large: {}",
                self.parallelism
            )));
        }
        Ok(())
    }
}

/// Derives a key with PBKDF2-HMAC-SHA256.
pub fn derive_key_pbkdf2(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
) -> Result<SymmetricKey, PasswordKdfError> {
    let iterations = NonZeroU32::new(iterations).ok_or(PasswordKdfError::DerivationFailed(
        "iterations must be non-zero".into(),
    ))?;

    let mut key_bytes = [0u8; 32];
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        salt,
        password,
        &mut key_bytes,
    );

    let key = SymmetricKey { bytes: key_bytes };
    key_bytes.zeroize();
    Ok(key)
}

/// Derives a key with Argon2id.
pub fn derive_key_argon2id(
    password: &[u8],
    salt: &[u8],
    cost: Argon2Cost,
) -> Result<SymmetricKey, PasswordKdfError> {
    let params = argon2::Params::new(cost.memory_kib, cost.iterations, cost.parallelism, Some(32))
        .map_err(|e| PasswordKdfError::DerivationFailed(e.to_string()))?;

    let argon2 = argon2::Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let mut key_bytes = [0u8; 32];
    argon2
        .hash_password_into(password, salt, &mut key_bytes)
        .map_err(|e| PasswordKdfError::DerivationFailed(e.to_string()))?;

    let key = SymmetricKey { bytes: key_bytes };
    key_bytes.zeroize();
    Ok(key)
}

/// Password KDF error types.
#[derive(Debug, thiserror::Error)]
pub enum PasswordKdfError {
    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),
    #[error("Cost parameter out of range: {0}")]
    CostOutOfRange(String),
}
