// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Request Signing
//!
//! Each API request is authenticated with the API key and an HMAC-SHA256
//! over a canonical description of the request, keyed with the API secret:
//!
//! ```text
//! METHOD \n path \n sha256(body) hex \n content type \n nonce \n
//! ```
//!
//! The `X-Authorization` header carries `{api_key}:{base64(hex(hmac))}`.
//! The nonce must increase between requests; a millisecond timestamp is used.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ring::digest::{digest, SHA256};
use ring::hmac;
use zeroize::Zeroizing;

/// Header carrying key and signature.
pub const AUTHORIZATION_HEADER: &str = "X-Authorization";
/// Header carrying the request nonce.
pub const NONCE_HEADER: &str = "Nonce";
/// Header carrying the hex SHA-256 of the body.
pub const CONTENT_HASH_HEADER: &str = "Content-SHA256";
/// Content type of workspace payloads.
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=UTF-8";

/// Headers to attach to a signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub authorization: String,
    pub nonce: String,
    pub content_hash: String,
}

/// Signs requests with an API key and secret.
pub struct RequestSigner {
    api_key: String,
    api_secret: Zeroizing<String>,
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

impl RequestSigner {
    pub fn new(api_key: &str, api_secret: &str) -> Self {
        RequestSigner {
            api_key: api_key.to_string(),
            api_secret: Zeroizing::new(api_secret.to_string()),
        }
    }

    /// Signs a request. `content_type` is empty for bodiless requests.
    pub fn sign(
        &self,
        method: &str,
        path: &str,
        body: &str,
        content_type: &str,
        nonce: &str,
    ) -> SignedHeaders {
        let content_hash = hex::encode(digest(&SHA256, body.as_bytes()));
        let canonical = canonical_request(method, path, &content_hash, content_type, nonce);

        let key = hmac::Key::new(hmac::HMAC_SHA256, self.api_secret.as_bytes());
        let tag = hmac::sign(&key, canonical.as_bytes());
        let signature = BASE64.encode(hex::encode(tag.as_ref()));

        SignedHeaders {
            authorization: format!("{}:{}", self.api_key, signature),
            nonce: nonce.to_string(),
            content_hash,
        }
    }
}

fn canonical_request(
    method: &str,
    path: &str,
    content_hash: &str,
    content_type: &str,
    nonce: &str,
) -> String {
    format!(
        "{}\n{}\n{}\n{}\n{}\n",
        method, path, content_hash, content_type, nonce
    )
}
