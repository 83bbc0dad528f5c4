// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP remote store.
//!
//! `PUT {api_url}/workspace/{id}` uploads a payload,
//! `GET {api_url}/workspace/{id}` downloads it. Both are signed with
//! [`RequestSigner`].

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use super::signing::{
    RequestSigner, AUTHORIZATION_HEADER, CONTENT_HASH_HEADER, CONTENT_TYPE_JSON, NONCE_HEADER,
};
use super::{RemoteStore, TransportError, TransportResult};
use crate::config::{ClientConfig, ConfigError};

/// Remote store backed by the workspace HTTP API.
#[derive(Debug)]
pub struct HttpRemoteStore {
    client: Client,
    api_url: Url,
    signer: RequestSigner,
    last_nonce: AtomicI64,
}

impl HttpRemoteStore {
    /// Creates a store from the client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        if !config.has_credentials() {
            return Err(ConfigError::MissingCredentials);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            signer: RequestSigner::new(&config.api_key, &config.api_secret),
            last_nonce: AtomicI64::new(0),
        })
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// URL of a workspace resource.
    pub fn workspace_url(&self, workspace_id: i64) -> TransportResult<Url> {
        let base = self.api_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{}/workspace/{}", base, workspace_id))
            .map_err(|e| TransportError::Unavailable(format!("invalid workspace URL: {}", e)))
    }

    /// Millisecond timestamp, strictly increasing per store.
    fn next_nonce(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let mut last = self.last_nonce.load(Ordering::SeqCst);
        loop {
            let next = now.max(last + 1);
            match self
                .last_nonce
                .compare_exchange(last, next, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return next.to_string(),
                Err(current) => last = current,
            }
        }
    }
}

impl RemoteStore for HttpRemoteStore {
    fn put_workspace(&self, workspace_id: i64, payload: &str) -> TransportResult<()> {
        let url = self.workspace_url(workspace_id)?;
        let headers = self.signer.sign(
            "PUT",
            url.path(),
            payload,
            CONTENT_TYPE_JSON,
            &self.next_nonce(),
        );

        debug!(%url, bytes = payload.len(), "PUT workspace");
        let response = self
            .client
            .put(url)
            .header(USER_AGENT, crate::AGENT)
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .header(AUTHORIZATION_HEADER, headers.authorization)
            .header(NONCE_HEADER, headers.nonce)
            .header(CONTENT_HASH_HEADER, headers.content_hash)
            .body(payload.to_string())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }
        Ok(())
    }

    fn get_workspace(&self, workspace_id: i64) -> TransportResult<Option<String>> {
        let url = self.workspace_url(workspace_id)?;
        let headers = self.signer.sign("GET", url.path(), "", "", &self.next_nonce());

        debug!(%url, "GET workspace");
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, crate::AGENT)
            .header(AUTHORIZATION_HEADER, headers.authorization)
            .header(NONCE_HEADER, headers.nonce)
            .header(CONTENT_HASH_HEADER, headers.content_hash)
            .send()?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }
        Ok(Some(response.text()?))
    }
}
