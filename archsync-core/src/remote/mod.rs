// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote Workspace Store
//!
//! Key-value abstraction over the workspace service, addressed by workspace
//! id. The client only needs two calls: store a payload and fetch a payload.
//!
//! - [`HttpRemoteStore`]: the HTTP API (feature `http`)
//! - [`MemoryRemoteStore`]: in-process store for tests and offline use

#[cfg(feature = "http")]
mod http;
mod memory;
pub mod signing;

#[cfg(feature = "http")]
pub use http::HttpRemoteStore;
pub use memory::MemoryRemoteStore;

use thiserror::Error;

/// Errors talking to the remote store.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The service answered with a non-success status.
    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },

    /// The request could not be sent or the response not read.
    #[cfg(feature = "http")]
    #[error("Network error: {0}")]
    Request(#[from] reqwest::Error),

    /// The store is not reachable.
    #[error("Remote store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for remote store operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Remote key-value store of serialized workspaces.
///
/// Calls are blocking: they return once the store has acknowledged the
/// request or the configured timeout expired.
pub trait RemoteStore {
    /// Stores `payload` under `workspace_id`, replacing any previous payload.
    fn put_workspace(&self, workspace_id: i64, payload: &str) -> TransportResult<()>;

    /// Fetches the payload stored under `workspace_id`, `None` if unknown.
    fn get_workspace(&self, workspace_id: i64) -> TransportResult<Option<String>>;
}

impl<S: RemoteStore + ?Sized> RemoteStore for &S {
    fn put_workspace(&self, workspace_id: i64, payload: &str) -> TransportResult<()> {
        (**self).put_workspace(workspace_id, payload)
    }

    fn get_workspace(&self, workspace_id: i64) -> TransportResult<Option<String>> {
        (**self).get_workspace(workspace_id)
    }
}

impl<S: RemoteStore + ?Sized> RemoteStore for Box<S> {
    fn put_workspace(&self, workspace_id: i64, payload: &str) -> TransportResult<()> {
        (**self).put_workspace(workspace_id, payload)
    }

    fn get_workspace(&self, workspace_id: i64) -> TransportResult<Option<String>> {
        (**self).get_workspace(workspace_id)
    }
}
