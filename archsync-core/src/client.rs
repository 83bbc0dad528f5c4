// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Workspace Client
//!
//! Uploads workspaces to a remote store and downloads them again, with
//! optional client-side encryption and a local archive of every upload.
//!
//! # Example
//!
//! ```
//! use archsync_core::{ClientConfig, MemoryRemoteStore, Workspace, WorkspaceClient};
//!
//! let client = WorkspaceClient::with_store(ClientConfig::default(), MemoryRemoteStore::new());
//!
//! let mut workspace = Workspace::new("Banking", "Internet banking system");
//! workspace.model.add_person("Customer", "A customer of the bank").unwrap();
//!
//! let receipt = client.put_workspace(42, &workspace).unwrap();
//! assert_eq!(receipt.workspace_id, 42);
//!
//! let downloaded = client.get_workspace(42).unwrap();
//! assert!(downloaded.model.person("Customer").is_some());
//! ```

use std::path::PathBuf;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::archive::WorkspaceArchive;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::remote::RemoteStore;
use crate::serialization::{self, Payload};
use crate::workspace::Workspace;

#[cfg(feature = "http")]
use crate::remote::HttpRemoteStore;

/// Outcome of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutReceipt {
    pub workspace_id: i64,
    /// Archive file written for this upload, if archiving is enabled.
    pub archived: Option<PathBuf>,
}

/// Client for a remote workspace store.
#[derive(Debug)]
pub struct WorkspaceClient<S: RemoteStore> {
    config: ClientConfig,
    store: S,
    archive: Option<WorkspaceArchive>,
}

#[cfg(feature = "http")]
impl WorkspaceClient<HttpRemoteStore> {
    /// Creates a client talking to the HTTP API in `config`.
    pub fn connect(config: ClientConfig) -> ClientResult<Self> {
        let store = HttpRemoteStore::new(&config)?;
        Ok(Self::with_store(config, store))
    }
}

impl<S: RemoteStore> WorkspaceClient<S> {
    /// Creates a client over any remote store.
    pub fn with_store(config: ClientConfig, store: S) -> Self {
        let archive = config.archive_dir.clone().map(WorkspaceArchive::new);
        Self {
            config,
            store,
            archive,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The local archive, `None` when archiving is disabled.
    pub fn archive(&self) -> Option<&WorkspaceArchive> {
        self.archive.as_ref()
    }

    /// Uploads `workspace` under `workspace_id`.
    ///
    /// The caller's workspace is left untouched; an id-stamped copy is
    /// uploaded. The uploaded bytes are archived only once the remote store
    /// has accepted them.
    pub fn put_workspace(
        &self,
        workspace_id: i64,
        workspace: &Workspace,
    ) -> ClientResult<PutReceipt> {
        let mut upload = workspace.clone();
        upload.assign_id(workspace_id)?;

        if self.config.merge_from_remote {
            self.merge_from_remote(&mut upload)?;
        }

        upload.touch(
            Utc::now(),
            self.config.user.as_deref(),
            crate::AGENT,
        );

        let payload = serialization::serialize(&upload, &self.config.encryption)?;
        debug!(
            workspace_id,
            bytes = payload.len(),
            encrypted = self.config.encryption.is_enabled(),
            "uploading workspace"
        );
        self.store.put_workspace(workspace_id, &payload)?;
        info!(workspace_id, "workspace stored");

        let archived = match &self.archive {
            Some(archive) => match archive.save(workspace_id, payload.as_bytes()) {
                Ok(path) => Some(path),
                Err(source) => {
                    warn!(workspace_id, error = %source, "workspace stored but not archived");
                    return Err(ClientError::Archive {
                        workspace_id,
                        source,
                    });
                }
            },
            None => None,
        };

        Ok(PutReceipt {
            workspace_id,
            archived,
        })
    }

    /// Downloads and decodes the workspace stored under `workspace_id`.
    pub fn get_workspace(&self, workspace_id: i64) -> ClientResult<Workspace> {
        let payload = self.get_workspace_raw(workspace_id)?;
        let workspace = serialization::deserialize(&payload, &self.config.encryption)?;
        info!(workspace_id, "workspace retrieved");
        Ok(workspace)
    }

    /// Downloads the payload stored under `workspace_id` without decoding it.
    pub fn get_workspace_raw(&self, workspace_id: i64) -> ClientResult<String> {
        debug!(workspace_id, "fetching workspace");
        self.store
            .get_workspace(workspace_id)?
            .ok_or(ClientError::NotFound(workspace_id))
    }

    /// Copies layout from the remote version into `upload`, if there is one.
    fn merge_from_remote(&self, upload: &mut Workspace) -> ClientResult<()> {
        let Some(payload) = self.store.get_workspace(upload.id())? else {
            debug!(workspace_id = upload.id(), "no remote workspace to merge");
            return Ok(());
        };

        let remote = Payload::parse(&payload)?.into_workspace(&self.config.encryption)?;
        upload.views.copy_layout_information_from(&remote.views);
        debug!(workspace_id = upload.id(), "merged layout from remote workspace");
        Ok(())
    }
}
