// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Workspace Document
//!
//! The unit of synchronization: an architecture model plus its views,
//! identified by a numeric id chosen by the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Model;
use crate::view::ViewSet;

/// Workspace-level errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum WorkspaceError {
    #[error("Workspace already has id {current}, cannot reassign to {requested}")]
    IdAlreadyAssigned { current: i64, requested: i64 },
    #[error("Workspace id must be positive, got {0}")]
    InvalidId(i64),
}

/// A software architecture workspace.
///
/// `model` and `views` are public so that views can be built against the
/// model while both are borrowed from the same workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(default)]
    id: i64,
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    revision: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_modified_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_modified_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_modified_agent: Option<String>,
    #[serde(default)]
    pub model: Model,
    #[serde(default)]
    pub views: ViewSet,
}

impl Workspace {
    /// Creates an empty workspace without an id.
    pub fn new(name: &str, description: &str) -> Self {
        Workspace {
            id: 0,
            name: name.to_string(),
            description: description.to_string(),
            revision: None,
            last_modified_date: None,
            last_modified_user: None,
            last_modified_agent: None,
            model: Model::new(),
            views: ViewSet::new(),
        }
    }

    /// Creates an empty workspace with an id.
    pub fn with_id(id: i64, name: &str, description: &str) -> Result<Self, WorkspaceError> {
        let mut workspace = Self::new(name, description);
        workspace.assign_id(id)?;
        Ok(workspace)
    }

    /// Returns the id, or 0 if none has been assigned.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Assigns the id. Once assigned, the id can only be "reassigned" to the
    /// same value.
    pub fn assign_id(&mut self, id: i64) -> Result<(), WorkspaceError> {
        if id <= 0 {
            return Err(WorkspaceError::InvalidId(id));
        }
        if self.id != 0 && self.id != id {
            return Err(WorkspaceError::IdAlreadyAssigned {
                current: self.id,
                requested: id,
            });
        }
        self.id = id;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    pub fn revision(&self) -> Option<u64> {
        self.revision
    }

    pub fn last_modified_date(&self) -> Option<DateTime<Utc>> {
        self.last_modified_date
    }

    pub fn last_modified_user(&self) -> Option<&str> {
        self.last_modified_user.as_deref()
    }

    pub fn last_modified_agent(&self) -> Option<&str> {
        self.last_modified_agent.as_deref()
    }

    /// Stamps last-modified metadata before upload.
    pub(crate) fn touch(&mut self, when: DateTime<Utc>, user: Option<&str>, agent: &str) {
        self.last_modified_date = Some(when);
        self.last_modified_user = user.map(str::to_string);
        self.last_modified_agent = Some(agent.to_string());
    }

    /// Plaintext header fields copied onto an encrypted envelope.
    pub(crate) fn header(&self) -> WorkspaceHeader {
        WorkspaceHeader {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            revision: self.revision,
            last_modified_date: self.last_modified_date,
            last_modified_user: self.last_modified_user.clone(),
            last_modified_agent: self.last_modified_agent.clone(),
        }
    }
}

/// The unencrypted identifying fields of a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceHeader {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_agent: Option<String>,
}
