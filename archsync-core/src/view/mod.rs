// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Views
//!
//! Diagram definitions over the model. A view references model elements and
//! relationships by id and carries layout information (coordinates, vertices,
//! paper size) that the remote service lets users edit.

mod views;

pub use views::{
    ElementView, PaperSize, RelationshipView, SystemContextView, SystemLandscapeView, Vertex, View,
};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{ElementKind, Model};

/// View construction errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ViewError {
    #[error("View key cannot be empty")]
    EmptyKey,
    #[error("A view with key '{0}' already exists")]
    DuplicateKey(String),
    #[error("Unknown software system: {0}")]
    UnknownSoftwareSystem(String),
    #[error("View '{view}' references unknown element {id}")]
    UnknownElement { view: String, id: String },
    #[error("View '{view}' references unknown relationship {id}")]
    UnknownRelationship { view: String, id: String },
}

/// All views of a workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSet {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    system_landscape_views: Vec<SystemLandscapeView>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    system_context_views: Vec<SystemContextView>,
}

impl ViewSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a system context view for an existing software system.
    pub fn create_system_context_view(
        &mut self,
        model: &Model,
        software_system_id: &str,
        key: &str,
        description: &str,
    ) -> Result<&mut SystemContextView, ViewError> {
        let is_system = model
            .element(software_system_id)
            .map(|e| e.kind() == ElementKind::SoftwareSystem)
            .unwrap_or(false);
        if !is_system {
            return Err(ViewError::UnknownSoftwareSystem(
                software_system_id.to_string(),
            ));
        }
        self.check_key(key)?;

        self.system_context_views
            .push(SystemContextView::new(software_system_id, key, description));
        let last = self.system_context_views.len() - 1;
        Ok(&mut self.system_context_views[last])
    }

    /// Creates a system landscape view.
    pub fn create_system_landscape_view(
        &mut self,
        key: &str,
        description: &str,
    ) -> Result<&mut SystemLandscapeView, ViewError> {
        self.check_key(key)?;
        self.system_landscape_views
            .push(SystemLandscapeView::new(key, description));
        let last = self.system_landscape_views.len() - 1;
        Ok(&mut self.system_landscape_views[last])
    }

    pub fn system_context_views(&self) -> &[SystemContextView] {
        &self.system_context_views
    }

    pub fn system_landscape_views(&self) -> &[SystemLandscapeView] {
        &self.system_landscape_views
    }

    /// Iterates over every view.
    pub fn views(&self) -> impl Iterator<Item = &dyn View> {
        self.system_landscape_views
            .iter()
            .map(|v| v as &dyn View)
            .chain(self.system_context_views.iter().map(|v| v as &dyn View))
    }

    /// Finds a view by key.
    pub fn view(&self, key: &str) -> Option<&dyn View> {
        self.views().find(|v| v.key() == key)
    }

    /// Finds a view by key for editing.
    pub fn view_mut(&mut self, key: &str) -> Option<&mut dyn View> {
        if let Some(view) = self
            .system_landscape_views
            .iter_mut()
            .find(|v| v.key() == key)
        {
            return Some(view as &mut dyn View);
        }
        self.system_context_views
            .iter_mut()
            .find(|v| v.key() == key)
            .map(|v| v as &mut dyn View)
    }

    /// Total number of views.
    pub fn len(&self) -> usize {
        self.system_landscape_views.len() + self.system_context_views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies layout information from views with the same key and kind.
    ///
    /// Used when merging with the remote version of a workspace so that
    /// diagram layouts edited on the service survive an upload.
    pub fn copy_layout_information_from(&mut self, source: &ViewSet) {
        for view in &mut self.system_landscape_views {
            if let Some(src) = source
                .system_landscape_views
                .iter()
                .find(|v| v.key() == view.key())
            {
                view.copy_layout_information_from(src);
            }
        }
        for view in &mut self.system_context_views {
            if let Some(src) = source
                .system_context_views
                .iter()
                .find(|v| v.key() == view.key())
            {
                view.copy_layout_information_from(src);
            }
        }
    }

    /// Checks a view set read from JSON against its model: keys are
    /// non-empty and unique, every referenced element and relationship
    /// exists, and context views focus on a software system.
    pub fn validate(&self, model: &Model) -> Result<(), ViewError> {
        let mut keys = HashSet::new();
        for view in self.views() {
            if view.key().trim().is_empty() {
                return Err(ViewError::EmptyKey);
            }
            if !keys.insert(view.key()) {
                return Err(ViewError::DuplicateKey(view.key().to_string()));
            }
            for element in view.element_views() {
                if model.element(&element.id).is_none() {
                    return Err(ViewError::UnknownElement {
                        view: view.key().to_string(),
                        id: element.id.clone(),
                    });
                }
            }
            for relationship in view.relationship_views() {
                if model.relationship(&relationship.id).is_none() {
                    return Err(ViewError::UnknownRelationship {
                        view: view.key().to_string(),
                        id: relationship.id.clone(),
                    });
                }
            }
        }

        for view in &self.system_context_views {
            let focus = view.software_system_id();
            let is_system = model
                .element(focus)
                .map(|e| e.kind() == ElementKind::SoftwareSystem)
                .unwrap_or(false);
            if !is_system {
                return Err(ViewError::UnknownSoftwareSystem(focus.to_string()));
            }
        }
        Ok(())
    }

    fn check_key(&self, key: &str) -> Result<(), ViewError> {
        if key.trim().is_empty() {
            return Err(ViewError::EmptyKey);
        }
        if self.view(key).is_some() {
            return Err(ViewError::DuplicateKey(key.to_string()));
        }
        Ok(())
    }
}
