// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};

/// Tag carried by every relationship.
pub const TAG_RELATIONSHIP: &str = "Relationship";

/// A directed relationship between two model elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    id: String,
    source_id: String,
    destination_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    technology: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
}

impl Relationship {
    pub(crate) fn new(
        id: String,
        source_id: &str,
        destination_id: &str,
        description: &str,
        technology: Option<&str>,
    ) -> Self {
        Relationship {
            id,
            source_id: source_id.to_string(),
            destination_id: destination_id.to_string(),
            description: description.to_string(),
            technology: technology.map(str::to_string),
            tags: vec![TAG_RELATIONSHIP.to_string()],
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn destination_id(&self) -> &str {
        &self.destination_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn technology(&self) -> Option<&str> {
        self.technology.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns true if both ends are among the given element ids.
    pub fn connects_within(&self, ids: &[String]) -> bool {
        ids.contains(&self.source_id) && ids.contains(&self.destination_id)
    }

    /// Returns true if either end is the given element.
    pub fn touches(&self, element_id: &str) -> bool {
        self.source_id == element_id || self.destination_id == element_id
    }
}
