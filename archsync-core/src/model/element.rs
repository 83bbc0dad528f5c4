// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Model elements: people and software systems.

use serde::{Deserialize, Serialize};

/// Tag carried by every element.
pub const TAG_ELEMENT: &str = "Element";
/// Tag carried by people.
pub const TAG_PERSON: &str = "Person";
/// Tag carried by software systems.
pub const TAG_SOFTWARE_SYSTEM: &str = "Software System";

/// The kind of a model element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    Person,
    SoftwareSystem,
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementKind::Person => write!(f, "person"),
            ElementKind::SoftwareSystem => write!(f, "software system"),
        }
    }
}

/// Whether an element sits inside or outside the enterprise boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    #[default]
    Unspecified,
    Internal,
    External,
}

impl Location {
    fn is_unspecified(&self) -> bool {
        matches!(self, Location::Unspecified)
    }
}

/// Common read access to model elements.
pub trait Element {
    /// Returns the element's model-unique identifier.
    fn id(&self) -> &str;
    /// Returns the element's name.
    fn name(&self) -> &str;
    /// Returns the kind of element.
    fn kind(&self) -> ElementKind;
    /// Returns the element's description.
    fn description(&self) -> &str;
    /// Returns the element's tags.
    fn tags(&self) -> &[String];
}

/// A person using the modelled software systems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "Location::is_unspecified")]
    location: Location,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
}

impl Person {
    pub(crate) fn new(id: String, name: &str, description: &str) -> Self {
        Person {
            id,
            name: name.to_string(),
            description: description.to_string(),
            location: Location::Unspecified,
            tags: vec![TAG_ELEMENT.to_string(), TAG_PERSON.to_string()],
        }
    }

    /// Returns the location.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Sets the location.
    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    /// Adds a tag unless already present.
    pub fn add_tag(&mut self, tag: &str) {
        add_tag(&mut self.tags, tag);
    }
}

impl Element for Person {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Person
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// A software system in the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareSystem {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "Location::is_unspecified")]
    location: Location,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
}

impl SoftwareSystem {
    pub(crate) fn new(id: String, name: &str, description: &str) -> Self {
        SoftwareSystem {
            id,
            name: name.to_string(),
            description: description.to_string(),
            location: Location::Unspecified,
            tags: vec![TAG_ELEMENT.to_string(), TAG_SOFTWARE_SYSTEM.to_string()],
        }
    }

    /// Returns the location.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Sets the location.
    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    /// Adds a tag unless already present.
    pub fn add_tag(&mut self, tag: &str) {
        add_tag(&mut self.tags, tag);
    }
}

impl Element for SoftwareSystem {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ElementKind {
        ElementKind::SoftwareSystem
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Borrowed handle to any element in a model.
#[derive(Debug, Clone, Copy)]
pub enum ElementRef<'a> {
    Person(&'a Person),
    SoftwareSystem(&'a SoftwareSystem),
}

impl ElementRef<'_> {
    /// Returns the element's id.
    pub fn id(&self) -> &str {
        match self {
            ElementRef::Person(p) => p.id(),
            ElementRef::SoftwareSystem(s) => s.id(),
        }
    }

    /// Returns the element's name.
    pub fn name(&self) -> &str {
        match self {
            ElementRef::Person(p) => p.name(),
            ElementRef::SoftwareSystem(s) => s.name(),
        }
    }

    /// Returns the element's kind.
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementRef::Person(_) => ElementKind::Person,
            ElementRef::SoftwareSystem(_) => ElementKind::SoftwareSystem,
        }
    }
}

fn add_tag(tags: &mut Vec<String>, tag: &str) {
    let tag = tag.trim();
    if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
        tags.push(tag.to_string());
    }
}
