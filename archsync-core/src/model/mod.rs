// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Architecture Model
//!
//! The model graph of a workspace: people, software systems and the
//! relationships between them.
//!
//! Elements and relationships share one id space. Ids are assigned by the
//! model as increasing decimal strings, so every element and relationship is
//! addressable by its id alone. Element names are unique per element kind.

mod element;
mod relationship;

pub use element::{
    Element, ElementKind, ElementRef, Location, Person, SoftwareSystem, TAG_ELEMENT, TAG_PERSON,
    TAG_SOFTWARE_SYSTEM,
};
pub use relationship::{Relationship, TAG_RELATIONSHIP};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Model construction and validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ModelError {
    #[error("Element name cannot be empty")]
    EmptyName,
    #[error("A {kind} named '{name}' already exists")]
    DuplicateElement { kind: ElementKind, name: String },
    #[error("Unknown element: {0}")]
    UnknownElement(String),
    #[error("Relationship '{description}' from {source_id} to {destination_id} already exists")]
    DuplicateRelationship {
        source_id: String,
        destination_id: String,
        description: String,
    },
    #[error("Element cannot have a relationship with itself: {0}")]
    SelfRelationship(String),
    #[error("Duplicate id in model: {0}")]
    DuplicateId(String),
    #[error("No free element id left")]
    IdsExhausted,
}

/// The architecture model of a workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    people: Vec<Person>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    software_systems: Vec<SoftwareSystem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    relationships: Vec<Relationship>,
}

impl Model {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a person.
    pub fn add_person(&mut self, name: &str, description: &str) -> Result<&Person, ModelError> {
        self.check_new_element(ElementKind::Person, name)?;
        let id = self.next_id()?;
        self.people.push(Person::new(id, name.trim(), description));
        Ok(&self.people[self.people.len() - 1])
    }

    /// Adds a software system.
    pub fn add_software_system(
        &mut self,
        name: &str,
        description: &str,
    ) -> Result<&SoftwareSystem, ModelError> {
        self.check_new_element(ElementKind::SoftwareSystem, name)?;
        let id = self.next_id()?;
        self.software_systems
            .push(SoftwareSystem::new(id, name.trim(), description));
        Ok(&self.software_systems[self.software_systems.len() - 1])
    }

    /// Adds a relationship between two existing elements.
    pub fn add_relationship(
        &mut self,
        source_id: &str,
        destination_id: &str,
        description: &str,
        technology: Option<&str>,
    ) -> Result<&Relationship, ModelError> {
        for id in [source_id, destination_id] {
            if self.element(id).is_none() {
                return Err(ModelError::UnknownElement(id.to_string()));
            }
        }
        if source_id == destination_id {
            return Err(ModelError::SelfRelationship(source_id.to_string()));
        }
        if self.relationships.iter().any(|r| {
            r.source_id() == source_id
                && r.destination_id() == destination_id
                && r.description() == description
        }) {
            return Err(ModelError::DuplicateRelationship {
                source_id: source_id.to_string(),
                destination_id: destination_id.to_string(),
                description: description.to_string(),
            });
        }

        let id = self.next_id()?;
        self.relationships.push(Relationship::new(
            id,
            source_id,
            destination_id,
            description,
            technology,
        ));
        Ok(&self.relationships[self.relationships.len() - 1])
    }

    /// Adds a "uses" style relationship without technology.
    pub fn uses(
        &mut self,
        source_id: &str,
        destination_id: &str,
        description: &str,
    ) -> Result<&Relationship, ModelError> {
        self.add_relationship(source_id, destination_id, description, None)
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn software_systems(&self) -> &[SoftwareSystem] {
        &self.software_systems
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Finds a person by name.
    pub fn person(&self, name: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.name() == name)
    }

    /// Finds a software system by name.
    pub fn software_system(&self, name: &str) -> Option<&SoftwareSystem> {
        self.software_systems.iter().find(|s| s.name() == name)
    }

    /// Mutable access to a person, by id.
    pub fn person_mut(&mut self, id: &str) -> Option<&mut Person> {
        self.people.iter_mut().find(|p| p.id() == id)
    }

    /// Mutable access to a software system, by id.
    pub fn software_system_mut(&mut self, id: &str) -> Option<&mut SoftwareSystem> {
        self.software_systems.iter_mut().find(|s| s.id() == id)
    }

    /// Finds any element by id.
    pub fn element(&self, id: &str) -> Option<ElementRef<'_>> {
        if let Some(p) = self.people.iter().find(|p| p.id() == id) {
            return Some(ElementRef::Person(p));
        }
        self.software_systems
            .iter()
            .find(|s| s.id() == id)
            .map(ElementRef::SoftwareSystem)
    }

    /// Iterates over every element, people first.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.people
            .iter()
            .map(ElementRef::Person)
            .chain(self.software_systems.iter().map(ElementRef::SoftwareSystem))
    }

    /// Finds a relationship by id.
    pub fn relationship(&self, id: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.id() == id)
    }

    /// Returns relationships from `source_id` to `destination_id`.
    pub fn relationships_between(&self, source_id: &str, destination_id: &str) -> Vec<&Relationship> {
        self.relationships
            .iter()
            .filter(|r| r.source_id() == source_id && r.destination_id() == destination_id)
            .collect()
    }

    /// Returns true if the model holds an element with the same id, kind and name.
    pub fn contains<E: Element>(&self, element: &E) -> bool {
        self.element(element.id())
            .map(|e| e.kind() == element.kind() && e.name() == element.name())
            .unwrap_or(false)
    }

    /// Checks the addressing invariants of a model that was not built
    /// through this API (e.g. one read from JSON).
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut ids = HashSet::new();
        let all_ids = self
            .people
            .iter()
            .map(|p| p.id())
            .chain(self.software_systems.iter().map(|s| s.id()))
            .chain(self.relationships.iter().map(|r| r.id()));
        for id in all_ids {
            if !ids.insert(id) {
                return Err(ModelError::DuplicateId(id.to_string()));
            }
        }

        for r in &self.relationships {
            for end in [r.source_id(), r.destination_id()] {
                if self.element(end).is_none() {
                    return Err(ModelError::UnknownElement(end.to_string()));
                }
            }
        }
        Ok(())
    }

    /// Total number of elements.
    pub fn element_count(&self) -> usize {
        self.people.len() + self.software_systems.len()
    }

    fn check_new_element(&self, kind: ElementKind, name: &str) -> Result<(), ModelError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ModelError::EmptyName);
        }
        let exists = match kind {
            ElementKind::Person => self.person(name).is_some(),
            ElementKind::SoftwareSystem => self.software_system(name).is_some(),
        };
        if exists {
            return Err(ModelError::DuplicateElement {
                kind,
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Next free id. Derived from existing ids so that models read from
    /// JSON keep allocating without collisions.
    fn next_id(&self) -> Result<String, ModelError> {
        let max = self
            .people
            .iter()
            .map(|p| p.id())
            .chain(self.software_systems.iter().map(|s| s.id()))
            .chain(self.relationships.iter().map(|r| r.id()))
            .filter_map(|id| id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        max.checked_add(1)
            .map(|id| id.to_string())
            .ok_or(ModelError::IdsExhausted)
    }
}
