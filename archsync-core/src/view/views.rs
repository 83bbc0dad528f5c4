// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Concrete view types and their layout primitives.

use serde::{Deserialize, Serialize};

use crate::model::{Element, Model};

/// Paper size a view is laid out for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    #[serde(rename = "A5_Portrait")]
    A5Portrait,
    #[serde(rename = "A5_Landscape")]
    A5Landscape,
    #[serde(rename = "A4_Portrait")]
    A4Portrait,
    #[serde(rename = "A4_Landscape")]
    A4Landscape,
    #[serde(rename = "A3_Portrait")]
    A3Portrait,
    #[serde(rename = "A3_Landscape")]
    A3Landscape,
}

/// An element placed on a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementView {
    pub id: String,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

impl ElementView {
    pub fn new(id: &str) -> Self {
        ElementView {
            id: id.to_string(),
            x: 0,
            y: 0,
        }
    }
}

/// A bend point on a relationship line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: i32,
    pub y: i32,
}

/// A relationship drawn on a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipView {
    pub id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vertices: Vec<Vertex>,
}

impl RelationshipView {
    pub fn new(id: &str) -> Self {
        RelationshipView {
            id: id.to_string(),
            vertices: Vec::new(),
        }
    }
}

/// Behaviour shared by every view kind.
///
/// Implementors only expose their element and relationship lists; adding,
/// removing and layout copying are provided.
pub trait View {
    fn key(&self) -> &str;
    fn description(&self) -> &str;
    fn element_views(&self) -> &[ElementView];
    fn element_views_mut(&mut self) -> &mut Vec<ElementView>;
    fn relationship_views(&self) -> &[RelationshipView];
    fn relationship_views_mut(&mut self) -> &mut Vec<RelationshipView>;
    fn paper_size(&self) -> Option<PaperSize>;
    fn set_paper_size(&mut self, paper_size: Option<PaperSize>);

    /// Returns true if the element is on this view.
    fn contains_element(&self, element_id: &str) -> bool {
        self.element_views().iter().any(|e| e.id == element_id)
    }

    /// Returns true if the relationship is on this view.
    fn contains_relationship(&self, relationship_id: &str) -> bool {
        self.relationship_views().iter().any(|r| r.id == relationship_id)
    }

    /// Returns the element view for an element on this view.
    fn element_view(&self, element_id: &str) -> Option<&ElementView> {
        self.element_views().iter().find(|e| e.id == element_id)
    }

    /// Adds an element, then every relationship between it and elements
    /// already on the view. Unknown ids are ignored.
    fn add_element(&mut self, model: &Model, element_id: &str) {
        if model.element(element_id).is_none() || self.contains_element(element_id) {
            return;
        }
        self.element_views_mut().push(ElementView::new(element_id));
        self.add_relationships_among_elements(model);
    }

    /// Removes an element and every relationship touching it.
    fn remove_element(&mut self, model: &Model, element_id: &str) {
        self.element_views_mut().retain(|e| e.id != element_id);
        self.relationship_views_mut().retain(|rv| {
            model
                .relationship(&rv.id)
                .map(|r| !r.touches(element_id))
                .unwrap_or(false)
        });
    }

    /// Adds every relationship whose both ends are on the view.
    fn add_relationships_among_elements(&mut self, model: &Model) {
        let ids: Vec<String> = self.element_views().iter().map(|e| e.id.clone()).collect();
        for relationship in model.relationships() {
            if relationship.connects_within(&ids) && !self.contains_relationship(relationship.id())
            {
                self.relationship_views_mut()
                    .push(RelationshipView::new(relationship.id()));
            }
        }
    }

    /// Copies coordinates, vertices and paper size from another view.
    ///
    /// Only elements and relationships present on both views are touched.
    fn copy_layout_information_from(&mut self, source: &dyn View) {
        if self.paper_size().is_none() {
            self.set_paper_size(source.paper_size());
        }
        for element in self.element_views_mut() {
            if let Some(src) = source.element_views().iter().find(|e| e.id == element.id) {
                element.x = src.x;
                element.y = src.y;
            }
        }
        for relationship in self.relationship_views_mut() {
            if let Some(src) = source
                .relationship_views()
                .iter()
                .find(|r| r.id == relationship.id)
            {
                relationship.vertices = src.vertices.clone();
            }
        }
    }
}

/// A view centred on one software system: the people and systems around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemContextView {
    key: String,
    software_system_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    paper_size: Option<PaperSize>,
    #[serde(default)]
    elements: Vec<ElementView>,
    #[serde(default)]
    relationships: Vec<RelationshipView>,
}

impl SystemContextView {
    pub(crate) fn new(software_system_id: &str, key: &str, description: &str) -> Self {
        SystemContextView {
            key: key.to_string(),
            software_system_id: software_system_id.to_string(),
            description: description.to_string(),
            paper_size: None,
            elements: vec![ElementView::new(software_system_id)],
            relationships: Vec::new(),
        }
    }

    /// Returns the id of the software system in focus.
    pub fn software_system_id(&self) -> &str {
        &self.software_system_id
    }

    /// Adds the focus system, every person, every other software system and
    /// all relationships between them.
    pub fn add_all_elements(&mut self, model: &Model) {
        let focus = self.software_system_id.clone();
        self.add_element(model, &focus);
        for person in model.people() {
            self.add_element(model, person.id());
        }
        for system in model.software_systems() {
            self.add_element(model, system.id());
        }
    }

    /// Adds every person to the view.
    pub fn add_all_people(&mut self, model: &Model) {
        for person in model.people() {
            self.add_element(model, person.id());
        }
    }
}

impl View for SystemContextView {
    fn key(&self) -> &str {
        &self.key
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn element_views(&self) -> &[ElementView] {
        &self.elements
    }

    fn element_views_mut(&mut self) -> &mut Vec<ElementView> {
        &mut self.elements
    }

    fn relationship_views(&self) -> &[RelationshipView] {
        &self.relationships
    }

    fn relationship_views_mut(&mut self) -> &mut Vec<RelationshipView> {
        &mut self.relationships
    }

    fn paper_size(&self) -> Option<PaperSize> {
        self.paper_size
    }

    fn set_paper_size(&mut self, paper_size: Option<PaperSize>) {
        self.paper_size = paper_size;
    }
}

/// A view of every person and software system in the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemLandscapeView {
    key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    paper_size: Option<PaperSize>,
    #[serde(default)]
    elements: Vec<ElementView>,
    #[serde(default)]
    relationships: Vec<RelationshipView>,
}

impl SystemLandscapeView {
    pub(crate) fn new(key: &str, description: &str) -> Self {
        SystemLandscapeView {
            key: key.to_string(),
            description: description.to_string(),
            paper_size: None,
            elements: Vec::new(),
            relationships: Vec::new(),
        }
    }

    /// Adds every element and all relationships between them.
    pub fn add_all_elements(&mut self, model: &Model) {
        let ids: Vec<String> = model.elements().map(|e| e.id().to_string()).collect();
        for id in ids {
            self.add_element(model, &id);
        }
    }
}

impl View for SystemLandscapeView {
    fn key(&self) -> &str {
        &self.key
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn element_views(&self) -> &[ElementView] {
        &self.elements
    }

    fn element_views_mut(&mut self) -> &mut Vec<ElementView> {
        &mut self.elements
    }

    fn relationship_views(&self) -> &[RelationshipView] {
        &self.relationships
    }

    fn relationship_views_mut(&mut self) -> &mut Vec<RelationshipView> {
        &mut self.relationships
    }

    fn paper_size(&self) -> Option<PaperSize> {
        self.paper_size
    }

    fn set_paper_size(&mut self, paper_size: Option<PaperSize>) {
        self.paper_size = paper_size;
    }
}
