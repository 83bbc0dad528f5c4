// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Proptest Strategies

use archsync_core::{Element, Workspace};
use proptest::prelude::*;

/// Element and workspace names (non-empty, trimmed).
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 ]{0,29}"
        .prop_map(|s| s.trim().to_string())
        .prop_filter("non-empty", |s| !s.is_empty())
}

/// Free-form descriptions, including quotes and unicode.
pub fn description_strategy() -> impl Strategy<Value = String> {
    ".{0,60}"
}

/// Workspace ids accepted by the client.
pub fn workspace_id_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000
}

/// A workspace with distinct people, systems, and a "uses" relationship
/// from every person to the first system.
pub fn workspace_strategy() -> impl Strategy<Value = Workspace> {
    (
        name_strategy(),
        description_strategy(),
        prop::collection::hash_set(name_strategy(), 0..5),
        prop::collection::hash_set(name_strategy(), 1..4),
    )
        .prop_map(|(name, description, people, systems)| {
            let mut workspace = Workspace::new(&name, &description);
            let mut system_ids = Vec::new();
            for system in &systems {
                let id = workspace
                    .model
                    .add_software_system(system, "")
                    .unwrap()
                    .id()
                    .to_string();
                system_ids.push(id);
            }
            for person in &people {
                let id = workspace
                    .model
                    .add_person(person, "")
                    .unwrap()
                    .id()
                    .to_string();
                workspace.model.uses(&id, &system_ids[0], "Uses").unwrap();
            }
            let view = workspace
                .views
                .create_system_context_view(&workspace.model, &system_ids[0], "Context", "")
                .unwrap();
            view.add_all_elements(&workspace.model);
            workspace
        })
}
