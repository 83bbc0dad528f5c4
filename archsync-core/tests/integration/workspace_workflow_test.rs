// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Workspace Workflow Integration Tests
//!
//! Upload and download of plain workspaces, merge with the remote version
//! and error reporting.

use archsync_core::serialization::from_json;
use archsync_core::{
    ClientConfig, ClientError, Element, EncryptionStrategy, MemoryRemoteStore, TransportError,
    Workspace, WorkspaceClient, WorkspaceError,
};

use super::fixtures::{archiving_client, system_context_workspace, CONTEXT_VIEW_KEY, WORKSPACE_ID};

/// Test: put then get without encryption
#[test]
fn test_put_and_get_without_encryption() {
    let (_temp, client) = archiving_client(EncryptionStrategy::None);
    let workspace = system_context_workspace();

    let receipt = client.put_workspace(WORKSPACE_ID, &workspace).unwrap();
    assert_eq!(receipt.workspace_id, WORKSPACE_ID);
    assert!(receipt.archived.is_some());

    let downloaded = client.get_workspace(WORKSPACE_ID).unwrap();
    assert_eq!(downloaded.id(), WORKSPACE_ID);
    assert_eq!(downloaded.name(), "Test");
    assert_eq!(downloaded.description(), "This is a test workspace.");

    let person = downloaded.model.person("Person").unwrap();
    let system = downloaded.model.software_system("Software System").unwrap();
    assert!(downloaded.model.contains(person));
    assert!(downloaded.model.contains(system));
    assert_eq!(downloaded.model.relationships().len(), 1);
    assert_eq!(downloaded.views.system_context_views().len(), 1);

    let view = downloaded.views.view(CONTEXT_VIEW_KEY).unwrap();
    assert!(view.contains_element(person.id()));
    assert!(view.contains_element(system.id()));
    assert_eq!(view.relationship_views().len(), 1);

    // Exactly one archive file, holding the bytes sent to the store
    let entries = client.archive().unwrap().list().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].workspace_id, WORKSPACE_ID);
    let archived = client.archive().unwrap().read(&entries[0].path).unwrap();
    assert_eq!(
        archived,
        client.store().payload(WORKSPACE_ID).unwrap().into_bytes()
    );
    let archived = from_json(std::str::from_utf8(&archived).unwrap()).unwrap();
    assert_eq!(archived.id(), WORKSPACE_ID);
    assert_eq!(archived.name(), "Test");
}

/// Test: reading twice gives the same workspace and archives nothing
#[test]
fn test_get_is_idempotent() {
    let (_temp, client) = archiving_client(EncryptionStrategy::None);
    client
        .put_workspace(WORKSPACE_ID, &system_context_workspace())
        .unwrap();

    let first = client.get_workspace(WORKSPACE_ID).unwrap();
    let second = client.get_workspace(WORKSPACE_ID).unwrap();

    assert_eq!(first, second);
    assert_eq!(client.archive().unwrap().list().unwrap().len(), 1);
}

/// Test: unknown id reports not found
#[test]
fn test_get_unknown_workspace() {
    let (_temp, client) = archiving_client(EncryptionStrategy::None);
    assert!(matches!(
        client.get_workspace(WORKSPACE_ID),
        Err(ClientError::NotFound(WORKSPACE_ID))
    ));
}

/// Test: unreachable store surfaces a transport error
#[test]
fn test_get_transport_failure() {
    let (_temp, client) = archiving_client(EncryptionStrategy::None);
    client.store().fail_next_get();
    assert!(matches!(
        client.get_workspace(WORKSPACE_ID),
        Err(ClientError::Transport(TransportError::Unavailable(_)))
    ));
}

/// Test: raw payload is the uploaded JSON
#[test]
fn test_get_workspace_raw() {
    let (_temp, client) = archiving_client(EncryptionStrategy::None);
    client
        .put_workspace(WORKSPACE_ID, &system_context_workspace())
        .unwrap();

    let raw = client.get_workspace_raw(WORKSPACE_ID).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["id"], WORKSPACE_ID);
    assert_eq!(value["name"], "Test");
}

/// Test: a workspace already carrying another id is rejected before upload
#[test]
fn test_put_with_conflicting_id() {
    let (_temp, client) = archiving_client(EncryptionStrategy::None);
    let workspace = Workspace::with_id(1, "Other", "").unwrap();

    let err = client.put_workspace(WORKSPACE_ID, &workspace).unwrap_err();

    assert!(matches!(
        err,
        ClientError::Workspace(WorkspaceError::IdAlreadyAssigned {
            current: 1,
            requested: WORKSPACE_ID
        })
    ));
    assert_eq!(client.store().put_count(), 0);
    assert!(client.archive().unwrap().list().unwrap().is_empty());
}

/// Test: layout edited remotely survives the next upload
#[test]
fn test_merge_from_remote_keeps_layout() {
    let store = MemoryRemoteStore::new();

    // Someone positions the diagram on the service
    let mut remote = system_context_workspace();
    let person_id = remote.model.person("Person").unwrap().id().to_string();
    {
        let view = remote.views.view_mut(CONTEXT_VIEW_KEY).unwrap();
        let element = view
            .element_views_mut()
            .iter_mut()
            .find(|e| e.id == person_id)
            .unwrap();
        element.x = 300;
        element.y = 150;
    }
    let uploader =
        WorkspaceClient::with_store(ClientConfig::default().with_merge_from_remote(false), &store);
    uploader.put_workspace(WORKSPACE_ID, &remote).unwrap();

    // A fresh local model without layout is uploaded with merging on
    let client = WorkspaceClient::with_store(ClientConfig::default(), &store);
    client
        .put_workspace(WORKSPACE_ID, &system_context_workspace())
        .unwrap();

    let merged = client.get_workspace(WORKSPACE_ID).unwrap();
    let view = merged.views.view(CONTEXT_VIEW_KEY).unwrap();
    let element = view.element_view(&person_id).unwrap();
    assert_eq!((element.x, element.y), (300, 150));
}

/// Test: without merging, remote layout is overwritten
#[test]
fn test_no_merge_overwrites_layout() {
    let store = MemoryRemoteStore::new();
    let config = ClientConfig::default().with_merge_from_remote(false);
    let client = WorkspaceClient::with_store(config, &store);

    let mut remote = system_context_workspace();
    let person_id = remote.model.person("Person").unwrap().id().to_string();
    let view = remote.views.view_mut(CONTEXT_VIEW_KEY).unwrap();
    view.element_views_mut()[0].x = 999;
    client.put_workspace(WORKSPACE_ID, &remote).unwrap();

    client
        .put_workspace(WORKSPACE_ID, &system_context_workspace())
        .unwrap();

    let stored = client.get_workspace(WORKSPACE_ID).unwrap();
    let view = stored.views.view(CONTEXT_VIEW_KEY).unwrap();
    assert!(view.element_views().iter().all(|e| e.x == 0));
    assert!(view.element_view(&person_id).is_some());
}
