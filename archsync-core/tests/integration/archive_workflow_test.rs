// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Archive Workflow Integration Tests

use std::fs;

use archsync_core::{
    ArchiveError, ClientConfig, ClientError, EncryptionStrategy, MemoryRemoteStore,
    WorkspaceArchive, WorkspaceClient,
};
use tempfile::TempDir;

use super::fixtures::{archiving_client, system_context_workspace, WORKSPACE_ID};

/// Test: no uploads, no archive files
#[test]
fn test_no_put_no_archive() {
    let (_temp, client) = archiving_client(EncryptionStrategy::None);
    assert!(client.archive().unwrap().list().unwrap().is_empty());
    assert!(!client.archive().unwrap().dir().exists());
}

/// Test: one archive file per successful put, none per get
#[test]
fn test_archive_grows_with_each_put() {
    let (_temp, client) = archiving_client(EncryptionStrategy::None);
    let workspace = system_context_workspace();

    for expected in 1..=3 {
        client.put_workspace(WORKSPACE_ID, &workspace).unwrap();
        client.get_workspace(WORKSPACE_ID).unwrap();
        assert_eq!(client.archive().unwrap().list().unwrap().len(), expected);
    }

    let entries = client.archive().unwrap().list_for(WORKSPACE_ID).unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries
        .windows(2)
        .all(|pair| pair[0].archived_at <= pair[1].archived_at));
}

/// Test: receipt points at the new archive file
#[test]
fn test_receipt_points_at_archive_file() {
    let (_temp, client) = archiving_client(EncryptionStrategy::None);

    let receipt = client
        .put_workspace(WORKSPACE_ID, &system_context_workspace())
        .unwrap();

    let path = receipt.archived.unwrap();
    assert!(path.starts_with(client.archive().unwrap().dir()));
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("workspace-20081-"));
    assert!(name.ends_with(".json"));
}

/// Test: failed upload leaves the archive untouched
#[test]
fn test_failed_put_archives_nothing() {
    let (_temp, client) = archiving_client(EncryptionStrategy::None);
    client.store().fail_next_put();

    let err = client
        .put_workspace(WORKSPACE_ID, &system_context_workspace())
        .unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
    assert!(client.archive().unwrap().list().unwrap().is_empty());
    assert!(client.store().payload(WORKSPACE_ID).is_none());
}

/// Test: archive failure after the remote accepted the upload
#[test]
fn test_archive_failure_after_remote_success() {
    let temp = TempDir::new().unwrap();
    let not_a_dir = temp.path().join("archive");
    fs::write(&not_a_dir, "occupied").unwrap();

    let config = ClientConfig::default()
        .with_archive_dir(&not_a_dir)
        .with_merge_from_remote(false);
    let client = WorkspaceClient::with_store(config, MemoryRemoteStore::new());

    let err = client
        .put_workspace(WORKSPACE_ID, &system_context_workspace())
        .unwrap_err();

    match &err {
        ClientError::Archive {
            workspace_id,
            source,
        } => {
            assert_eq!(*workspace_id, WORKSPACE_ID);
            assert!(matches!(source, ArchiveError::Io(_)));
        }
        other => panic!("expected archive error, got {other:?}"),
    }
    assert!(err.to_string().contains("stored remotely"));
    assert!(client.store().payload(WORKSPACE_ID).is_some());
}

/// Test: no archive directory, no archiving
#[test]
fn test_archiving_disabled() {
    let client = WorkspaceClient::with_store(ClientConfig::default(), MemoryRemoteStore::new());

    let receipt = client
        .put_workspace(WORKSPACE_ID, &system_context_workspace())
        .unwrap();

    assert!(receipt.archived.is_none());
    assert!(client.archive().is_none());
}

/// Test: archive can be browsed independently of a client
#[test]
fn test_archive_reopened_by_path() {
    let (temp, client) = archiving_client(EncryptionStrategy::None);
    client
        .put_workspace(WORKSPACE_ID, &system_context_workspace())
        .unwrap();
    client.put_workspace(7, &system_context_workspace()).unwrap();

    let archive = WorkspaceArchive::new(temp.path().join("archive"));
    assert_eq!(archive.list().unwrap().len(), 2);
    assert_eq!(archive.list_for(7).unwrap().len(), 1);
}
