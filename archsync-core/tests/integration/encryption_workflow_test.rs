// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Encryption Workflow Integration Tests
//!
//! Encrypted uploads: the remote and the archive only ever see envelopes,
//! and only the right passphrase opens them.

use archsync_core::serialization::{decrypt_workspace, envelope_from_json};
use archsync_core::{
    ClientConfig, ClientError, DecryptionError, EncryptionAlgorithm, EncryptionStrategy,
    MemoryRemoteStore, Payload, PayloadError, WorkspaceClient,
};

use super::fixtures::{
    archiving_client, fast_aes, fast_xchacha20, system_context_workspace, WORKSPACE_ID,
};

fn archived_payload(client: &WorkspaceClient<MemoryRemoteStore>) -> String {
    let archive = client.archive().unwrap();
    let entries = archive.list().unwrap();
    assert_eq!(entries.len(), 1);
    String::from_utf8(archive.read(&entries[0].path).unwrap()).unwrap()
}

/// Test: put then get with AES encryption
#[test]
fn test_put_and_get_with_aes() {
    let (_temp, client) = archiving_client(fast_aes("password"));
    let workspace = system_context_workspace();

    client.put_workspace(WORKSPACE_ID, &workspace).unwrap();
    let downloaded = client.get_workspace(WORKSPACE_ID).unwrap();

    assert_eq!(downloaded.name(), "Test");
    assert!(downloaded.model.person("Person").is_some());
    assert!(downloaded.model.software_system("Software System").is_some());
    assert_eq!(downloaded.model.relationships().len(), 1);
    assert_eq!(downloaded.views.system_context_views().len(), 1);

    // The archived file is an envelope with a readable header
    let envelope = envelope_from_json(&archived_payload(&client)).unwrap();
    assert_eq!(envelope.id(), WORKSPACE_ID);
    assert_eq!(envelope.name(), "Test");
    assert_eq!(envelope.algorithm(), Some(EncryptionAlgorithm::Aes));
}

/// Test: put then get with XChaCha20 encryption
#[test]
fn test_put_and_get_with_xchacha20() {
    let (_temp, client) = archiving_client(fast_xchacha20("password"));

    client
        .put_workspace(WORKSPACE_ID, &system_context_workspace())
        .unwrap();
    let downloaded = client.get_workspace(WORKSPACE_ID).unwrap();
    assert_eq!(downloaded.model.relationships().len(), 1);

    let envelope = envelope_from_json(&archived_payload(&client)).unwrap();
    assert_eq!(envelope.algorithm(), Some(EncryptionAlgorithm::XChaCha20));
}

/// Test: plaintext never reaches the store or the archive
#[test]
fn test_remote_and_archive_hold_no_plaintext_model() {
    let (_temp, client) = archiving_client(fast_aes("password"));
    client
        .put_workspace(WORKSPACE_ID, &system_context_workspace())
        .unwrap();

    let remote = client.store().payload(WORKSPACE_ID).unwrap();
    assert!(!remote.contains("Software System"));
    assert!(!archived_payload(&client).contains("Software System"));
}

/// Test: archived envelope opened with the wrong passphrase
#[test]
fn test_archived_envelope_wrong_passphrase() {
    let (_temp, client) = archiving_client(fast_aes("password"));
    client
        .put_workspace(WORKSPACE_ID, &system_context_workspace())
        .unwrap();

    let envelope = envelope_from_json(&archived_payload(&client)).unwrap();
    let result = decrypt_workspace(&envelope, &EncryptionStrategy::aes("not the password"));

    assert!(matches!(
        result,
        Err(PayloadError::Decryption(DecryptionError::WrongPassphrase))
    ));
}

/// Test: archived envelope opened with the right passphrase
#[test]
fn test_archived_envelope_right_passphrase() {
    let (_temp, client) = archiving_client(fast_xchacha20("password"));
    client
        .put_workspace(WORKSPACE_ID, &system_context_workspace())
        .unwrap();

    let envelope = envelope_from_json(&archived_payload(&client)).unwrap();
    let strategy = EncryptionStrategy::for_metadata(envelope.encryption_strategy(), "password")
        .unwrap();
    let workspace = decrypt_workspace(&envelope, &strategy).unwrap();

    assert_eq!(workspace.id(), WORKSPACE_ID);
    assert!(workspace.model.person("Person").is_some());
}

/// Test: encrypted remote payload read without a passphrase
#[test]
fn test_get_encrypted_without_passphrase() {
    let (_temp, writer) = archiving_client(fast_aes("password"));
    writer
        .put_workspace(WORKSPACE_ID, &system_context_workspace())
        .unwrap();

    let reader = WorkspaceClient::with_store(ClientConfig::default(), writer.store());

    assert!(matches!(
        reader.get_workspace(WORKSPACE_ID),
        Err(ClientError::Decryption(DecryptionError::MissingPassphrase))
    ));
}

/// Test: encrypted remote payload read with another algorithm configured
#[test]
fn test_get_encrypted_with_algorithm_mismatch() {
    let (_temp, writer) = archiving_client(fast_aes("password"));
    writer
        .put_workspace(WORKSPACE_ID, &system_context_workspace())
        .unwrap();

    let config = ClientConfig::default().with_encryption(fast_xchacha20("password"));
    let reader = WorkspaceClient::with_store(config, writer.store());

    assert!(matches!(
        reader.get_workspace(WORKSPACE_ID),
        Err(ClientError::Decryption(DecryptionError::AlgorithmMismatch {
            expected: EncryptionAlgorithm::XChaCha20,
            found: EncryptionAlgorithm::Aes,
        }))
    ));
}

/// Test: a plain remote payload is readable with encryption configured
#[test]
fn test_get_plain_with_encryption_configured() {
    let (_temp, writer) = archiving_client(EncryptionStrategy::None);
    writer
        .put_workspace(WORKSPACE_ID, &system_context_workspace())
        .unwrap();

    let config = ClientConfig::default().with_encryption(fast_aes("password"));
    let reader = WorkspaceClient::with_store(config, writer.store());

    let workspace = reader.get_workspace(WORKSPACE_ID).unwrap();
    assert_eq!(workspace.id(), WORKSPACE_ID);
}

/// Test: unknown algorithm in a remote envelope
#[test]
fn test_get_envelope_with_unknown_algorithm() {
    let (_temp, client) = archiving_client(fast_aes("password"));
    client.store().insert_payload(
        WORKSPACE_ID,
        r#"{"id":20081,"name":"Test","encryptionStrategy":{"type":"rot13"},"ciphertext":"AAAA"}"#,
    );

    let raw = client.get_workspace_raw(WORKSPACE_ID).unwrap();
    assert!(Payload::parse(&raw).unwrap().is_encrypted());
    assert!(matches!(
        client.get_workspace(WORKSPACE_ID),
        Err(ClientError::Decryption(DecryptionError::UnsupportedAlgorithm))
    ));
}

/// Test: an envelope demanding an absurd Argon2 time cost is refused
#[test]
fn test_envelope_with_excessive_kdf_cost() {
    let store = MemoryRemoteStore::new();
    let config = ClientConfig::default().with_encryption(fast_xchacha20("password"));
    let client = WorkspaceClient::with_store(config.with_merge_from_remote(false), &store);
    client
        .put_workspace(WORKSPACE_ID, &system_context_workspace())
        .unwrap();

    let mut envelope: serde_json::Value =
        serde_json::from_str(&store.payload(WORKSPACE_ID).unwrap()).unwrap();
    envelope["encryptionStrategy"]["timeCost"] = u32::MAX.into();
    store.insert_payload(WORKSPACE_ID, &envelope.to_string());

    assert!(matches!(
        client.get_workspace(WORKSPACE_ID),
        Err(ClientError::Decryption(DecryptionError::InvalidMetadata(_)))
    ));

    // Merging decodes the remote first, so the upload is refused too
    let merging = WorkspaceClient::with_store(
        ClientConfig::default().with_encryption(fast_xchacha20("password")),
        &store,
    );
    assert!(matches!(
        merging.put_workspace(WORKSPACE_ID, &system_context_workspace()),
        Err(ClientError::Decryption(DecryptionError::InvalidMetadata(_)))
    ));
    assert_eq!(store.put_count(), 1);
}
