// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared workspaces and client setups.

use archsync_core::encryption::kdf::Argon2Cost;
use archsync_core::{
    ClientConfig, Element, EncryptionAlgorithm, EncryptionStrategy, MemoryRemoteStore,
    PasswordBased, Workspace, WorkspaceClient,
};
use tempfile::TempDir;

pub const WORKSPACE_ID: i64 = 20081;
pub const CONTEXT_VIEW_KEY: &str = "SystemContext";

/// A person using a software system, with one system context view.
pub fn system_context_workspace() -> Workspace {
    let mut workspace = Workspace::new("Test", "This is a test workspace.");
    let system_id = workspace
        .model
        .add_software_system("Software System", "Description")
        .unwrap()
        .id()
        .to_string();
    let person_id = workspace
        .model
        .add_person("Person", "Description")
        .unwrap()
        .id()
        .to_string();
    workspace.model.uses(&person_id, &system_id, "Uses").unwrap();

    let view = workspace
        .views
        .create_system_context_view(&workspace.model, &system_id, CONTEXT_VIEW_KEY, "Description")
        .unwrap();
    view.add_all_elements(&workspace.model);

    workspace
}

/// AES with few PBKDF2 iterations.
pub fn fast_aes(passphrase: &str) -> EncryptionStrategy {
    PasswordBased::new(EncryptionAlgorithm::Aes, passphrase)
        .with_iterations(1000)
        .into()
}

/// XChaCha20 with a minimal Argon2 cost.
pub fn fast_xchacha20(passphrase: &str) -> EncryptionStrategy {
    PasswordBased::new(EncryptionAlgorithm::XChaCha20, passphrase)
        .with_argon2_cost(Argon2Cost {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        })
        .into()
}

/// A client over a fresh memory store archiving into a temp directory.
pub fn archiving_client(
    encryption: EncryptionStrategy,
) -> (TempDir, WorkspaceClient<MemoryRemoteStore>) {
    let temp = TempDir::new().unwrap();
    let config = ClientConfig::default()
        .with_archive_dir(temp.path().join("archive"))
        .with_merge_from_remote(false)
        .with_encryption(encryption);
    (temp, WorkspaceClient::with_store(config, MemoryRemoteStore::new()))
}
