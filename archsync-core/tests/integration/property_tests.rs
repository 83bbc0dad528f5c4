// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Property-based tests for upload and download.

use archsync_core::{ClientConfig, MemoryRemoteStore, WorkspaceClient};
use proptest::prelude::*;

use super::fixtures::fast_aes;
use super::strategies::{workspace_id_strategy, workspace_strategy};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_plain_upload_preserves_model(
        id in workspace_id_strategy(),
        workspace in workspace_strategy(),
    ) {
        let config = ClientConfig::default().with_merge_from_remote(false);
        let client = WorkspaceClient::with_store(config, MemoryRemoteStore::new());

        client.put_workspace(id, &workspace).unwrap();
        let downloaded = client.get_workspace(id).unwrap();

        prop_assert_eq!(downloaded.id(), id);
        prop_assert_eq!(downloaded.name(), workspace.name());
        prop_assert_eq!(downloaded.model, workspace.model);
        prop_assert_eq!(downloaded.views, workspace.views);
    }

    #[test]
    fn prop_encrypted_upload_preserves_model(
        id in workspace_id_strategy(),
        workspace in workspace_strategy(),
    ) {
        let config = ClientConfig::default()
            .with_merge_from_remote(false)
            .with_encryption(fast_aes("password"));
        let client = WorkspaceClient::with_store(config, MemoryRemoteStore::new());

        client.put_workspace(id, &workspace).unwrap();
        let downloaded = client.get_workspace(id).unwrap();

        prop_assert_eq!(downloaded.model.element_count(), workspace.model.element_count());
        prop_assert_eq!(downloaded.model.relationships(), workspace.model.relationships());
    }
}
