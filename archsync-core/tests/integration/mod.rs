// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration Tests for Archsync Core
//!
//! These tests drive the workspace client end to end against the in-memory
//! remote store: upload, download, encryption and the local archive.
//!
//! Run with: cargo test --test integration

mod archive_workflow_test;
mod encryption_workflow_test;
mod fixtures;
mod property_tests;
mod strategies;
mod workspace_workflow_test;
