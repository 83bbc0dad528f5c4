// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory remote store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::{RemoteStore, TransportError, TransportResult};

/// Remote store kept in process memory.
///
/// Can be told to fail the next put or get, to exercise transport errors.
#[derive(Debug, Default)]
pub struct MemoryRemoteStore {
    workspaces: Mutex<HashMap<i64, String>>,
    fail_next_put: AtomicBool,
    fail_next_get: AtomicBool,
    puts: AtomicUsize,
    gets: AtomicUsize,
}

impl MemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `put_workspace` fail with a 503.
    pub fn fail_next_put(&self) {
        self.fail_next_put.store(true, Ordering::SeqCst);
    }

    /// Makes the next `get_workspace` fail as unreachable.
    pub fn fail_next_get(&self) {
        self.fail_next_get.store(true, Ordering::SeqCst);
    }

    /// Number of put calls received, failed ones included.
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// Number of get calls received, failed ones included.
    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    /// Returns the stored payload without counting a get.
    pub fn payload(&self, workspace_id: i64) -> Option<String> {
        self.lock().ok()?.get(&workspace_id).cloned()
    }

    /// Stores a payload without counting a put.
    pub fn insert_payload(&self, workspace_id: i64, payload: &str) {
        if let Ok(mut workspaces) = self.lock() {
            workspaces.insert(workspace_id, payload.to_string());
        }
    }

    fn lock(&self) -> TransportResult<MutexGuard<'_, HashMap<i64, String>>> {
        self.workspaces
            .lock()
            .map_err(|_| TransportError::Unavailable("store lock poisoned".into()))
    }
}

impl RemoteStore for MemoryRemoteStore {
    fn put_workspace(&self, workspace_id: i64, payload: &str) -> TransportResult<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_put.swap(false, Ordering::SeqCst) {
            return Err(TransportError::Status {
                status: 503,
                body: "Service Unavailable".into(),
            });
        }
        self.lock()?.insert(workspace_id, payload.to_string());
        Ok(())
    }

    fn get_workspace(&self, workspace_id: i64) -> TransportResult<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_get.swap(false, Ordering::SeqCst) {
            return Err(TransportError::Unavailable("connection refused".into()));
        }
        Ok(self.lock()?.get(&workspace_id).cloned())
    }
}
