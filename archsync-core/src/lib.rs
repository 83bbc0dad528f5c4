// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Archsync Core Library
//!
//! Client for a remote software-architecture workspace store.
//! Workspaces are uploaded and downloaded by numeric id, optionally
//! encrypted client-side with a passphrase, and every upload is archived
//! locally. All cryptographic operations use `ring`, `argon2` and
//! `chacha20poly1305`.

pub mod archive;
pub mod client;
pub mod config;
pub mod encryption;
pub mod error;
pub mod model;
pub mod remote;
pub mod serialization;
pub mod view;
pub mod workspace;

/// Agent name sent as User-Agent and stamped on uploaded workspaces.
pub const AGENT: &str = concat!("archsync/", env!("CARGO_PKG_VERSION"));

pub use archive::{ArchiveEntry, ArchiveError, WorkspaceArchive};
pub use client::{PutReceipt, WorkspaceClient};
pub use config::{ClientConfig, ConfigError};
pub use encryption::{
    Argon2Cost, DecryptionError, EncryptionAlgorithm, EncryptionError, EncryptionMetadata,
    EncryptionStrategy, PasswordBased,
};
pub use error::{ClientError, ClientResult};
pub use model::{
    Element, ElementKind, Location, Model, ModelError, Person, Relationship, SoftwareSystem,
};
#[cfg(feature = "http")]
pub use remote::HttpRemoteStore;
pub use remote::{MemoryRemoteStore, RemoteStore, TransportError};
pub use serialization::{EncryptedWorkspace, Payload, PayloadError, SerializationError};
pub use view::{
    PaperSize, SystemContextView, SystemLandscapeView, View, ViewError, ViewSet,
};
pub use workspace::{Workspace, WorkspaceError};
