// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Local Workspace Archive
//!
//! Keeps a copy of every payload successfully uploaded to the remote store.
//! The archive is append-only: each save creates exactly one new file, an
//! existing file is never overwritten, appended to or deleted.
//!
//! File names are `workspace-{id}-{yyyyMMddHHmmssSSS}-{suffix}.json` with a
//! UTC timestamp and 8 random hex characters. Files are written to a hidden
//! temp file first and then hard-linked into place, which fails instead of
//! replacing when the name is taken.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use ring::rand::{SecureRandom, SystemRandom};
use thiserror::Error;
use tracing::{debug, warn};

const FILE_PREFIX: &str = "workspace-";
const FILE_EXTENSION: &str = ".json";
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S%3f";
/// Attempts at finding a free file name before giving up.
const MAX_NAME_ATTEMPTS: usize = 8;

/// Errors that can occur with the archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Random suffix generation failed
    #[error("Random number generation failed")]
    Rng,

    /// No free file name found
    #[error("Could not find a free archive file name in {0}")]
    NameExhausted(PathBuf),
}

/// An archived payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: PathBuf,
    pub workspace_id: i64,
    pub archived_at: DateTime<Utc>,
}

/// Append-only directory of uploaded payloads.
#[derive(Debug, Clone)]
pub struct WorkspaceArchive {
    dir: PathBuf,
}

impl WorkspaceArchive {
    /// Creates an archive rooted at `dir`. The directory is created on the
    /// first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `data` to a new archive file and returns its path.
    pub fn save(&self, workspace_id: i64, data: &[u8]) -> Result<PathBuf, ArchiveError> {
        fs::create_dir_all(&self.dir)?;

        let now = Utc::now();
        for _ in 0..MAX_NAME_ATTEMPTS {
            let suffix = random_suffix()?;
            let name = archive_file_name(workspace_id, now, &suffix);
            let path = self.dir.join(&name);
            let temp_path = self.dir.join(format!(".{}.tmp", name));

            write_new(&temp_path, data)?;
            let linked = fs::hard_link(&temp_path, &path);
            if let Err(e) = fs::remove_file(&temp_path) {
                warn!(path = %temp_path.display(), error = %e, "failed to remove archive temp file");
            }

            match linked {
                Ok(()) => {
                    debug!(path = %path.display(), bytes = data.len(), "archived workspace");
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(ArchiveError::NameExhausted(self.dir.clone()))
    }

    /// Lists archived payloads, oldest first. Other files are ignored.
    pub fn list(&self) -> Result<Vec<ArchiveEntry>, ArchiveError> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = dir_entry?;
            if !dir_entry.file_type()?.is_file() {
                continue;
            }
            let file_name = dir_entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if let Some((workspace_id, archived_at)) = parse_archive_file_name(name) {
                entries.push(ArchiveEntry {
                    path: dir_entry.path(),
                    workspace_id,
                    archived_at,
                });
            }
        }
        entries.sort_by(|a, b| {
            a.archived_at
                .cmp(&b.archived_at)
                .then_with(|| a.path.cmp(&b.path))
        });
        Ok(entries)
    }

    /// Lists archived payloads of one workspace, oldest first.
    pub fn list_for(&self, workspace_id: i64) -> Result<Vec<ArchiveEntry>, ArchiveError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|e| e.workspace_id == workspace_id)
            .collect())
    }

    /// Reads an archived payload.
    pub fn read(&self, path: &Path) -> Result<Vec<u8>, ArchiveError> {
        Ok(fs::read(path)?)
    }
}

/// Builds the archive file name for a workspace at a point in time.
pub fn archive_file_name(workspace_id: i64, at: DateTime<Utc>, suffix: &str) -> String {
    format!(
        "{}{}-{}-{}{}",
        FILE_PREFIX,
        workspace_id,
        at.format(TIMESTAMP_FORMAT),
        suffix,
        FILE_EXTENSION
    )
}

/// Parses `workspace-{id}-{timestamp}-{suffix}.json`.
fn parse_archive_file_name(name: &str) -> Option<(i64, DateTime<Utc>)> {
    let stem = name
        .strip_prefix(FILE_PREFIX)?
        .strip_suffix(FILE_EXTENSION)?;

    // Split from the right so negative ids survive
    let mut parts = stem.rsplitn(3, '-');
    let suffix = parts.next()?;
    let timestamp = parts.next()?;
    let id = parts.next()?;
    if suffix.is_empty() || !suffix.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    Some((id.parse().ok()?, parse_timestamp(timestamp)?))
}

fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    if timestamp.len() != 17 || !timestamp.is_ascii() {
        return None;
    }
    let (seconds, millis) = timestamp.split_at(14);
    let naive = NaiveDateTime::parse_from_str(seconds, "%Y%m%d%H%M%S").ok()?;
    let millis: i64 = millis.parse().ok()?;
    Some(naive.and_utc() + Duration::milliseconds(millis))
}

fn random_suffix() -> Result<String, ArchiveError> {
    let mut bytes = [0u8; 4];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| ArchiveError::Rng)?;
    Ok(hex::encode(bytes))
}

/// Writes a file that must not exist yet, flushing it to disk.
fn write_new(path: &Path, data: &[u8]) -> Result<(), ArchiveError> {
    write_new_with(path, |file| {
        file.write_all(data)?;
        file.sync_all()
    })
}

/// Creates `path` and fills it with `write`. The file is removed again if
/// writing fails, so a failed save leaves nothing behind.
fn write_new_with<F>(path: &Path, write: F) -> Result<(), ArchiveError>
where
    F: FnOnce(&mut fs::File) -> io::Result<()>,
{
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    if let Err(e) = write(&mut file) {
        drop(file);
        if let Err(remove) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %remove, "failed to remove partial archive file");
        }
        return Err(e.into());
    }
    Ok(())
}
