//! Persisted summaries of earlier builds and reference build selection.

use std::fs::{self, File, OpenOptions};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DryGuardError, Result};
use crate::health::BuildStatus;
use crate::model::{DuplicateCode, PriorityCounts};
use crate::state::{
    DEFAULT_LOCK_TIMEOUT_MS, atomic_write, history_path, try_lock_exclusive_with_timeout,
    try_lock_shared_with_timeout, unlock_file,
};

const HISTORY_VERSION: u32 = 1;

/// Summary of one finished build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
    pub number: u64,
    pub timestamp: DateTime<Utc>,
    pub status: BuildStatus,
    /// Warnings published by the build; `None` if it published no result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<DuplicateCode>>,
}

impl BuildRecord {
    #[must_use]
    pub fn new(number: u64, status: BuildStatus) -> Self {
        Self {
            number,
            timestamp: Utc::now(),
            status,
            annotations: None,
        }
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: Vec<DuplicateCode>) -> Self {
        self.annotations = Some(annotations);
        self
    }

    #[must_use]
    pub const fn has_result(&self) -> bool {
        self.annotations.is_some()
    }

    #[must_use]
    pub fn counts(&self) -> PriorityCounts {
        self.annotations
            .as_deref()
            .map(PriorityCounts::from_annotations)
            .unwrap_or_default()
    }
}

/// Pick the build to compare against.
///
/// `records` are ordered oldest first. With `use_previous` only the last
/// record is a candidate.
#[must_use]
pub fn select_reference(
    records: &[BuildRecord],
    use_previous: bool,
    only_stable: bool,
) -> Option<&BuildRecord> {
    let qualifies =
        |r: &&BuildRecord| r.has_result() && (!only_stable || r.status == BuildStatus::Success);

    if use_previous {
        records.last().filter(qualifies)
    } else {
        records.iter().rev().find(qualifies)
    }
}

/// Number of the build following `records` (ordered oldest first).
#[must_use]
pub fn next_build_number(records: &[BuildRecord]) -> u64 {
    records.last().map_or(1, |b| b.number + 1)
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryFile {
    version: u32,
    #[serde(default)]
    builds: Vec<BuildRecord>,
}

/// Build history stored as JSON next to the workspace state.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    max_entries: usize,
}

impl HistoryStore {
    #[must_use]
    pub const fn new(path: PathBuf, max_entries: usize) -> Self {
        Self { path, max_entries }
    }

    /// Store at the default location for `workspace_root`.
    #[must_use]
    pub fn for_workspace(workspace_root: &Path, max_entries: usize) -> Self {
        Self::new(history_path(workspace_root), max_entries)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all records, oldest first. A missing file is an empty history.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Vec<BuildRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(DryGuardError::FileRead {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        // A reader that cannot get the lock still reads; writers replace the file atomically.
        let locked = try_lock_shared_with_timeout(&file, DEFAULT_LOCK_TIMEOUT_MS).is_ok();
        let parsed: serde_json::Result<HistoryFile> = serde_json::from_reader(BufReader::new(&file));
        if locked {
            unlock_file(&file);
        }
        Ok(parsed?.builds)
    }

    /// Append a record and trim the history to `max_entries`.
    ///
    /// # Errors
    /// Returns `StateLock` if another process holds the history lock, or an
    /// I/O error if the file cannot be written.
    pub fn append(&self, record: BuildRecord) -> Result<()> {
        let lock_path = self.lock_path();
        crate::state::ensure_parent_dir(&lock_path)?;
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;
        try_lock_exclusive_with_timeout(&lock, DEFAULT_LOCK_TIMEOUT_MS).map_err(|e| {
            DryGuardError::StateLock {
                path: lock_path.clone(),
                message: e.to_string(),
            }
        })?;

        let outcome = self.append_locked(record);
        unlock_file(&lock);
        outcome
    }

    fn append_locked(&self, record: BuildRecord) -> Result<()> {
        let mut builds = self.load()?;
        builds.retain(|b| b.number != record.number);
        builds.push(record);
        builds.sort_by_key(|b| b.number);
        if builds.len() > self.max_entries {
            let excess = builds.len() - self.max_entries;
            builds.drain(..excess);
        }

        let file = HistoryFile {
            version: HISTORY_VERSION,
            builds,
        };
        let json = serde_json::to_string_pretty(&file)?;
        atomic_write(&self.path, json.as_bytes())?;
        tracing::debug!(path = %self.path.display(), entries = file.builds.len(), "history saved");
        Ok(())
    }

    /// Number of the next build: one past the newest recorded build.
    ///
    /// # Errors
    /// Returns an error if the history cannot be loaded.
    pub fn next_build_number(&self) -> Result<u64> {
        Ok(next_build_number(&self.load()?))
    }

    /// Remove the history file.
    ///
    /// # Errors
    /// Returns an error if the file exists and cannot be removed.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    fn lock_path(&self) -> PathBuf {
        let mut lock = self.path.as_os_str().to_owned();
        lock.push(".lock");
        PathBuf::from(lock)
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
