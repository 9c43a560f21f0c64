//! State file locations and file locking.
//!
//! When the workspace is a git repository root, state files are stored in
//! `.git/dry-guard/` (automatically ignored). Otherwise they live in `.dry-guard/`.

use std::fs::{self, File, TryLockError};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

const STATE_DIR_NAME: &str = "dry-guard";
const FALLBACK_STATE_DIR: &str = ".dry-guard";
const HISTORY_FILENAME: &str = "history.json";

/// Default lock timeout in milliseconds.
pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 5000;

/// Polling interval for lock acquisition in milliseconds.
const LOCK_POLL_INTERVAL_MS: u64 = 50;

/// Detect the state directory for the given workspace root.
#[must_use]
pub fn detect_state_dir(workspace_root: &Path) -> PathBuf {
    let git_dir = workspace_root.join(".git");
    if git_dir.is_dir() {
        git_dir.join(STATE_DIR_NAME)
    } else {
        workspace_root.join(FALLBACK_STATE_DIR)
    }
}

/// Get the build history file path for the given workspace root.
#[must_use]
pub fn history_path(workspace_root: &Path) -> PathBuf {
    detect_state_dir(workspace_root).join(HISTORY_FILENAME)
}

/// Ensure the parent directory exists for a given path.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Error type for lock acquisition failures.
#[derive(Debug)]
pub enum LockError {
    /// Lock acquisition timed out.
    Timeout,
    /// I/O error during lock operation.
    Io(io::Error),
}

impl From<io::Error> for LockError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl std::fmt::Display for LockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "lock acquisition timed out"),
            Self::Io(e) => write!(f, "lock I/O error: {e}"),
        }
    }
}

impl std::error::Error for LockError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Timeout => None,
            Self::Io(e) => Some(e),
        }
    }
}

/// Try to acquire an exclusive (write) lock on the file with timeout.
///
/// # Errors
/// - `LockError::Timeout` if lock cannot be acquired within `timeout_ms`
/// - `LockError::Io` for other I/O errors
pub fn try_lock_exclusive_with_timeout(file: &File, timeout_ms: u64) -> Result<(), LockError> {
    poll_lock(timeout_ms, || file.try_lock())
}

/// Try to acquire a shared (read) lock on the file with timeout.
///
/// # Errors
/// - `LockError::Timeout` if lock cannot be acquired within `timeout_ms`
/// - `LockError::Io` for other I/O errors
pub fn try_lock_shared_with_timeout(file: &File, timeout_ms: u64) -> Result<(), LockError> {
    poll_lock(timeout_ms, || file.try_lock_shared())
}

fn poll_lock(
    timeout_ms: u64,
    mut attempt: impl FnMut() -> Result<(), TryLockError>,
) -> Result<(), LockError> {
    let start = Instant::now();
    let timeout = Duration::from_millis(timeout_ms);
    let poll_interval = Duration::from_millis(LOCK_POLL_INTERVAL_MS);

    loop {
        match attempt() {
            Ok(()) => return Ok(()),
            Err(TryLockError::WouldBlock) => {
                if start.elapsed() >= timeout {
                    return Err(LockError::Timeout);
                }
                thread::sleep(poll_interval);
            }
            Err(TryLockError::Error(e)) => return Err(LockError::Io(e)),
        }
    }
}

/// Unlock a file, releasing any held lock. Unlock failures are ignored.
pub fn unlock_file(file: &File) {
    let _ = file.unlock();
}

/// Write `content` to `path` via a temporary sibling file and a rename.
///
/// # Errors
/// Returns an error if the temporary file cannot be written or renamed.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
