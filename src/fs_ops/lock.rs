//! Lock probe: is a local file safe to read for upload?
//!
//! Design:
//! - A probe is one attempt to open the file for exclusive read/write access.
//! - Windows: open without sharing; a sharing/lock violation means another handle is open.
//! - Unix: open read/write, then take a non-blocking flock(LOCK_EX); EWOULDBLOCK means held.
//!
//! Notes:
//! - The handle is owned by an `ExclusiveFile` guard and released on drop, on every path.
//! - There is no timeout: a slow filesystem blocks the caller for the full open call.
//! - Anything other than a successful open counts as "in use". Skipping a file
//!   that could have been transferred is preferred to reading one mid-write.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::platform::{is_lock_contention, open_exclusive_rw, release_exclusive};

/// RAII guard over a file opened for exclusive read/write access.
///
/// The engine may keep the guard while it streams the file so that no writer
/// can sneak in between the probe and the read.
#[derive(Debug)]
pub struct ExclusiveFile {
    file: File,
    path: PathBuf,
}

impl ExclusiveFile {
    pub fn file_mut(&mut self) -> &mut File {
        &mut self.file
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ExclusiveFile {
    fn drop(&mut self) {
        release_exclusive(&self.file);
    }
}

/// Open `path` with no sharing. Fails if any other exclusive holder exists.
pub fn open_exclusive(path: &Path) -> io::Result<ExclusiveFile> {
    let file = open_exclusive_rw(path)?;
    Ok(ExclusiveFile {
        file,
        path: path.to_path_buf(),
    })
}

/// Outcome of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// Opened exclusively and released again.
    Free,
    /// Another handle holds the file.
    Locked,
    /// No such file.
    Missing,
    /// Access denied (permissions, read-only file or attribute).
    Denied,
    /// Any other failure (directory, I/O error, ...).
    Unavailable(io::ErrorKind),
}

impl LockState {
    /// Conservative fold: only `Free` is safe to read.
    #[inline]
    pub fn is_in_use(self) -> bool {
        !matches!(self, LockState::Free)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LockState::Free => "free",
            LockState::Locked => "locked",
            LockState::Missing => "missing",
            LockState::Denied => "denied",
            LockState::Unavailable(_) => "unavailable",
        }
    }

    fn from_error(err: &io::Error) -> Self {
        if is_lock_contention(err) {
            return LockState::Locked;
        }
        match err.kind() {
            io::ErrorKind::NotFound => LockState::Missing,
            io::ErrorKind::PermissionDenied => LockState::Denied,
            other => LockState::Unavailable(other),
        }
    }
}

impl std::fmt::Display for LockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LockState::Unavailable(kind) => write!(f, "unavailable ({kind})"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Probe `path` once and classify the result.
pub fn probe_file(path: &Path) -> LockState {
    let name = path.file_name().map(|n| n.to_string_lossy());
    let state = match open_exclusive(path) {
        Ok(guard) => {
            drop(guard);
            LockState::Free
        }
        Err(e) => LockState::from_error(&e),
    };
    match name {
        Some(name) => debug!(
            file = %name,
            state = %state,
            "File {} is locked: {}",
            name,
            state.is_in_use()
        ),
        None => debug!(path = %path.display(), state = %state, "lock probe"),
    }
    state
}

/// True if `path` is in use or cannot be opened exclusively for any reason.
pub fn file_is_used(path: &Path) -> bool {
    probe_file(path).is_in_use()
}
