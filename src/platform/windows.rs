//! Windows side of the platform helpers.
//!
//! Exclusivity is the native share mode: while one handle is open with no
//! sharing, every other open of the file fails with a sharing violation.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::os::windows::fs::OpenOptionsExt;
use std::path::Path;

use windows_sys::Win32::Foundation::{ERROR_LOCK_VIOLATION, ERROR_SHARING_VIOLATION};
use windows_sys::Win32::Storage::FileSystem::FILE_SHARE_NONE;

use super::temp::tmp_config_sibling_name;

/// Open `path` for read/write with no sharing allowed.
pub fn open_exclusive_rw(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .share_mode(FILE_SHARE_NONE)
        .open(path)
}

/// Nothing to unlock: closing the handle ends the exclusive share mode.
pub fn release_exclusive(_file: &File) {}

/// True when `err` means another handle currently holds the file.
pub fn is_lock_contention(err: &io::Error) -> bool {
    matches!(
        err.raw_os_error(),
        Some(code) if code == ERROR_SHARING_VIOLATION as i32 || code == ERROR_LOCK_VIOLATION as i32
    )
}

/// Append handle for the log file. ACLs are inherited from the parent folder.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Write `contents` to a fresh sibling temp file, flush it and rename it over `path`.
pub fn write_config_secure_new_0600(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path has no parent: {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create parent '{}'", parent.display()))?;

    let tmp = tmp_config_sibling_name(path);
    let written = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp)
        .and_then(|mut f| {
            f.write_all(contents)?;
            f.sync_all()
        })
        .and_then(|()| fs::rename(&tmp, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("write config '{}'", path.display()));
    }
    Ok(())
}

// POSIX modes have no Windows counterpart.
pub fn set_dir_mode_0700(_path: &Path) -> io::Result<()> {
    Ok(())
}

pub fn set_file_mode_0600(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn second_open_is_sharing_violation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("held.bin");
        fs::write(&path, b"data").unwrap();

        let first = open_exclusive_rw(&path).unwrap();
        let err = open_exclusive_rw(&path).unwrap_err();
        assert!(is_lock_contention(&err), "unexpected error: {err:?}");
        drop(first);
        assert!(open_exclusive_rw(&path).is_ok());
    }
}
