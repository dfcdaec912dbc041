//! Unix implementations of platform helpers (Linux, macOS and the BSDs).

use super::temp::tmp_config_sibling_name;
use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::os::fd::AsRawFd;
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;

/// Open `path` read/write and take a non-blocking exclusive `flock`.
///
/// Unix has no share modes, so exclusivity is expressed through the advisory
/// lock: a second exclusive open of the same file fails with `EWOULDBLOCK`
/// until the first descriptor is closed or unlocked.
pub fn open_exclusive_rw(path: &Path) -> io::Result<File> {
    let f = OpenOptions::new()
        .read(true)
        .write(true)
        .custom_flags(libc::O_CLOEXEC)
        .open(path)?;
    let rc = unsafe { libc::flock(f.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if rc != 0 {
        // `f` is closed on return, nothing is left held.
        return Err(io::Error::last_os_error());
    }
    Ok(f)
}

/// Release the exclusive lock taken by [`open_exclusive_rw`]. Best-effort.
pub fn release_exclusive(file: &File) {
    let _ = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_UN) };
}

/// True when `err` means another handle currently holds the file.
pub fn is_lock_contention(err: &io::Error) -> bool {
    matches!(err.raw_os_error(), Some(code) if code == libc::EWOULDBLOCK || code == libc::EAGAIN)
}

fn chmod(path: &Path, mode: u32) -> io::Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

/// Append handle for the log file. A file created here starts out 0600; an
/// existing file keeps whatever mode an administrator gave it.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    match OpenOptions::new().append(true).create_new(true).mode(0o600).open(path) {
        Ok(f) => {
            // umask may have dropped bits we asked for, never added any
            chmod(path, 0o600)?;
            Ok(f)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            OpenOptions::new().append(true).open(path)
        }
        Err(e) => Err(e),
    }
}

/// Write `contents` to `path` with mode 0600.
///
/// The data goes to an O_EXCL sibling temp file first, which is fsynced and
/// renamed over `path`; the parent directory is fsynced afterwards. The temp
/// file is removed if the rename fails.
pub fn write_config_secure_new_0600(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path has no parent: {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create parent '{}'", parent.display()))?;

    let tmp = tmp_config_sibling_name(path);
    {
        let mut f = OpenOptions::new()
            .write(true)
            .create_new(true)
            .mode(0o600)
            .open(&tmp)
            .with_context(|| format!("create temp '{}'", tmp.display()))?;
        f.write_all(contents).context("write temp")?;
        f.sync_all().context("fsync temp")?;
    }

    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e)
            .with_context(|| format!("rename '{}' -> '{}'", tmp.display(), path.display()));
    }

    File::open(parent)
        .and_then(|d| d.sync_all())
        .with_context(|| format!("fsync dir '{}'", parent.display()))
}

pub fn set_dir_mode_0700(path: &Path) -> io::Result<()> {
    chmod(path, 0o700)
}

pub fn set_file_mode_0600(path: &Path) -> io::Result<()> {
    chmod(path, 0o600)
}
