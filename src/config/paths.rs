//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/data/log paths and detects symlinked ancestors for safety.

use anyhow::{anyhow, Result};
use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{APP_DIR_NAME, CONFIG_ENV_VAR};

fn home_fallback(parts: &[&str]) -> Result<PathBuf> {
    let home = env::var_os("HOME")
        .ok_or_else(|| anyhow!("neither a platform directory nor $HOME is available"))?;
    Ok(parts.iter().fold(PathBuf::from(home), |acc, p| acc.join(p)))
}

/// Config file location: `$SYNC_GUARD_CONFIG` if set, else `<config dir>/sync_guard/config.xml`.
///
/// A relative override is resolved against the current directory; an override
/// naming an existing directory means `config.xml` inside it.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(raw) = env::var_os(CONFIG_ENV_VAR) {
        let mut p = PathBuf::from(raw);
        if p.is_relative() {
            p = env::current_dir()?.join(p);
        }
        if p.is_dir() {
            p.push("config.xml");
        }
        return Ok(p);
    }
    match config_dir() {
        Some(base) => Ok(base.join(APP_DIR_NAME).join("config.xml")),
        None => home_fallback(&[".config", APP_DIR_NAME, "config.xml"]),
    }
}

/// Per-user application data folder (`<data dir>/sync_guard`).
pub fn default_data_dir() -> Result<PathBuf> {
    match data_dir() {
        Some(base) => Ok(base.join(APP_DIR_NAME)),
        None => home_fallback(&[".local", "share", APP_DIR_NAME]),
    }
}

/// Debug log file inside the application data folder.
pub fn default_log_path() -> Result<PathBuf> {
    Ok(default_data_dir()?.join("debug.log"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() && fs::symlink_metadata(anc)?.file_type().is_symlink() {
            return Ok(true);
        }
        p = anc.parent();
    }
    Ok(false)
}
