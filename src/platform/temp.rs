//! Sibling temp names for atomic config writes.
//!
//! The config file is written next to its final location and renamed into place,
//! so the temp file must share the target's directory (rename is only atomic
//! within one filesystem).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static SEQ: AtomicU64 = AtomicU64::new(0);

/// Pattern: `.sync_guard.config.tmp.<pid>.<nanos>.<seq>` in the target's parent.
pub fn tmp_config_sibling_name(target: &Path) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let name = format!(
        ".sync_guard.config.tmp.{}.{nanos}.{}",
        std::process::id(),
        SEQ.fetch_add(1, Ordering::Relaxed)
    );
    match target.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}
