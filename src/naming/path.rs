//! Path string normalization for sync items.
//!
//! Remote paths always use '/'; local paths may arrive with either '/' or '\\'.
//! These helpers work on plain strings: nothing here touches the filesystem.
//!
//! Temp names keep the item in its original parent directory and prepend
//! `TEMP_MARKER` to the final segment, so a half-written upload or download is
//! never mistaken for the finished artifact.

use crate::errors::SyncGuardError;

/// Marker prepended to an item's name while it is being transferred.
pub const TEMP_MARKER: &str = "~sg_";

const SEPARATORS: [char; 2] = ['/', '\\'];

/// Final segment of `path`, regardless of which separator style it uses.
///
/// The input is cut at the last '/', the result is cut again at its last '\\',
/// and one leading separator is dropped. A path without separators is returned
/// unchanged; a path ending in a separator yields an empty name.
pub fn item_name(path: &str) -> &str {
    let mut name = path;
    if let Some(idx) = name.rfind('/') {
        name = &name[idx..];
    }
    if let Some(idx) = name.rfind('\\') {
        name = &name[idx..];
    }
    name.strip_prefix(SEPARATORS).unwrap_or(name)
}

/// Temp path for a remote item ('/'-separated).
///
/// A bare name (no '/') has no parent, so the marker is simply prepended.
pub fn remote_temp_path(path: &str) -> String {
    match path.rfind('/') {
        None => format!("{TEMP_MARKER}{path}"),
        Some(idx) => join_temp(&path[..idx], item_name(path)),
    }
}

/// Temp path for a local item; separators are normalized to '/' first.
///
/// Fails with [`SyncGuardError::NoParentDirectory`] when the normalized path
/// has no '/' at all, since a local item must live inside the sync folder.
pub fn local_temp_path(path: &str) -> Result<String, SyncGuardError> {
    let normalized = normalize_separators(path);
    let idx = normalized
        .rfind('/')
        .ok_or_else(|| SyncGuardError::NoParentDirectory(path.to_string()))?;
    Ok(join_temp(&normalized[..idx], item_name(&normalized)))
}

/// Replace every '\\' with '/'.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// True when the final segment of `path` carries the temp marker.
pub fn is_temp_name(path: &str) -> bool {
    item_name(path).starts_with(TEMP_MARKER)
}

/// Reverse of the temp-path derivation: the finished item's path in the same parent.
///
/// Returns `None` when the final segment is not a temp name, or is the bare
/// marker with no item name after it. The parent part is left exactly as given.
pub fn strip_temp_marker(path: &str) -> Option<String> {
    let name = item_name(path);
    let bare = name.strip_prefix(TEMP_MARKER).filter(|b| !b.is_empty())?;
    let parent_len = path.len() - name.len();
    Some(format!("{}{}", &path[..parent_len], bare))
}

#[inline]
fn join_temp(parent: &str, name: &str) -> String {
    format!("{parent}/{TEMP_MARKER}{name}")
}
