//! Snapshot of the local sync folder.
//!
//! The sync engine keeps a record of which local paths are files and which are
//! folders, so it can still classify an item after it has been deleted from disk.
//! `LocalIndex` is that record as an owned value: built once per listing pass and
//! passed to whatever needs it, never shared as hidden global state.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Files and folders found under `root` at the time of the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalIndex {
    root: PathBuf,
    files: BTreeSet<PathBuf>,
    folders: BTreeSet<PathBuf>,
    links: BTreeSet<PathBuf>,
}

impl LocalIndex {
    /// Empty index for `root`; populate with [`LocalIndex::insert_file`] and
    /// [`LocalIndex::insert_folder`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Walk `root` (symlinks not followed) and record every file and folder below it.
    ///
    /// The root is canonicalized first; entries that cannot be read are skipped
    /// with a warning rather than failing the whole snapshot.
    pub fn scan(root: &Path) -> Result<Self> {
        let root = dunce::canonicalize(root)
            .with_context(|| format!("Cannot resolve sync folder '{}'", root.display()))?;
        if !fs::metadata(&root)?.is_dir() {
            anyhow::bail!("Sync folder is not a directory: {}", root.display());
        }

        let mut index = LocalIndex::new(&root);
        for entry in WalkDir::new(&root).min_depth(1).follow_links(false) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry during scan");
                    continue;
                }
            };
            let ft = entry.file_type();
            if ft.is_dir() {
                index.folders.insert(entry.into_path());
            } else if ft.is_file() {
                index.files.insert(entry.into_path());
            } else if ft.is_symlink() {
                index.links.insert(entry.into_path());
            }
        }
        debug!(
            root = %index.root.display(),
            files = index.files.len(),
            folders = index.folders.len(),
            links = index.links.len(),
            "local index built"
        );
        Ok(index)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn insert_file(&mut self, path: impl Into<PathBuf>) {
        self.files.insert(path.into());
    }

    pub fn insert_folder(&mut self, path: impl Into<PathBuf>) {
        self.folders.insert(path.into());
    }

    pub fn contains_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    pub fn contains_folder(&self, path: &Path) -> bool {
        self.folders.contains(path)
    }

    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }

    pub fn folders(&self) -> impl Iterator<Item = &Path> {
        self.folders.iter().map(PathBuf::as_path)
    }

    /// Symlinks found by [`LocalIndex::scan`]; they are never followed.
    pub fn links(&self) -> impl Iterator<Item = &Path> {
        self.links.iter().map(PathBuf::as_path)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    /// Path relative to the snapshot root, '/'-separated, as used for the remote side.
    pub fn relative(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<_> = rel.components().map(|c| c.as_os_str().to_string_lossy()).collect();
        Some(parts.join("/"))
    }
}

/// Whether `path` is a file.
///
/// The filesystem is asked first. When the item no longer exists (or cannot be
/// stat'ed) the snapshot decides: anything it does not list as a folder is a file.
pub fn path_is_file(path: &Path, index: &LocalIndex) -> bool {
    match fs::metadata(path) {
        Ok(meta) => !meta.is_dir(),
        Err(_) => !index.contains_folder(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn scan_records_files_and_folders() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a.txt").write_str("a").unwrap();
        temp.child("sub/b.txt").write_str("b").unwrap();
        temp.child("sub/deeper").create_dir_all().unwrap();

        let index = LocalIndex::scan(temp.path()).unwrap();
        let root = index.root().to_path_buf();
        assert_eq!(index.file_count(), 2);
        assert_eq!(index.folder_count(), 2);
        assert!(index.contains_file(&root.join("a.txt")));
        assert!(index.contains_file(&root.join("sub").join("b.txt")));
        assert!(index.contains_folder(&root.join("sub").join("deeper")));
        assert!(!index.contains_folder(&root));
    }

    #[test]
    fn scan_rejects_missing_root() {
        let temp = assert_fs::TempDir::new().unwrap();
        assert!(LocalIndex::scan(&temp.path().join("gone")).is_err());
    }

    #[test]
    fn scan_rejects_file_root() {
        let temp = assert_fs::TempDir::new().unwrap();
        let f = temp.child("plain.txt");
        f.write_str("x").unwrap();
        assert!(LocalIndex::scan(f.path()).is_err());
    }

    #[test]
    fn path_is_file_uses_disk_then_snapshot() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("f.txt");
        file.write_str("x").unwrap();
        let folder = temp.child("d");
        folder.create_dir_all().unwrap();

        let mut index = LocalIndex::new(temp.path());
        assert!(path_is_file(file.path(), &index));
        assert!(!path_is_file(folder.path(), &index));

        let deleted_folder = temp.path().join("was_a_folder");
        let deleted_file = temp.path().join("was_a_file.txt");
        index.insert_folder(&deleted_folder);
        assert!(!path_is_file(&deleted_folder, &index));
        assert!(path_is_file(&deleted_file, &index));

        index.insert_file(&deleted_file);
        assert!(index.contains_file(&deleted_file));
        assert!(!index.contains_folder(&deleted_file));
        assert!(path_is_file(&deleted_file, &index));
    }

    #[test]
    fn relative_paths_use_forward_slashes() {
        let index = LocalIndex::new("/sync");
        assert_eq!(
            index.relative(Path::new("/sync/docs/notes.txt")).as_deref(),
            Some("docs/notes.txt")
        );
        assert_eq!(index.relative(Path::new("/elsewhere/x")), None);
    }
}
