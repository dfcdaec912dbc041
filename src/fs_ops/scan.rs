//! Pre-sync safety sweep over a local snapshot.
//!
//! Every file in a [`LocalIndex`] is probed for locks (in parallel) and every
//! item name is checked against the naming rules of the remote host. Items that
//! still carry the temp marker are reported as leftovers of an interrupted
//! transfer.

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::errors::SyncGuardError;
use crate::fs_ops::index::LocalIndex;
use crate::fs_ops::lock::{probe_file, LockState};
use crate::naming::{is_allowed_filename_for, is_temp_name, NamingRules};
use crate::shutdown;

/// A file that failed the lock probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusyFile {
    pub path: PathBuf,
    pub state: LockState,
}

/// Findings of one sweep. Paths are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub files_probed: usize,
    pub busy: Vec<BusyFile>,
    pub disallowed_names: Vec<PathBuf>,
    pub temp_leftovers: Vec<PathBuf>,
}

impl ScanReport {
    /// True when nothing needs attention before syncing.
    pub fn is_clean(&self) -> bool {
        self.busy.is_empty() && self.disallowed_names.is_empty() && self.temp_leftovers.is_empty()
    }
}

fn name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Sweep `index`, checking names against `rules`.
///
/// Stops with [`SyncGuardError::Interrupted`] if a shutdown is requested
/// while probing.
pub fn scan_index(index: &LocalIndex, rules: NamingRules) -> Result<ScanReport, SyncGuardError> {
    let files: Vec<&Path> = index.files().collect();

    let states: Vec<Option<(PathBuf, LockState)>> = files
        .par_iter()
        .map(|path| {
            if shutdown::is_requested() {
                return None;
            }
            Some((path.to_path_buf(), probe_file(path)))
        })
        .collect();

    if let Err(e) = shutdown::checkpoint() {
        warn!(root = %index.root().display(), "scan interrupted");
        return Err(e);
    }

    let mut report = ScanReport {
        files_probed: files.len(),
        ..Default::default()
    };
    for (path, state) in states.into_iter().flatten() {
        if state.is_in_use() {
            debug!(path = %path.display(), state = %state, "busy file");
            report.busy.push(BusyFile { path, state });
        }
    }

    // links are name-checked but never probed
    for path in index.files().chain(index.folders()).chain(index.links()) {
        let name = name_of(path);
        if !is_allowed_filename_for(&name, rules) {
            report.disallowed_names.push(path.to_path_buf());
        }
        if is_temp_name(&name) {
            report.temp_leftovers.push(path.to_path_buf());
        }
    }

    report.busy.sort_by(|a, b| a.path.cmp(&b.path));
    report.disallowed_names.sort();
    report.temp_leftovers.sort();

    info!(
        root = %index.root().display(),
        probed = report.files_probed,
        busy = report.busy.len(),
        disallowed = report.disallowed_names.len(),
        leftovers = report.temp_leftovers.len(),
        "scan finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_ops::lock::open_exclusive;
    use assert_fs::prelude::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn clean_tree_reports_nothing() {
        shutdown::reset();
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a.txt").write_str("a").unwrap();
        temp.child("nested/b.txt").write_str("b").unwrap();

        let index = LocalIndex::scan(temp.path()).unwrap();
        let report = scan_index(&index, NamingRules::Windows).unwrap();
        assert_eq!(report.files_probed, 2);
        assert!(report.is_clean(), "{report:?}");
    }

    #[test]
    #[serial]
    fn finds_busy_files_bad_names_and_leftovers() {
        shutdown::reset();
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("held.bin").write_str("x").unwrap();
        temp.child("aux").write_str("x").unwrap();
        temp.child("~sg_upload.txt").write_str("x").unwrap();

        let index = LocalIndex::scan(temp.path()).unwrap();
        let root = index.root().to_path_buf();
        let _guard = open_exclusive(&root.join("held.bin")).unwrap();

        let report = scan_index(&index, NamingRules::Unix).unwrap();
        assert_eq!(report.busy.len(), 1);
        assert_eq!(report.busy[0].path, root.join("held.bin"));
        assert_eq!(report.busy[0].state, LockState::Locked);
        assert_eq!(report.disallowed_names, vec![root.join("aux")]);
        assert_eq!(report.temp_leftovers, vec![root.join("~sg_upload.txt")]);
        assert!(!report.is_clean());
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn symlink_names_are_checked_without_probing() {
        shutdown::reset();
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("target.txt").write_str("x").unwrap();
        let target = temp.path().join("target.txt");
        std::os::unix::fs::symlink(&target, temp.path().join("CON")).unwrap();
        std::os::unix::fs::symlink(&target, temp.path().join("~sg_x")).unwrap();

        let index = LocalIndex::scan(temp.path()).unwrap();
        let root = index.root().to_path_buf();
        assert_eq!(index.links().count(), 2);

        let report = scan_index(&index, NamingRules::Unix).unwrap();
        assert_eq!(report.files_probed, 1);
        assert_eq!(report.disallowed_names, vec![root.join("CON")]);
        assert_eq!(report.temp_leftovers, vec![root.join("~sg_x")]);
    }

    #[test]
    #[serial]
    fn shutdown_interrupts_scan() {
        shutdown::reset();
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a.txt").write_str("a").unwrap();
        let index = LocalIndex::scan(temp.path()).unwrap();

        shutdown::request();
        let err = scan_index(&index, NamingRules::host()).unwrap_err();
        assert!(matches!(err, SyncGuardError::Interrupted));
        shutdown::reset();
    }
}
