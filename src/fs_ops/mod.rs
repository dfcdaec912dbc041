//! Filesystem-facing operations: lock probes, local snapshots and the pre-sync sweep.

pub mod index;
pub mod lock;
pub mod scan;

pub use index::{path_is_file, LocalIndex};
pub use lock::{file_is_used, open_exclusive, probe_file, ExclusiveFile, LockState};
pub use scan::{scan_index, BusyFile, ScanReport};
