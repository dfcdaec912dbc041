//! Core library for `sync_guard`.
//!
//! Safety primitives consumed by a folder-sync engine before it touches an item:
//! - transfer-safe temp names and separator-agnostic item names (`naming::path`),
//! - filename acceptance under cross-platform rules (`naming::filename`),
//! - a lock probe telling whether a local file is safe to read (`fs_ops::lock`).
//!
//! Everything here is stateless apart from immutable tables, so it can be called
//! from any number of threads. Transfers, change detection and scheduling are
//! the engine's business.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod messages;
pub mod naming;
pub mod output;
pub mod platform;
pub mod secret;
pub mod shutdown;

pub use config::{
    default_config_path, default_data_dir, default_log_path, path_has_symlink_ancestor, Config,
    LogLevel, CONFIG_ENV_VAR,
};
pub use errors::{report_error, SyncGuardError};
pub use fs_ops::{
    file_is_used, open_exclusive, path_is_file, probe_file, ExclusiveFile, LocalIndex, LockState,
};
pub use messages::{render, render_for, MessageCatalog, MessageKind};
pub use naming::{
    is_allowed_filename, item_name, local_temp_path, remote_temp_path, NamingRules, TEMP_MARKER,
};
pub use secret::{CredentialStore, SecretCodec};
