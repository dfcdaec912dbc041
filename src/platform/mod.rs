//! Platform-specific helpers.
//! This module hides OS differences (Unix/Windows) behind a uniform API so
//! the rest of the codebase can remain platform-agnostic.

mod temp;
#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::{
    is_lock_contention, open_exclusive_rw, open_log_file_secure_append, release_exclusive,
    set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600,
};

#[cfg(windows)]
pub use windows::{
    is_lock_contention, open_exclusive_rw, open_log_file_secure_append, release_exclusive,
    set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600,
};
