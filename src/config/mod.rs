//! Config module.
//! Provides configuration types, default paths and XML loading.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{default_config_path, default_data_dir, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{create_template_config, load_config_from_xml_path, load_or_init, LoadResult};

/// Environment variable naming an explicit config file (or a directory holding config.xml).
pub const CONFIG_ENV_VAR: &str = "SYNC_GUARD_CONFIG";
/// Directory name used under the platform config/data dirs.
pub const APP_DIR_NAME: &str = "sync_guard";
pub const DEFAULT_LANGUAGE: &str = "en";
