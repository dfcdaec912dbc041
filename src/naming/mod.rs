//! Name handling for sync items: path normalization, temp names and filename checks.

pub mod filename;
pub mod path;

pub use filename::{
    is_allowed_filename, is_allowed_filename_for, is_reserved_name, NamingRules, RESERVED_NAMES,
};
pub use path::{
    is_temp_name, item_name, local_temp_path, normalize_separators, remote_temp_path,
    strip_temp_marker,
    TEMP_MARKER,
};
