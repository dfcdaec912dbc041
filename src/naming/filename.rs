//! Filename acceptance checks.
//!
//! A name that is legal on the local filesystem may still be rejected by the
//! remote host, so callers check names before creating or renaming remote items.
//! Legacy device names are rejected even when every character is legal.

/// Device names reserved by legacy DOS/Windows conventions (compared case-insensitively).
pub const RESERVED_NAMES: [&str; 25] = [
    "CON", "PRN", "AUX", "CLOCK$", "NUL", "COM0", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6",
    "COM7", "COM8", "COM9", "LPT0", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8",
    "LPT9",
];

const WINDOWS_INVALID: [char; 9] = ['"', '<', '>', '|', ':', '*', '?', '\\', '/'];

/// Which filesystem naming convention a name is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingRules {
    /// `" < > | : * ? \ /` and control characters are invalid.
    Windows,
    /// Only '/' and NUL are invalid.
    Unix,
}

impl NamingRules {
    /// Rules of the platform this process runs on.
    pub const fn host() -> Self {
        if cfg!(windows) {
            NamingRules::Windows
        } else {
            NamingRules::Unix
        }
    }

    /// Whether `ch` may appear in a filename under these rules.
    pub fn allows_char(self, ch: char) -> bool {
        match self {
            NamingRules::Windows => (ch as u32) >= 0x20 && !WINDOWS_INVALID.contains(&ch),
            NamingRules::Unix => ch != '/' && ch != '\0',
        }
    }
}

/// True if `name` is one of [`RESERVED_NAMES`], ignoring ASCII case.
pub fn is_reserved_name(name: &str) -> bool {
    RESERVED_NAMES.iter().any(|r| r.eq_ignore_ascii_case(name))
}

/// Check `name` against the host's invalid-character set and the reserved-name table.
pub fn is_allowed_filename(name: &str) -> bool {
    is_allowed_filename_for(name, NamingRules::host())
}

/// Check `name` against an explicit target convention.
pub fn is_allowed_filename_for(name: &str, rules: NamingRules) -> bool {
    name.chars().all(|c| rules.allows_char(c)) && !is_reserved_name(name)
}
