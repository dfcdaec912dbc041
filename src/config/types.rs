//! Settings read from config.xml, plus the small enums they parse into.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::naming::NamingRules;

use super::DEFAULT_LANGUAGE;
use super::paths;

/// Console verbosity as users spell it in config.xml and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Quiet,
    #[default]
    Normal,
    Info,
    Debug,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Quiet,
        LogLevel::Normal,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    // Accepted spellings; the canonical name comes first.
    fn spellings(self) -> &'static [&'static str] {
        match self {
            LogLevel::Quiet => &["quiet", "error", "none"],
            LogLevel::Normal => &["normal"],
            LogLevel::Info => &["info", "verbose", "detailed"],
            LogLevel::Debug => &["debug", "trace"],
        }
    }

    /// Case-insensitive lookup of any accepted spelling.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|lvl| lvl.spellings().iter().any(|name| name.eq_ignore_ascii_case(s)))
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!("unknown log_level '{s}' (expected quiet, normal, info or debug)")
        })
    }
}

/// Parse a remote naming convention name ("windows" / "unix", case-insensitive).
pub fn parse_naming_rules(s: &str) -> Option<NamingRules> {
    match s.trim().to_ascii_lowercase().as_str() {
        "windows" | "win" | "dos" => Some(NamingRules::Windows),
        "unix" | "posix" | "linux" => Some(NamingRules::Unix),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Folder `scan` sweeps when none is given.
    pub local_root: Option<PathBuf>,
    /// Prefix for message catalog keys (`<language>/tray/<key>`); see `messages::render_for`.
    pub language: String,
    /// Naming convention enforced for names sent to the remote host.
    pub remote_rules: NamingRules,
    pub log_level: LogLevel,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            local_root: None,
            language: DEFAULT_LANGUAGE.to_string(),
            remote_rules: NamingRules::Windows,
            log_level: LogLevel::Normal,
            log_file: paths::default_log_path().ok(),
        }
    }
}
