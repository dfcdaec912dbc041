//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - Global flags override values from config.xml.

use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::types::{Config, LogLevel};
use crate::naming::NamingRules;

/// Inspect sync items: names, temp paths, filename checks and lock probes.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Transfer-safety checks for a folder-sync client")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        global = true,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(
        long,
        global = true,
        value_parser = LogLevel::from_str,
        help = "Set log level: quiet, normal, info, debug"
    )]
    pub log_level: Option<LogLevel>,

    /// Write logs to this file in addition to stderr.
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where sync_guard will look for the config file, then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the item name (last path segment) of PATH.
    Name {
        #[arg(value_name = "PATH")]
        path: String,
    },
    /// Print the transfer temp path for PATH.
    TempPath {
        #[arg(value_name = "PATH")]
        path: String,
        /// Treat PATH as a local path ('\' accepted and normalized to '/').
        #[arg(long)]
        local: bool,
    },
    /// Check whether names are acceptable on the remote host.
    CheckName {
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,
        /// Naming rules to check against (default: from config).
        #[arg(long, value_enum)]
        rules: Option<RulesArg>,
    },
    /// Probe local files for locks.
    Probe {
        #[arg(value_name = "PATH", required = true, value_hint = ValueHint::FilePath)]
        paths: Vec<PathBuf>,
    },
    /// Snapshot a folder and report busy files, bad names and temp leftovers.
    Scan {
        /// Folder to scan (default: local_root from config).
        #[arg(value_name = "DIR", value_hint = ValueHint::DirPath)]
        dir: Option<PathBuf>,
        /// Naming rules to check against (default: from config).
        #[arg(long, value_enum)]
        rules: Option<RulesArg>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulesArg {
    Windows,
    Unix,
    Host,
}

impl From<RulesArg> for NamingRules {
    fn from(r: RulesArg) -> Self {
        match r {
            RulesArg::Windows => NamingRules::Windows,
            RulesArg::Unix => NamingRules::Unix,
            RulesArg::Host => NamingRules::host(),
        }
    }
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(file) = &self.log_file {
            cfg.log_file = Some(file.clone());
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
