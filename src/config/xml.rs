//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Creates a secure template if missing (unless SYNC_GUARD_CONFIG is set).
//!
//! Notes:
//! - Unknown XML fields are rejected so misconfigurations surface early.
//! - Empty or whitespace-only values are treated as absent.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{parse_naming_rules, Config, LogLevel};
use super::CONFIG_ENV_VAR;
use crate::errors::SyncGuardError;
use crate::platform::{set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    local_root: Option<String>,
    language: Option<String>,
    remote_rules: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
}

/// What `load_or_init` found.
#[derive(Debug)]
pub enum LoadResult {
    /// A config file existed and was parsed.
    Loaded(Config),
    /// No config existed at the default location; a template was written there.
    CreatedTemplate(PathBuf),
    /// No config file; defaults apply.
    Defaults,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// Map XmlConfig -> Config. Invalid enum-like values are config errors, not silent defaults.
fn xml_to_config(parsed: XmlConfig) -> Result<Config, SyncGuardError> {
    let mut cfg = Config::default();

    cfg.local_root = non_empty(parsed.local_root).map(PathBuf::from);
    if let Some(lang) = non_empty(parsed.language) {
        cfg.language = lang;
    }
    if let Some(raw) = non_empty(parsed.remote_rules) {
        cfg.remote_rules = parse_naming_rules(&raw)
            .ok_or_else(|| SyncGuardError::Config(format!("unknown remote_rules '{raw}'")))?;
    }
    if let Some(raw) = non_empty(parsed.log_level) {
        cfg.log_level = raw.parse::<LogLevel>().map_err(SyncGuardError::Config)?;
    }
    if let Some(file) = non_empty(parsed.log_file) {
        cfg.log_file = Some(PathBuf::from(file));
    }
    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig =
        from_xml_str(&contents).with_context(|| format!("parse config xml '{}'", path.display()))?;
    let cfg = xml_to_config(parsed)
        .with_context(|| format!("invalid config '{}'", path.display()))?;
    debug!(path = %path.display(), "config loaded");
    Ok(cfg)
}

/// Load the config from its resolved location, creating a template on first run.
///
/// A template is only written at the default location; an explicit
/// `SYNC_GUARD_CONFIG` that points nowhere is an error.
pub fn load_or_init() -> Result<LoadResult> {
    let env_set = env::var_os(CONFIG_ENV_VAR).is_some();
    let path = default_config_path()?;

    if path.exists() {
        return load_config_from_xml_path(&path).map(LoadResult::Loaded);
    }
    if env_set {
        anyhow::bail!(
            "{} points to '{}', which does not exist",
            CONFIG_ENV_VAR,
            path.display()
        );
    }
    match create_template_config(&path) {
        Ok(()) => Ok(LoadResult::CreatedTemplate(path)),
        Err(e) => {
            debug!(error = %e, "could not write template config; using defaults");
            Ok(LoadResult::Defaults)
        }
    }
}

/// Create default template config file and parent directory (best-effort permissions).
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        anyhow::bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        let _ = set_dir_mode_0700(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/debug.log".into());

    let content = format!(
        r#"<!--
  sync_guard configuration (XML)

    local_root    -> local folder mirrored to the server (default for `scan`)
    language      -> language prefix for notification messages
    remote_rules  -> naming rules of the remote host: windows | unix
    log_level     -> quiet | normal | info | debug
    log_file      -> path to log file (optional; stderr still used)

  CLI flags override XML values.
-->
<config>
  <local_root></local_root>
  <language>{}</language>
  <remote_rules>windows</remote_rules>
  <log_level>normal</log_level>
  <log_file>{}</log_file>
</config>
"#,
        super::DEFAULT_LANGUAGE,
        suggested_log
    );

    write_config_secure_new_0600(path, content.as_bytes())?;
    let _ = set_file_mode_0600(path);

    info!("Created template config at {}", path.display());
    Ok(())
}
