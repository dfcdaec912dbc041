//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler and
//! dispatches the requested command.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use sync_guard::cli::{Args, Command};
use sync_guard::config::{default_config_path, load_or_init, LoadResult};
use sync_guard::fs_ops::{probe_file, scan_index, LocalIndex};
use sync_guard::naming::{
    is_allowed_filename_for, is_reserved_name, item_name, local_temp_path, remote_temp_path,
    NamingRules,
};
use sync_guard::output as out;
use sync_guard::{report_error, shutdown, Config, SyncGuardError, CONFIG_ENV_VAR};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<ExitCode> {
    if args.print_config {
        return print_config();
    }

    let mut cfg = match load_or_init()? {
        LoadResult::Loaded(cfg) => cfg,
        LoadResult::CreatedTemplate(path) => {
            out::print_success(&format!(
                "A template sync_guard config was written to: {}",
                path.display()
            ));
            out::print_info("Set `local_root` in it to enable `scan` without arguments.");
            Config::default()
        }
        LoadResult::Defaults => Config::default(),
    };
    args.apply_overrides(&mut cfg);

    let guard_opt = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    // Dropping the guard on Ctrl-C flushes buffered file logs.
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; shutting down gracefully...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })
        .context("failed to install signal handler")?;
    }

    debug!("Starting sync_guard: {:?}", args);

    let result = match args.command.clone() {
        Some(cmd) => dispatch(&cfg, cmd),
        None => {
            out::print_info("No command given; see --help.");
            Ok(ExitCode::SUCCESS)
        }
    };

    // Reported once here; main only sees the exit code.
    let code = result.unwrap_or_else(|e| {
        report_error("app", &e, &[]);
        failure_code(&e)
    });

    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }
    Ok(code)
}

/// Exit status for a failed command: the typed error's code, else 2.
/// 1 is reserved for "ran fine, found problems".
fn failure_code(err: &anyhow::Error) -> ExitCode {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<SyncGuardError>())
        .and_then(|e| u8::try_from(e.code()).ok())
        .map_or(ExitCode::from(2), ExitCode::from)
}

fn print_config() -> Result<ExitCode> {
    if let Some(cfg_env) = std::env::var_os(CONFIG_ENV_VAR) {
        out::print_info(&format!(
            "Using {CONFIG_ENV_VAR} (explicit):\n  {}\n",
            PathBuf::from(cfg_env).display()
        ));
        return Ok(ExitCode::SUCCESS);
    }
    let p = default_config_path()?;
    out::print_info(&format!("Default sync_guard config path:\n  {}\n", p.display()));
    if p.exists() {
        out::print_info("A config file already exists at that location.");
    } else {
        out::print_info("No config file exists there yet. Run any command to create a template.");
    }
    Ok(ExitCode::SUCCESS)
}

fn verdict(clean: bool) -> ExitCode {
    if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn dispatch(cfg: &Config, cmd: Command) -> Result<ExitCode> {
    match cmd {
        Command::Name { path } => {
            out::print_user(item_name(&path));
            Ok(ExitCode::SUCCESS)
        }
        Command::TempPath { path, local } => {
            let temp = if local { local_temp_path(&path)? } else { remote_temp_path(&path) };
            out::print_user(&temp);
            Ok(ExitCode::SUCCESS)
        }
        Command::CheckName { names, rules } => {
            let rules: NamingRules = rules.map(Into::into).unwrap_or(cfg.remote_rules);
            let mut all_ok = true;
            for name in &names {
                let ok = is_allowed_filename_for(name, rules);
                all_ok &= ok;
                let detail = match (ok, is_reserved_name(name)) {
                    (true, _) => "allowed".to_string(),
                    (false, true) => "rejected (reserved device name)".to_string(),
                    (false, false) => "rejected (invalid character)".to_string(),
                };
                out::print_verdict(ok, name, &detail);
            }
            Ok(verdict(all_ok))
        }
        Command::Probe { paths } => {
            let mut all_free = true;
            for path in &paths {
                let state = probe_file(path);
                all_free &= !state.is_in_use();
                out::print_verdict(
                    !state.is_in_use(),
                    &path.display().to_string(),
                    &state.to_string(),
                );
            }
            Ok(verdict(all_free))
        }
        Command::Scan { dir, rules } => {
            let root = dir
                .or_else(|| cfg.local_root.clone())
                .ok_or_else(|| {
                    SyncGuardError::Config("no folder given and no local_root configured".into())
                })?;
            let rules: NamingRules = rules.map(Into::into).unwrap_or(cfg.remote_rules);
            let index = LocalIndex::scan(&root)?;
            let report = scan_index(&index, rules)?;

            for busy in &report.busy {
                let detail = format!("{} ({})", busy.path.display(), busy.state);
                out::print_verdict(false, "busy", &detail);
            }
            for path in &report.disallowed_names {
                out::print_verdict(false, "bad-name", &path.display().to_string());
            }
            for path in &report.temp_leftovers {
                out::print_verdict(false, "leftover", &path.display().to_string());
            }
            info!(root = %index.root().display(), clean = report.is_clean(), "scan complete");
            if report.is_clean() {
                out::print_success(&format!(
                    "{} file(s), {} folder(s) ready to sync",
                    index.file_count(),
                    index.folder_count()
                ));
            }
            Ok(verdict(report.is_clean()))
        }
    }
}
