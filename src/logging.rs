//! Subscriber setup for the binary.
//!
//! The level comes from `LogLevel` only; `RUST_LOG` is not consulted. File
//! logging is refused when any ancestor of the log path is a symlink.

use anyhow::Result;
use chrono::Local;
use std::fmt as stdfmt;
use std::path::Path;
use sync_guard::output as out;
use sync_guard::platform::open_log_file_secure_append;
use sync_guard::{path_has_symlink_ancestor, LogLevel};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;
use tracing_subscriber::util::SubscriberInitExt;

/// Local wall-clock stamp, `DD/MM/YY HH:MM:SS`.
struct LocalStamp;

impl FormatTime for LocalStamp {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

// Each user-facing level shows one tracing level more than its name suggests,
// so `info` surfaces the per-file probe lines.
fn to_level_filter(lvl: LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Quiet => LevelFilter::ERROR,
        LogLevel::Normal => LevelFilter::INFO,
        LogLevel::Info => LevelFilter::DEBUG,
        LogLevel::Debug => LevelFilter::TRACE,
    }
}

/// Non-blocking appender for `path`, or the reason file logging is skipped.
fn file_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard), String> {
    match path_has_symlink_ancestor(path) {
        Ok(false) => {}
        Ok(true) => return Err(format!("ancestor of {} is a symlink", path.display())),
        Err(e) => return Err(format!("cannot check {} for symlinks: {e}", path.display())),
    }
    open_log_file_secure_append(path)
        .map(tracing_appender::non_blocking)
        .map_err(|e| format!("cannot open {}: {e}", path.display()))
}

/// Install the global subscriber.
///
/// Console output goes to stderr (compact, or JSON with `json`). When `log_file`
/// is usable a plain-text file layer is added; the returned guard must outlive
/// every log call or buffered lines are lost.
pub fn init_tracing(
    lvl: LogLevel,
    log_file: Option<&Path>,
    json: bool,
) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::default().add_directive(to_level_filter(lvl).into());

    let mut guard = None;
    let file_layer = log_file
        .and_then(|path| match file_writer(path) {
            Ok(pair) => Some(pair),
            Err(reason) => {
                out::print_warn(&format!("File logging disabled: {reason}"));
                None
            }
        })
        .map(|(writer, g)| {
            guard = Some(g);
            tsfmt::layer()
                .with_timer(LocalStamp)
                .with_thread_ids(true)
                .with_ansi(false)
                .with_writer(writer)
        });

    let json_layer = json.then(|| {
        tsfmt::layer()
            .event_format(tsfmt::format().json())
            .with_timer(LocalStamp)
            .with_writer(std::io::stderr)
    });
    let compact_layer = (!json).then(|| {
        tsfmt::layer()
            .compact()
            .with_timer(LocalStamp)
            .with_writer(std::io::stderr)
    });

    registry()
        .with(filter)
        .with(json_layer)
        .with(compact_layer)
        .with(file_layer)
        .try_init()?;
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_one_step_more_verbose() {
        assert_eq!(to_level_filter(LogLevel::Quiet), LevelFilter::ERROR);
        assert_eq!(to_level_filter(LogLevel::Normal), LevelFilter::INFO);
        assert_eq!(to_level_filter(LogLevel::Info), LevelFilter::DEBUG);
        assert_eq!(to_level_filter(LogLevel::Debug), LevelFilter::TRACE);
    }
}
