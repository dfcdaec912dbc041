//! User-facing console lines for the `sync_guard` binary.
//!
//! Status lines carry a short tag (`info:`, `ok:`, `warn:`, `error:`); result
//! lines are tab-separated so they can be piped into `cut` or `awk`. Color is
//! only applied when the receiving stream is a terminal.

use owo_colors::OwoColorize;

#[derive(Clone, Copy)]
enum Tag {
    Info,
    Ok,
    Warn,
    Error,
}

impl Tag {
    fn text(self) -> &'static str {
        match self {
            Tag::Info => "info:",
            Tag::Ok => "ok:",
            Tag::Warn => "warn:",
            Tag::Error => "error:",
        }
    }

    // warnings and errors never mix into scriptable stdout
    fn to_stderr(self) -> bool {
        matches!(self, Tag::Warn | Tag::Error)
    }

    fn painted(self) -> String {
        let t = self.text();
        match self {
            Tag::Info => t.cyan().bold().to_string(),
            Tag::Ok => t.green().bold().to_string(),
            Tag::Warn => t.yellow().bold().to_string(),
            Tag::Error => t.red().bold().to_string(),
        }
    }
}

fn is_tty(stderr: bool) -> bool {
    if stderr {
        atty::is(atty::Stream::Stderr)
    } else {
        atty::is(atty::Stream::Stdout)
    }
}

fn emit(tag: Tag, msg: &str) {
    let stderr = tag.to_stderr();
    let line = if is_tty(stderr) {
        format!("{} {msg}", tag.painted())
    } else {
        format!("{} {msg}", tag.text())
    };
    if stderr {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn print_info(msg: &str) {
    emit(Tag::Info, msg);
}

pub fn print_success(msg: &str) {
    emit(Tag::Ok, msg);
}

pub fn print_warn(msg: &str) {
    emit(Tag::Warn, msg);
}

pub fn print_error(msg: &str) {
    emit(Tag::Error, msg);
}

/// One result line: `<label>\t<detail>`. On a terminal the label is green when
/// `ok` and bold red otherwise.
pub fn print_verdict(ok: bool, label: &str, detail: &str) {
    if !is_tty(false) {
        println!("{label}\t{detail}");
    } else if ok {
        println!("{}\t{detail}", label.green());
    } else {
        println!("{}\t{detail}", label.red().bold());
    }
}

/// Bare result line (item names, temp paths).
pub fn print_user(msg: &str) {
    println!("{msg}");
}
