//! Typed error definitions for sync_guard.
//! Provides a small set of well-known failure modes for better logs and tests,
//! plus the boundary reporter that records escaped errors without aborting.

use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum SyncGuardError {
    #[error("Path has no parent directory after separator normalization: '{0}'")]
    NoParentDirectory(String),

    #[error("Message '{kind}' expects {expected} argument(s), got {actual}")]
    MessageArity {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Secret codec failure: {0}")]
    Secret(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl SyncGuardError {
    /// Stable numeric code for structured logs and exit statuses.
    pub fn code(&self) -> u16 {
        match self {
            SyncGuardError::NoParentDirectory(_) => 10,
            SyncGuardError::MessageArity { .. } => 20,
            SyncGuardError::Secret(_) => 30,
            SyncGuardError::Config(_) => 40,
            SyncGuardError::Interrupted => 130,
        }
    }
}

/// Record an error that escaped to an outer boundary, then let execution continue.
///
/// Logs the message, the originating component, every cause in the chain and
/// any caller-supplied key/value diagnostics at error level. Whether the failure
/// is fatal is left to the caller.
pub fn report_error(component: &str, err: &anyhow::Error, data: &[(&str, &str)]) {
    let code = err.downcast_ref::<SyncGuardError>().map(SyncGuardError::code);
    error!(component, code, error = %err, "unhandled error");
    for (depth, cause) in err.chain().skip(1).enumerate() {
        error!(component, depth = depth + 1, cause = %cause, "caused by");
    }
    for (key, value) in data {
        error!(component, key = *key, value = *value, "diagnostic");
    }
}
