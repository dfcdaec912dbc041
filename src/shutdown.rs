//! Interrupt flag shared between the ctrlc handler and long sweeps.
//!
//! The flag only ever goes from clear to set in production, so relaxed
//! ordering is enough; `request()` does no allocation and may run in the
//! handler thread.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::SyncGuardError;

static STOP: AtomicBool = AtomicBool::new(false);

/// Ask running sweeps to stop at their next checkpoint.
pub fn request() {
    STOP.store(true, Ordering::Relaxed);
}

pub fn is_requested() -> bool {
    STOP.load(Ordering::Relaxed)
}

/// `Err(Interrupted)` once a stop has been requested.
pub fn checkpoint() -> Result<(), SyncGuardError> {
    if is_requested() {
        Err(SyncGuardError::Interrupted)
    } else {
        Ok(())
    }
}

#[cfg(any(test, feature = "test-helpers"))]
pub fn reset() {
    STOP.store(false, Ordering::Relaxed);
}
