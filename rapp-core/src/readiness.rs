//! Process-wide readiness flag
//!
//! Written once by the registration sequencer, read by the readiness probe.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared boolean that only ever goes from `false` to `true`
#[derive(Debug, Clone, Default)]
pub struct ReadinessFlag {
    ready: Arc<AtomicBool>,
}

impl ReadinessFlag {
    /// New flag, not ready
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the startup handshake has completed
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Set the flag; returns `true` only for the call that flipped it
    pub fn mark_ready(&self) -> bool {
        self.ready
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}
