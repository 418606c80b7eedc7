use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Process-wide "willing to serve" flag.
///
/// Created once at startup and handed explicitly to whoever needs it: the
/// readiness check reads it, the startup/shutdown orchestration writes it.
/// Clones share the same flag.
#[derive(Debug, Clone)]
pub struct ReadinessState {
    ready: Arc<AtomicBool>,
}

impl ReadinessState {
    pub fn new(ready: bool) -> Self {
        Self {
            ready: Arc::new(AtomicBool::new(ready)),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn set_ready(&self, ready: bool) {
        let previous = self.ready.swap(ready, Ordering::AcqRel);
        if previous != ready {
            tracing::info!(ready, "Readiness state changed");
        }
    }
}

impl Default for ReadinessState {
    fn default() -> Self {
        Self::new(true)
    }
}
