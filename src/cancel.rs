use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag a running transcode polls between code points.
///
/// Clones observe the same flag, so one clone can be handed to another thread
/// (a signal handler, a timeout) while the transcode holds the other.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
