use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Cooperative cancellation flag shared between a caller and a running scan.
///
/// Clones share the same flag. Long loops
/// ([`sample_path_with`](crate::orbit_sampler::sample_path_with),
/// [`closest_approach_with`](crate::close_approach::closest_approach_with)) check it once
/// per iteration and bail out with [`NeoError::Cancelled`](crate::neo_errors::NeoError::Cancelled).
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// `true` if an optional token has been triggered.
#[inline]
pub(crate) fn is_cancelled(token: Option<&CancellationToken>) -> bool {
    token.is_some_and(CancellationToken::is_cancelled)
}
