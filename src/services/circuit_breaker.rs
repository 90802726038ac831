// src/services/circuit_breaker.rs
//
// Secondary provider breaker
//
// Once the secondary provider reports an exhausted quota, every remaining
// line of the batch skips it. A new batch starts with a fresh breaker.

/// Session-scoped, one-way breaker for the secondary provider
#[derive(Debug, Default)]
pub struct SecondaryBreaker {
    open: bool,
}

impl SecondaryBreaker {
    /// Starts closed
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opens the breaker for the rest of the batch.
    /// Returns true only for the call that actually opened it.
    pub fn trip(&mut self) -> bool {
        if self.open {
            return false;
        }
        self.open = true;
        log::warn!("Secondary provider quota exhausted, fallback disabled for the rest of this batch");
        true
    }
}
