//! Request sequencing for discarding stale results.
//!
//! Every search request takes a token from a [`RequestSequencer`]. A result may only be
//! applied while its token is still the newest one issued; anything older is dropped. The
//! underlying query is never cancelled, its output is simply ignored.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Identifies one search request. Later requests carry larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Raw sequence number.
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing request tokens.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    /// Most recently issued sequence number; zero before the first request.
    latest: AtomicU64,
}

impl RequestSequencer {
    /// Creates a sequencer that has issued nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a token newer than every token issued so far.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Returns true if no newer token has been issued since `token`.
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest.load(Ordering::SeqCst)
    }

    /// Makes every outstanding token stale without starting a new request.
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    /// Passes `value` through only if `token` is still current.
    pub fn accept<T>(&self, token: RequestToken, value: T) -> Option<T> {
        self.is_current(token).then_some(value)
    }
}
