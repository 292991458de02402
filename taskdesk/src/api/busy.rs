//! Shared busy state for the loading indicator.
//!
//! Each in-flight request holds a [`BusyGuard`]; the state is busy while any
//! guard is alive. Guards release on drop, so every exit path of a request
//! (success, error, early return, panic unwinding) clears its share.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Reference count of requests in flight.
#[derive(Debug, Default)]
pub struct BusyState {
    in_flight: AtomicUsize,
}

impl BusyState {
    /// Creates an idle state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Marks one request as in flight until the returned guard is dropped.
    #[must_use = "the state is released as soon as the guard is dropped"]
    pub fn acquire(&self) -> BusyGuard<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        BusyGuard { state: self }
    }

    /// Whether at least one request is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight() > 0
    }

    /// Number of requests in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Scoped marker for one in-flight request.
#[derive(Debug)]
pub struct BusyGuard<'a> {
    state: &'a BusyState,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
