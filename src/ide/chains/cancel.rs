//! Cooperative cancellation for chain searches.
//!
//! The engine polls a [`CancelCheck`] at the top of every loop iteration.
//! There is no preemption: a single expensive member lookup runs to the end
//! before the next poll.

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

/// Something the search can poll to learn it should stop.
pub trait CancelCheck {
    fn is_canceled(&self) -> bool;
}

/// Cross-thread flag owned by the caller.
impl CancelCheck for CancellationToken {
    fn is_canceled(&self) -> bool {
        self.is_cancelled()
    }
}

impl<C: CancelCheck + ?Sized> CancelCheck for &C {
    fn is_canceled(&self) -> bool {
        (**self).is_canceled()
    }
}

/// Never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelCheck for NeverCancel {
    fn is_canceled(&self) -> bool {
        false
    }
}

/// Cancels once `timeout` has elapsed since `start`.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    timeout: Duration,
}

impl Deadline {
    /// A deadline measured from an explicit start.
    pub fn new(start: Instant, timeout: Duration) -> Self {
        Self { start, timeout }
    }

    /// A deadline measured from now.
    pub fn after(timeout: Duration) -> Self {
        Self::new(Instant::now(), timeout)
    }

    pub fn remaining(&self) -> Duration {
        self.timeout.saturating_sub(self.start.elapsed())
    }
}

impl CancelCheck for Deadline {
    fn is_canceled(&self) -> bool {
        self.start.elapsed() >= self.timeout
    }
}

/// Cancels when either side does.
#[derive(Debug, Clone)]
pub struct AnyCancel<A, B> {
    first: A,
    second: B,
}

impl<A: CancelCheck, B: CancelCheck> AnyCancel<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: CancelCheck, B: CancelCheck> CancelCheck for AnyCancel<A, B> {
    fn is_canceled(&self) -> bool {
        self.first.is_canceled() || self.second.is_canceled()
    }
}
