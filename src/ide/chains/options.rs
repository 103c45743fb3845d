//! Search bounds and chain completion options.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::cancel::{AnyCancel, Deadline};

/// Hard ceiling on pending partial chains.
pub const MAX_QUEUE_SIZE: usize = 50_000;

/// Default wall-clock budget for one completion request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Types never suggested as chain steps or targets by default.
pub const DEFAULT_IGNORED_TYPES: &[&str] = &["java.lang.Object", "java.lang.String"];

/// Size limits for one search invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct SearchBounds {
    /// Stop once this many chains were found (across all targets).
    pub max_chains: usize,
    /// Shortest chain that is reported.
    pub min_depth: usize,
    /// Longest chain that is explored.
    pub max_depth: usize,
    /// Pending partial chains above which expansion stops.
    pub max_queue: usize,
}

impl Default for SearchBounds {
    fn default() -> Self {
        Self {
            max_chains: 20,
            min_depth: 2,
            max_depth: 4,
            max_queue: MAX_QUEUE_SIZE,
        }
    }
}

impl SearchBounds {
    pub fn new(max_chains: usize, min_depth: usize, max_depth: usize) -> Self {
        Self {
            max_chains,
            min_depth,
            max_depth,
            max_queue: MAX_QUEUE_SIZE,
        }
    }

    pub fn with_max_queue(mut self, max_queue: usize) -> Self {
        self.max_queue = max_queue;
        self
    }

    /// Clamp to usable values: every bound at least 1 and
    /// `max_depth >= min_depth`.
    pub fn normalized(self) -> Self {
        let min_depth = self.min_depth.max(1);
        Self {
            max_chains: self.max_chains.max(1),
            min_depth,
            max_depth: self.max_depth.max(min_depth),
            max_queue: self.max_queue.max(1),
        }
    }
}

/// User-facing chain completion settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ChainOptions {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub bounds: SearchBounds,
    /// Wall-clock budget; the search returns what it has when it runs out.
    #[cfg_attr(feature = "serde", serde(rename = "timeoutMs", with = "duration_ms"))]
    pub timeout: Duration,
    /// Type names pruned from the search: qualified, primitive keywords, or
    /// simple names resolvable from the receiver type.
    pub ignored_types: Vec<String>,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            bounds: SearchBounds::default(),
            timeout: DEFAULT_TIMEOUT,
            ignored_types: DEFAULT_IGNORED_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ChainOptions {
    pub fn with_bounds(mut self, bounds: SearchBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_ignored_types<I, T>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.ignored_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Cancellation for one request: the caller's token or the timeout,
    /// whichever fires first. The deadline starts now.
    pub fn cancel_policy(&self, token: &CancellationToken) -> AnyCancel<CancellationToken, Deadline> {
        AnyCancel::new(token.clone(), Deadline::after(self.timeout))
    }
}

#[cfg(feature = "serde")]
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
