use std::time::Duration;

/// Default `User-Agent` header value: `langfuse-http/<version>`.
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configures HTTP timeout, retry behavior and client identification.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Retry policy for 5xx responses and network failures.
    pub retry: RetryPolicy,
    /// Value sent in the `User-Agent` header.
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            retry: RetryPolicy::default(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl ClientOptions {
    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Bounded exponential backoff.
///
/// Applies to 5xx responses and retryable transport failures. 4xx responses
/// are never retried.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: usize,
    /// Backoff before the first retry, in milliseconds.
    pub min_backoff_ms: u64,
    /// Upper bound for any single backoff, in milliseconds.
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            min_backoff_ms: 1_000,
            max_backoff_ms: 4_000,
        }
    }
}

impl RetryPolicy {
    /// A policy that performs a single attempt.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Attempt budget; zero is treated as one.
    pub fn attempts(&self) -> usize {
        self.max_attempts.max(1)
    }

    /// Delay before retry number `retry` (zero-based): `min * 2^retry`, capped at `max`.
    pub fn backoff(&self, retry: usize) -> Duration {
        let exp = retry.min(16) as u32;
        let delay_ms = self
            .min_backoff_ms
            .saturating_mul(1u64 << exp)
            .min(self.max_backoff_ms.max(self.min_backoff_ms));
        Duration::from_millis(delay_ms)
    }
}
