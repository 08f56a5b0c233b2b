//! Bounded exponential-backoff retry for remote lookups.
//!
//! Only errors are retried. An `Ok` answer is terminal even when it carries
//! "nothing found". This component never defers anything itself: it reports
//! `Exhausted` and the pipeline decides what to do with the query.

use std::future::Future;
use std::time::Duration;

use crate::enrichment::domain::EnrichmentError;

/// Backoff policy, applied uniformly to every retried call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub initial_backoff: Duration,
    pub multiplier: u32,
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_backoff: Duration::from_secs(4),
            multiplier: 2,
            max_attempts: 5,
        }
    }
}

impl RetryPolicy {
    /// Sleeps taken between attempts: one fewer than `max_attempts`.
    pub fn backoff_schedule(&self) -> Vec<Duration> {
        let mut backoff = self.initial_backoff;
        let mut schedule = Vec::new();
        for _ in 1..self.max_attempts {
            schedule.push(backoff);
            backoff = backoff.saturating_mul(self.multiplier);
        }
        schedule
    }
}

/// Result of a retried call.
#[derive(Debug)]
pub enum LookupOutcome<T> {
    /// The call answered (possibly with "no match").
    Resolved(T),
    /// Every attempt failed with a transport or protocol error.
    Exhausted {
        attempts: u32,
        last_error: EnrichmentError,
    },
}

impl<T> LookupOutcome<T> {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }

    /// Collapse to the answer, treating exhaustion as "absent".
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::Exhausted { .. } => None,
        }
    }
}

/// Runs a remote call under a [`RetryPolicy`].
#[derive(Debug, Clone, Default)]
pub struct RetryingLookup {
    policy: RetryPolicy,
}

impl RetryingLookup {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Call `op` until it returns `Ok` or the attempt ceiling is reached.
    ///
    /// `label` is the artist name (or other subject) used in log lines.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> LookupOutcome<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, EnrichmentError>>,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut backoff = self.policy.initial_backoff;
        let mut attempt = 1;

        loop {
            match op().await {
                Ok(value) => {
                    tracing::debug!(artist = label, attempt, "Lookup succeeded");
                    return LookupOutcome::Resolved(value);
                }
                Err(e) if attempt >= max_attempts => {
                    tracing::error!(
                        artist = label,
                        attempts = attempt,
                        "Lookup failed after {} attempts: {}",
                        attempt,
                        e
                    );
                    return LookupOutcome::Exhausted {
                        attempts: attempt,
                        last_error: e,
                    };
                }
                Err(e) => {
                    tracing::warn!(
                        artist = label,
                        attempt,
                        "Lookup failed ({}), retrying in {:.1}s",
                        e,
                        backoff.as_secs_f64()
                    );
                    tokio::time::sleep(backoff).await;
                    backoff = backoff.saturating_mul(self.policy.multiplier);
                    attempt += 1;
                }
            }
        }
    }
}
