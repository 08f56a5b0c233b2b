//! Test utilities and fixtures for playlist-gen tests.
//!
//! Mock API clients live in [`crate::enrichment::traits::mocks`]; this module
//! holds settings that keep pipeline tests fast and deterministic.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::fast_config;
//!
//! #[tokio::test(start_paused = true)]
//! async fn test_something() {
//!     let pipeline = Pipeline::new(fast_config(), metadata, streaming, ErrorLog::disabled());
//!     // ... test logic
//! }
//! ```

use std::time::Duration;

use crate::pipeline::PipelineConfig;
use crate::resolve::RetryPolicy;

/// Two attempts, millisecond backoff.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        initial_backoff: Duration::from_millis(10),
        multiplier: 2,
        max_attempts: 2,
    }
}

/// Pipeline settings with no pacing delay and [`fast_retry`].
///
/// Use struct update syntax to customize:
///
/// ```ignore
/// let config = PipelineConfig {
///     batch_ceiling: 10,
///     ..fast_config()
/// };
/// ```
pub fn fast_config() -> PipelineConfig {
    PipelineConfig {
        request_delay: Duration::ZERO,
        retry: fast_retry(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_config_keeps_catalog_defaults() {
        let config = fast_config();
        assert_eq!(config.request_delay, Duration::ZERO);
        assert_eq!(config.retry.max_attempts, 2);
        assert_eq!(config.market, "GB");
        assert_eq!(config.batch_ceiling, 100);
    }
}
