//! Construction-time settings for the feed.
//!
//! Settings can be built in code with the `with_*` builders or deserialized
//! from JSON, where durations are given in milliseconds:
//!
//! ```rust
//! use bookshelf_feed::{FailurePolicy, FeedConfig};
//! use std::time::Duration;
//!
//! let config = FeedConfig::from_json(
//!     r#"{ "chunk_size": 10, "max_window_size": 30, "backward_debounce_ms": 500,
//!          "failure_policy": "end_of_feed" }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.chunk_size, 10);
//! assert_eq!(config.backward_debounce, Duration::from_millis(500));
//! assert_eq!(config.failure_policy, FailurePolicy::EndOfFeed);
//! assert_eq!(config.pull_threshold, 100.0);
//! ```

use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// Default page size.
pub const DEFAULT_CHUNK_SIZE: usize = 18;
/// Default window bound: three chunks.
pub const DEFAULT_MAX_WINDOW_SIZE: usize = 54;
/// Default pull distance, in input units, that triggers a backward load.
pub const DEFAULT_PULL_THRESHOLD: f32 = 100.0;
/// Default minimum interval between two backward loads.
pub const DEFAULT_BACKWARD_DEBOUNCE: Duration = Duration::from_millis(1000);

/// How a failed fetch is folded into the window state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Keep `has_more` as it was, record the failure, and wait for a manual
    /// retry.
    #[default]
    Retryable,
    /// Treat a failure like an empty page: the direction is exhausted until
    /// the next reset.
    EndOfFeed,
}

/// Errors raised while building or validating a [`FeedConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `chunk_size` was zero.
    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,
    /// The window bound is not a whole number of chunks.
    #[error("max window size {max_window_size} must be a non-zero multiple of chunk size {chunk_size}")]
    WindowNotMultipleOfChunk {
        /// The configured window bound.
        max_window_size: usize,
        /// The configured page size.
        chunk_size: usize,
    },
    /// The pull threshold was zero, negative or not finite.
    #[error("pull threshold must be a positive finite number, got {0}")]
    InvalidPullThreshold(f32),
    /// The JSON could not be parsed.
    #[error("invalid feed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for a feed [`Model`](super::Model).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Items requested per page, and items evicted per overflow.
    pub chunk_size: usize,
    /// Upper bound on materialized items.
    pub max_window_size: usize,
    /// Pull distance that triggers a backward load.
    pub pull_threshold: f32,
    /// Minimum interval between two backward loads.
    #[serde(rename = "backward_debounce_ms", deserialize_with = "millis")]
    pub backward_debounce: Duration,
    /// Extra rows below the viewport within which the bottom sentinel
    /// already counts as visible.
    pub sentinel_margin: usize,
    /// What a failed fetch does to the window.
    pub failure_policy: FailurePolicy,
}

fn millis<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_millis)
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_window_size: DEFAULT_MAX_WINDOW_SIZE,
            pull_threshold: DEFAULT_PULL_THRESHOLD,
            backward_debounce: DEFAULT_BACKWARD_DEBOUNCE,
            sentinel_margin: 0,
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl FeedConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a JSON configuration. Missing keys take their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the page size (builder pattern).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Sets the window bound (builder pattern).
    pub fn with_max_window_size(mut self, max_window_size: usize) -> Self {
        self.max_window_size = max_window_size;
        self
    }

    /// Sets the pull threshold (builder pattern).
    pub fn with_pull_threshold(mut self, pull_threshold: f32) -> Self {
        self.pull_threshold = pull_threshold;
        self
    }

    /// Sets the backward debounce interval (builder pattern).
    pub fn with_backward_debounce(mut self, debounce: Duration) -> Self {
        self.backward_debounce = debounce;
        self
    }

    /// Sets the bottom sentinel margin (builder pattern).
    pub fn with_sentinel_margin(mut self, rows: usize) -> Self {
        self.sentinel_margin = rows;
        self
    }

    /// Sets the failure policy (builder pattern).
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Checks the settings the eviction arithmetic depends on.
    ///
    /// ```rust
    /// use bookshelf_feed::{ConfigError, FeedConfig};
    ///
    /// assert!(FeedConfig::default().validate().is_ok());
    ///
    /// let uneven = FeedConfig::default().with_max_window_size(50);
    /// assert!(matches!(
    ///     uneven.validate(),
    ///     Err(ConfigError::WindowNotMultipleOfChunk { .. })
    /// ));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.max_window_size == 0 || self.max_window_size % self.chunk_size != 0 {
            return Err(ConfigError::WindowNotMultipleOfChunk {
                max_window_size: self.max_window_size,
                chunk_size: self.chunk_size,
            });
        }
        if !self.pull_threshold.is_finite() || self.pull_threshold <= 0.0 {
            return Err(ConfigError::InvalidPullThreshold(self.pull_threshold));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FeedConfig::default();
        assert_eq!(config.chunk_size, 18);
        assert_eq!(config.max_window_size, 54);
        assert_eq!(config.pull_threshold, 100.0);
        assert_eq!(config.backward_debounce, Duration::from_secs(1));
        assert_eq!(config.failure_policy, FailurePolicy::Retryable);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_chunk_rejected() {
        let config = FeedConfig::new().with_chunk_size(0);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroChunkSize)));
    }

    #[test]
    fn test_window_must_be_multiple_of_chunk() {
        for max in [0, 17, 19, 53] {
            let config = FeedConfig::new().with_max_window_size(max);
            assert!(
                matches!(
                    config.validate(),
                    Err(ConfigError::WindowNotMultipleOfChunk { .. })
                ),
                "max window {} should be rejected",
                max
            );
        }
        assert!(FeedConfig::new().with_max_window_size(18).validate().is_ok());
    }

    #[test]
    fn test_pull_threshold_must_be_positive() {
        for threshold in [0.0, -5.0, f32::NAN, f32::INFINITY] {
            let config = FeedConfig::new().with_pull_threshold(threshold);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidPullThreshold(_))
            ));
        }
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = FeedConfig::from_json("{}").unwrap();
        assert_eq!(config, FeedConfig::default());
    }

    #[test]
    fn test_from_json_validates() {
        let err = FeedConfig::from_json(r#"{ "chunk_size": 10, "max_window_size": 25 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::WindowNotMultipleOfChunk { .. }));

        let err = FeedConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_builders() {
        let config = FeedConfig::new()
            .with_chunk_size(5)
            .with_max_window_size(15)
            .with_pull_threshold(40.0)
            .with_backward_debounce(Duration::from_millis(200))
            .with_sentinel_margin(3)
            .with_failure_policy(FailurePolicy::EndOfFeed);
        assert_eq!(config.chunk_size, 5);
        assert_eq!(config.max_window_size, 15);
        assert_eq!(config.pull_threshold, 40.0);
        assert_eq!(config.backward_debounce, Duration::from_millis(200));
        assert_eq!(config.sentinel_margin, 3);
        assert_eq!(config.failure_policy, FailurePolicy::EndOfFeed);
        assert!(config.validate().is_ok());
    }
}
