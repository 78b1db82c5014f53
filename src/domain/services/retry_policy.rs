//! # Retry Policy
//!
//! ホストの一時的な失敗（ファイルロック競合など）に対するリトライと指数バックオフ

use serde::{Deserialize, Serialize};

use crate::domain::errors::HostError;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_INITIAL_RETRY_DELAY_MS: u64 = 500;
pub const DEFAULT_MAX_RETRY_DELAY_MS: u64 = 8000;

/// リトライ設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay_ms: DEFAULT_INITIAL_RETRY_DELAY_MS,
            max_delay_ms: DEFAULT_MAX_RETRY_DELAY_MS,
        }
    }
}

impl RetryPolicy {
    /// リトライしない設定
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Calculate retry delay with exponential backoff (`retry_count` starts at 1)
    pub fn delay_ms(&self, retry_count: u32) -> u64 {
        let shift = retry_count.saturating_sub(1).min(31);
        std::cmp::min(
            self.initial_delay_ms.saturating_mul(1 << shift),
            self.max_delay_ms,
        )
    }

    /// Check whether another attempt should be made after `error`
    pub fn should_retry(&self, error: &HostError, retry_count: u32) -> bool {
        error.is_transient() && retry_count < self.max_retries
    }
}
