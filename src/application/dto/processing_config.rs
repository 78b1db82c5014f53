//! # Processing Configuration DTO
//!
//! バッチ処理の実行設定のData Transfer Object

use std::time::Duration;

use crate::domain::services::retry_policy::RetryPolicy;

/// バッチ処理設定
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingConfig {
    /// ファイル1件あたりのタイムアウト（`None` で無制限）
    pub file_timeout: Option<Duration>,
    /// シーンを開く際のリトライ設定
    pub open_retry: RetryPolicy,
    /// 変更されたシーンを保存するかどうか
    pub save_modified_scenes: bool,
}

impl ProcessingConfig {
    /// 新しい処理設定を作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use std::time::Duration;
    /// use scenebatch::application::dto::processing_config::ProcessingConfig;
    /// use scenebatch::domain::services::retry_policy::RetryPolicy;
    ///
    /// let config = ProcessingConfig::new(
    ///     Some(Duration::from_secs(600)),
    ///     RetryPolicy::default(),
    ///     true,
    /// );
    ///
    /// assert_eq!(config.file_timeout, Some(Duration::from_secs(600)));
    /// assert!(config.save_modified_scenes);
    /// ```
    pub fn new(
        file_timeout: Option<Duration>,
        open_retry: RetryPolicy,
        save_modified_scenes: bool,
    ) -> Self {
        Self {
            file_timeout,
            open_retry,
            save_modified_scenes,
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self::new(None, RetryPolicy::default(), true)
    }
}
