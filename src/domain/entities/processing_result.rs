//! # ProcessingResult / BatchReport
//!
//! シーンファイルごとの処理結果と、バッチ全体のレポート

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::scene_file::SceneFile;
use crate::domain::errors::ProcessingError;

/// シーンファイル1件の処理結果
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingResult {
    /// 成功（書き出された成果物のパス）
    Succeeded { artifacts: Vec<PathBuf> },
    /// 処理対象外と判断された
    Skipped { reason: String },
    /// 失敗（バッチは継続）
    Failed(ProcessingError),
}

impl ProcessingResult {
    pub fn is_succeeded(&self) -> bool {
        matches!(self, ProcessingResult::Succeeded { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ProcessingResult::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ProcessingResult::Failed(_))
    }

    pub fn error(&self) -> Option<&ProcessingError> {
        match self {
            ProcessingResult::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// シーンファイルと結果の組
#[derive(Debug, Clone)]
pub struct SceneResult {
    pub scene: SceneFile,
    pub result: ProcessingResult,
    pub elapsed: Duration,
}

/// バッチ全体のレポート
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub batch_id: String,
    pub procedure: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub results: Vec<SceneResult>,
}

impl BatchReport {
    pub fn succeeded_count(&self) -> usize {
        self.results.iter().filter(|r| r.result.is_succeeded()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.results.iter().filter(|r| r.result.is_skipped()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.result.is_failed()).count()
    }

    /// 全ファイルで書き出された成果物
    pub fn artifacts(&self) -> Vec<PathBuf> {
        self.results
            .iter()
            .filter_map(|r| match &r.result {
                ProcessingResult::Succeeded { artifacts } => Some(artifacts.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// 失敗がないかチェックします。
    ///
    /// # 例
    ///
    /// ```
    /// use chrono::Utc;
    /// use scenebatch::domain::entities::processing_result::BatchReport;
    ///
    /// let report = BatchReport {
    ///     batch_id: "batch-001".to_string(),
    ///     procedure: "export".to_string(),
    ///     started_at: Utc::now(),
    ///     finished_at: Utc::now(),
    ///     results: vec![],
    /// };
    /// assert!(report.is_clean());
    /// ```
    pub fn is_clean(&self) -> bool {
        self.failed_count() == 0
    }
}
