//! # Report Repository Trait
//!
//! バッチレポートの永続化を抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::processing_result::BatchReport;

/// レポートリポジトリ
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// レポートを保存する
    ///
    /// # Arguments
    ///
    /// * `path` - 出力先ファイルのパス
    /// * `report` - バッチレポート
    ///
    /// # Errors
    ///
    /// ファイルの書き込みに失敗した場合にエラーを返す
    async fn save(&self, path: &str, report: &BatchReport) -> Result<()>;
}
