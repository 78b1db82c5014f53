//! JSON Report Repository Implementation
//!
//! ReportRepositoryのJSON実装（バッチレポートをJSONファイルに書き出す）

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};

use crate::domain::entities::processing_result::{BatchReport, ProcessingResult, SceneResult};
use crate::domain::repositories::report_repository::ReportRepository;

/// JSONファイルベースのレポートリポジトリ
pub struct JsonReportRepository;

/// バッチレポート（JSON永続化用の内部表現）
#[derive(Debug, Deserialize, Serialize)]
struct BatchReportJson {
    batch_id: String,
    procedure: String,
    hostname: String,
    started_at: String,
    finished_at: String,
    succeeded: usize,
    skipped: usize,
    failed: usize,
    scenes: Vec<SceneResultJson>,
}

#[derive(Debug, Deserialize, Serialize)]
struct SceneResultJson {
    path: String,
    name: String,
    status: String,
    elapsed_ms: u128,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    artifacts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_kind: Option<String>,
    /// 失敗時はエラーメッセージ、スキップ時は理由
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl JsonReportRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// 保存先パスを解決する（`~` を展開）
    fn resolve_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).as_ref())
    }

    /// ファイルにレポートを保存する（同期処理）
    fn save_sync(path: &str, report: &BatchReportJson) -> Result<()> {
        let path = Self::resolve_path(path);
        let path = path.as_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create report directory")?;
        }

        let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;

        fs::write(path, json)
            .with_context(|| format!("Failed to write report file: {}", path.display()))?;

        info!(
            "Saved batch report {} to {}",
            report.batch_id,
            path.display()
        );

        Ok(())
    }

    /// Domain形式からJSON形式に変換
    fn from_domain_report(report: &BatchReport) -> BatchReportJson {
        let hostname = hostname::get()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        BatchReportJson {
            batch_id: report.batch_id.clone(),
            procedure: report.procedure.clone(),
            hostname,
            started_at: report.started_at.to_rfc3339(),
            finished_at: report.finished_at.to_rfc3339(),
            succeeded: report.succeeded_count(),
            skipped: report.skipped_count(),
            failed: report.failed_count(),
            scenes: report.results.iter().map(Self::from_scene_result).collect(),
        }
    }

    fn from_scene_result(scene_result: &SceneResult) -> SceneResultJson {
        let (status, artifacts, error_kind, message) = match &scene_result.result {
            ProcessingResult::Succeeded { artifacts } => (
                "succeeded",
                artifacts
                    .iter()
                    .map(|p| p.to_string_lossy().to_string())
                    .collect(),
                None,
                None,
            ),
            ProcessingResult::Skipped { reason } => {
                ("skipped", Vec::new(), None, Some(reason.clone()))
            }
            ProcessingResult::Failed(e) => (
                "failed",
                Vec::new(),
                Some(e.kind().to_string()),
                Some(e.to_string()),
            ),
        };

        SceneResultJson {
            path: scene_result.scene.path().to_string_lossy().to_string(),
            name: scene_result.scene.logical_name().to_string(),
            status: status.to_string(),
            elapsed_ms: scene_result.elapsed.as_millis(),
            artifacts,
            error_kind,
            message,
        }
    }
}

#[async_trait]
impl ReportRepository for JsonReportRepository {
    async fn save(&self, path: &str, report: &BatchReport) -> Result<()> {
        let path = shellexpand::tilde(path).to_string();
        let json_report = Self::from_domain_report(report);
        tokio::task::spawn_blocking(move || Self::save_sync(&path, &json_report))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        Ok(())
    }
}

impl Default for JsonReportRepository {
    fn default() -> Self {
        Self::new()
    }
}
