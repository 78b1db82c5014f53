//! # Process Batch Use Case
//!
//! シーンファイルのバッチ処理ユースケース
//!
//! 1ファイルの失敗でバッチ全体を止めない。各ファイルは
//! オープン → 変換 → （変更があれば）保存 の順に処理し、結果を記録して次へ進む。

use std::time::Instant;

use chrono::Utc;
use log::{error, info, warn};

use crate::application::dto::processing_config::ProcessingConfig;
use crate::application::session_lifecycle::SessionLifecycle;
use crate::domain::entities::batch_job::BatchJob;
use crate::domain::entities::processing_result::{BatchReport, ProcessingResult, SceneResult};
use crate::domain::entities::scene_file::SceneFile;
use crate::domain::errors::ProcessingError;
use crate::domain::procedure::ProcedureOutcome;
use crate::domain::repositories::host_session::HostSession;

/// バッチ処理ユースケース
pub struct ProcessBatchUseCase {
    config: ProcessingConfig,
}

impl ProcessBatchUseCase {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `config` - タイムアウト・リトライ・保存設定
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    /// バッチを実行する
    ///
    /// セッションはバッチの間だけ借用し、終了時に必ず1回 teardown する。
    ///
    /// # Arguments
    ///
    /// * `job` - バッチジョブ
    /// * `batch_id` - レポートに記録するバッチID
    /// * `session` - ホストセッション
    ///
    /// # Returns
    ///
    /// 全シーンの処理結果を含むレポート
    ///
    /// # Errors
    ///
    /// セッションの初期化に失敗した場合のみエラーを返す（ファイル単位の失敗はレポートに記録）
    pub async fn execute(
        &self,
        job: &BatchJob,
        batch_id: &str,
        session: &mut dyn HostSession,
    ) -> Result<BatchReport, ProcessingError> {
        let started_at = Utc::now();
        let mut lifecycle = SessionLifecycle::new(session, self.config.open_retry);

        let outcome = self.run(job, &mut lifecycle).await;
        lifecycle.teardown().await;
        let results = outcome?;

        Ok(BatchReport {
            batch_id: batch_id.to_string(),
            procedure: job.procedure().name().to_string(),
            started_at,
            finished_at: Utc::now(),
            results,
        })
    }

    async fn run(
        &self,
        job: &BatchJob,
        lifecycle: &mut SessionLifecycle<'_>,
    ) -> Result<Vec<SceneResult>, ProcessingError> {
        lifecycle.initialize().await?;

        let total = job.len();
        let mut results = Vec::with_capacity(total);

        for (index, scene) in job.scenes().iter().enumerate() {
            info!(
                "[{}/{}] {} {}",
                index + 1,
                total,
                job.procedure().name(),
                scene.path().display()
            );

            let started = Instant::now();
            let result = self.process_scene(job, scene, lifecycle).await;

            match &result {
                ProcessingResult::Succeeded { artifacts } => {
                    info!("✓ {} ({} artifacts)", scene.path().display(), artifacts.len())
                }
                ProcessingResult::Skipped { reason } => {
                    info!("- {} skipped: {}", scene.path().display(), reason)
                }
                ProcessingResult::Failed(e) => error!("✗ {}: {}", scene.path().display(), e),
            }

            if let ProcessingResult::Failed(ProcessingError::Timeout { .. }) = &result {
                if let Err(e) = lifecycle.recover().await {
                    error!("Host session recovery failed: {}", e);
                }
            }

            results.push(SceneResult {
                scene: scene.clone(),
                result,
                elapsed: started.elapsed(),
            });
        }

        Ok(results)
    }

    /// 1ファイルを処理する（失敗は結果として返し、伝播しない）
    async fn process_scene(
        &self,
        job: &BatchJob,
        scene: &SceneFile,
        lifecycle: &mut SessionLifecycle<'_>,
    ) -> ProcessingResult {
        if !scene.path().is_file() {
            warn!("Scene file disappeared: {}", scene.path().display());
            return ProcessingResult::Skipped {
                reason: "scene file no longer exists".to_string(),
            };
        }

        let work = self.transform(job, scene, lifecycle);
        let outcome = match self.config.file_timeout {
            Some(limit) => match tokio::time::timeout(limit, work).await {
                Ok(outcome) => outcome,
                Err(_) => Err(ProcessingError::Timeout { after: limit }),
            },
            None => work.await,
        };

        match outcome {
            Ok(ProcedureOutcome::Completed { artifacts, .. }) => {
                ProcessingResult::Succeeded { artifacts }
            }
            Ok(ProcedureOutcome::Skipped { reason }) => ProcessingResult::Skipped { reason },
            Err(e) => ProcessingResult::Failed(e),
        }
    }

    async fn transform(
        &self,
        job: &BatchJob,
        scene: &SceneFile,
        lifecycle: &mut SessionLifecycle<'_>,
    ) -> Result<ProcedureOutcome, ProcessingError> {
        let procedure = job.procedure();
        lifecycle
            .open_scene(scene.path(), procedure.open_options())
            .await?;

        let outcome = procedure
            .apply(scene, job.output_root(), lifecycle.session())
            .await?;

        if let ProcedureOutcome::Completed {
            scene_modified: true,
            ..
        } = &outcome
        {
            if self.config.save_modified_scenes {
                lifecycle
                    .session()
                    .save_scene()
                    .await
                    .map_err(|source| ProcessingError::SceneSave {
                        path: scene.path().to_path_buf(),
                        source,
                    })?;
                info!("Saved {}", scene.path().display());
            } else {
                info!(
                    "Scene modified but saving is disabled: {}",
                    scene.path().display()
                );
            }
        }

        Ok(outcome)
    }
}
