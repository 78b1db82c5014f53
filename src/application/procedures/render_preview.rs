//! # Render Preview Procedure
//!
//! 再生範囲をプレビューレンダリングし、フレーム連番からアニメーション画像を作成する

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};

use super::node_ops::ensure_dir;
use super::reference_repair::ReferenceRepair;
use crate::domain::entities::render_request::{FrameSequence, RenderRequest};
use crate::domain::entities::scene_file::SceneFile;
use crate::domain::errors::ProcessingError;
use crate::domain::procedure::{ProcedureOutcome, SceneProcedure};
use crate::domain::repositories::animation_assembler::AnimationAssembler;
use crate::domain::repositories::host_session::{HostSession, OpenOptions};
use crate::domain::services::output_paths::OutputPaths;

/// レンダリング設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub quality: u8,
    pub raster_ext: String,
    pub frame_padding: usize,
    /// アニメーション画像の出力先（未指定時はシーンと同じディレクトリ）
    pub animation_dir: Option<PathBuf>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
            quality: 100,
            raster_ext: "jpg".to_string(),
            frame_padding: 4,
            animation_dir: None,
        }
    }
}

/// プレビューレンダリング処理
pub struct RenderPreviewProcedure {
    settings: RenderSettings,
    repair: Option<ReferenceRepair>,
    assembler: Arc<dyn AnimationAssembler>,
}

impl RenderPreviewProcedure {
    pub fn new(
        settings: RenderSettings,
        repair: Option<ReferenceRepair>,
        assembler: Arc<dyn AnimationAssembler>,
    ) -> Self {
        Self {
            settings,
            repair,
            assembler,
        }
    }

    fn animation_path(&self, scene: &SceneFile) -> PathBuf {
        OutputPaths::animation(
            self.settings.animation_dir.as_deref(),
            scene,
            self.assembler.extension(),
        )
    }

    /// 組み立て中の書き出し先（完了後に本来のパスへリネームする）
    fn staging_path(animation_path: &Path) -> PathBuf {
        let mut name = animation_path.as_os_str().to_os_string();
        name.push(".part");
        PathBuf::from(name)
    }
}

#[async_trait]
impl SceneProcedure for RenderPreviewProcedure {
    fn name(&self) -> &'static str {
        "render"
    }

    fn open_options(&self) -> OpenOptions {
        OpenOptions {
            force: true,
            load_references: self.repair.is_none(),
        }
    }

    async fn apply(
        &self,
        scene: &SceneFile,
        output_root: &Path,
        session: &mut dyn HostSession,
    ) -> Result<ProcedureOutcome, ProcessingError> {
        if let Some(repair) = &self.repair {
            let summary = repair.run(session).await?;
            if let Some(first) = summary.errors.into_iter().next() {
                return Err(first);
            }
        }

        let frame_dir = OutputPaths::frame_dir(output_root, scene);
        ensure_dir(&frame_dir).await?;

        let range = session.playback_range().await?;
        if range.is_empty() {
            return Ok(ProcedureOutcome::skipped(format!(
                "empty playback range {}..{}",
                range.start, range.end
            )));
        }

        let request = RenderRequest {
            output_prefix: OutputPaths::frame_prefix(output_root, scene),
            range,
            width: self.settings.width,
            height: self.settings.height,
            quality: self.settings.quality,
            raster_ext: self.settings.raster_ext.clone(),
            frame_padding: self.settings.frame_padding,
            off_screen: true,
            show_ornaments: false,
        };
        session
            .render(&request)
            .await
            .map_err(|e| ProcessingError::Render {
                scene: scene.logical_name().to_string(),
                message: e.to_string(),
            })?;

        let frames = FrameSequence {
            dir: frame_dir,
            base_name: scene.logical_name().to_string(),
            range,
            padding: self.settings.frame_padding,
            raster_ext: self.settings.raster_ext.clone(),
        };
        let animation_path = self.animation_path(scene);
        if let Some(parent) = animation_path.parent() {
            ensure_dir(parent).await?;
        }
        info!("Creating animation: {}", animation_path.display());

        // タイムアウトで待機が打ち切られてもブロッキング処理は走り続けるため、
        // 結果を受け取ってからリネームして確定させる
        let staging = Self::staging_path(&animation_path);
        let assembler = self.assembler.clone();
        let output = staging.clone();
        let report = tokio::task::spawn_blocking(move || assembler.assemble(&frames, &output))
            .await
            .map_err(|e| ProcessingError::Render {
                scene: scene.logical_name().to_string(),
                message: format!("Failed to spawn blocking task: {}", e),
            })??;
        tokio::fs::rename(&staging, &animation_path)
            .await
            .map_err(|e| ProcessingError::output_path(&animation_path, e))?;

        info!(
            "Created animation: {} ({} frames, {} missing)",
            animation_path.display(),
            report.frames_written,
            report.frames_missing
        );

        Ok(ProcedureOutcome::artifacts(vec![animation_path]))
    }

    fn planned_artifacts(&self, scene: &SceneFile, output_root: &Path) -> Vec<PathBuf> {
        vec![
            OutputPaths::frame_dir(output_root, scene),
            self.animation_path(scene),
        ]
    }
}
