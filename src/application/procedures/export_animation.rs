//! # Export Animation Procedure
//!
//! リグのアニメーションをインターチェンジ形式でエクスポートする

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::info;

use super::node_ops::{ensure_dir, remove_nodes_if_present, select_nodes};
use crate::domain::entities::export_options::ExportOptions;
use crate::domain::entities::node_selection::NodeSelection;
use crate::domain::entities::scene_file::SceneFile;
use crate::domain::errors::ProcessingError;
use crate::domain::procedure::{ProcedureOutcome, SceneProcedure};
use crate::domain::repositories::host_session::HostSession;
use crate::domain::services::output_paths::OutputPaths;

/// エクスポートファイルの拡張子
pub const EXPORT_EXTENSION: &str = "fbx";

/// エクスポート前に削除する、エクスポーターが扱えないノード
pub fn default_cleanup_nodes() -> Vec<String> {
    vec![
        "vraySettings".to_string(),
        "ngSkinToolsData_skinCluster1".to_string(),
    ]
}

/// アニメーションエクスポート処理
pub struct ExportAnimationProcedure {
    options: ExportOptions,
    selection: NodeSelection,
    cleanup_nodes: Vec<String>,
}

impl ExportAnimationProcedure {
    pub fn new(options: ExportOptions, selection: NodeSelection, cleanup_nodes: Vec<String>) -> Self {
        Self {
            options,
            selection,
            cleanup_nodes,
        }
    }
}

#[async_trait]
impl SceneProcedure for ExportAnimationProcedure {
    fn name(&self) -> &'static str {
        "export"
    }

    async fn apply(
        &self,
        scene: &SceneFile,
        output_root: &Path,
        session: &mut dyn HostSession,
    ) -> Result<ProcedureOutcome, ProcessingError> {
        let export_path = OutputPaths::artifact(output_root, scene, EXPORT_EXTENSION);
        info!("Exporting file to: {}", export_path.display());
        ensure_dir(output_root).await?;

        remove_nodes_if_present(session, &self.cleanup_nodes).await?;

        // 再生範囲はファイルごとに異なるため毎回問い合わせる
        let range = session.playback_range().await?;
        let selected = select_nodes(session, &self.selection).await?;
        if selected.is_empty() {
            return Ok(ProcedureOutcome::skipped("no nodes matched the export selection"));
        }

        let options = self.options.with_bake_range(range);
        session
            .export(&export_path, &options)
            .await
            .map_err(|source| ProcessingError::Export {
                path: export_path.clone(),
                source,
            })?;

        Ok(ProcedureOutcome::artifacts(vec![export_path]))
    }

    fn planned_artifacts(&self, scene: &SceneFile, output_root: &Path) -> Vec<PathBuf> {
        vec![OutputPaths::artifact(output_root, scene, EXPORT_EXTENSION)]
    }
}
