//! # Reference Repair
//!
//! 検索トークンを含むリファレンスを置換パスで読み直す
//!
//! 置換は必ずホストのリファレンス再読み込み経由で行う（ファイルを直接書き換えない）。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::domain::entities::scene_file::SceneFile;
use crate::domain::errors::ProcessingError;
use crate::domain::procedure::{ProcedureOutcome, SceneProcedure};
use crate::domain::repositories::host_session::{HostSession, OpenOptions};

/// リファレンス修正の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRepair {
    /// リファレンスパスに含まれる文字列（部分一致）
    pub search_token: String,
    /// 置換後の絶対パス
    pub replace_path: PathBuf,
}

/// リファレンス修正の結果
#[derive(Debug, Default)]
pub struct RepairSummary {
    /// 読み直したリファレンスノード
    pub reloaded: Vec<String>,
    /// 変更しなかったリファレンス数
    pub untouched: usize,
    /// 解決できなかったリファレンス
    pub errors: Vec<ProcessingError>,
}

impl ReferenceRepair {
    pub fn new(search_token: impl Into<String>, replace_path: impl Into<PathBuf>) -> Self {
        Self {
            search_token: search_token.into(),
            replace_path: replace_path.into(),
        }
    }

    /// 開いているシーンのリファレンスを修正する
    ///
    /// 1つのリファレンスの解決に失敗しても残りのリファレンスの処理を続ける。
    /// 一致するリファレンスが無い場合は何もしない。
    pub async fn run(
        &self,
        session: &mut dyn HostSession,
    ) -> Result<RepairSummary, ProcessingError> {
        let handles = session.list_references().await?;
        let mut summary = RepairSummary::default();

        for handle in handles {
            let reference = match session.describe_reference(&handle).await {
                Ok(reference) => reference,
                Err(source) => {
                    warn!("Could not resolve reference {}: {}", handle, source);
                    summary.errors.push(ProcessingError::ReferenceResolution {
                        reference: handle,
                        source,
                    });
                    continue;
                }
            };

            info!(
                "Reference {} is loaded: {}",
                reference.handle, reference.loaded
            );

            if !reference.matches(&self.search_token) || reference.path == self.replace_path {
                summary.untouched += 1;
                continue;
            }

            info!(
                "Changing reference path from {} to {}",
                reference.path.display(),
                self.replace_path.display()
            );
            match session
                .reload_reference(&reference.node, &self.replace_path)
                .await
            {
                Ok(()) => summary.reloaded.push(reference.node),
                Err(source) => {
                    warn!("Could not reload reference {}: {}", reference.node, source);
                    summary.errors.push(ProcessingError::ReferenceResolution {
                        reference: reference.node,
                        source,
                    });
                }
            }
        }

        Ok(summary)
    }
}

/// リファレンス修正処理
///
/// 1件以上読み直した場合はシーンを変更済みとして返す（保存対象になる）。
pub struct RepairReferencesProcedure {
    repair: ReferenceRepair,
}

impl RepairReferencesProcedure {
    pub fn new(repair: ReferenceRepair) -> Self {
        Self { repair }
    }
}

#[async_trait]
impl SceneProcedure for RepairReferencesProcedure {
    fn name(&self) -> &'static str {
        "fix-references"
    }

    fn open_options(&self) -> OpenOptions {
        OpenOptions {
            force: true,
            load_references: false,
        }
    }

    async fn apply(
        &self,
        scene: &SceneFile,
        _output_root: &Path,
        session: &mut dyn HostSession,
    ) -> Result<ProcedureOutcome, ProcessingError> {
        let summary = self.repair.run(session).await?;

        if let Some(first) = summary.errors.into_iter().next() {
            return Err(first);
        }

        info!(
            "{}: {} reference(s) reloaded, {} untouched",
            scene.logical_name(),
            summary.reloaded.len(),
            summary.untouched
        );

        Ok(ProcedureOutcome::Completed {
            artifacts: Vec::new(),
            scene_modified: !summary.reloaded.is_empty(),
        })
    }
}
