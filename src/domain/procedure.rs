//! # Scene Procedure Trait
//!
//! シーンファイルごとに適用する変換処理（エクスポート、リファレンス修正、レンダリングなど）を抽象化

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::entities::scene_file::SceneFile;
use crate::domain::errors::ProcessingError;
use crate::domain::repositories::host_session::{HostSession, OpenOptions};

/// 変換処理の結果
#[derive(Debug, Clone, PartialEq)]
pub enum ProcedureOutcome {
    /// 完了
    Completed {
        /// 書き出した成果物
        artifacts: Vec<PathBuf>,
        /// シーンを変更したか（`true` の場合は保存対象）
        scene_modified: bool,
    },
    /// 対象外
    Skipped { reason: String },
}

impl ProcedureOutcome {
    pub fn artifacts(artifacts: Vec<PathBuf>) -> Self {
        ProcedureOutcome::Completed {
            artifacts,
            scene_modified: false,
        }
    }

    pub fn modified() -> Self {
        ProcedureOutcome::Completed {
            artifacts: Vec::new(),
            scene_modified: true,
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        ProcedureOutcome::Skipped {
            reason: reason.into(),
        }
    }
}

/// シーン変換処理
///
/// 呼び出し時点でセッションには `scene` が開かれている。
/// 返したエラーはそのファイルの `Failed` として記録され、バッチは次のファイルへ進む。
#[async_trait]
pub trait SceneProcedure: Send + Sync {
    /// 処理名（ログ・レポート用）
    fn name(&self) -> &'static str;

    /// シーンを開くときのオプション
    fn open_options(&self) -> OpenOptions {
        OpenOptions::default()
    }

    /// 開かれているシーンに処理を適用する
    ///
    /// # Arguments
    ///
    /// * `scene` - 現在開かれているシーンファイル
    /// * `output_root` - 成果物の出力ルート
    /// * `session` - ホストセッション
    async fn apply(
        &self,
        scene: &SceneFile,
        output_root: &Path,
        session: &mut dyn HostSession,
    ) -> Result<ProcedureOutcome, ProcessingError>;

    /// dry-run 時に表示する予定成果物
    fn planned_artifacts(&self, _scene: &SceneFile, _output_root: &Path) -> Vec<PathBuf> {
        Vec::new()
    }
}
