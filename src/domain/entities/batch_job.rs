//! # BatchJob Value Object
//!
//! 1回の実行で処理するシーンファイルの集合

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::scene_file::SceneFile;
use crate::domain::procedure::SceneProcedure;

/// バッチジョブ
///
/// 実行ごとに1つ作成され、処理中は変更されない。
#[derive(Clone)]
pub struct BatchJob {
    scenes: Vec<SceneFile>,
    output_root: PathBuf,
    procedure: Arc<dyn SceneProcedure>,
}

impl BatchJob {
    /// 新しいバッチジョブを作成
    ///
    /// # Arguments
    ///
    /// * `scenes` - 処理順に並んだシーンファイル
    /// * `output_root` - 成果物の出力ルート
    /// * `procedure` - 各シーンに適用する処理
    pub fn new(
        scenes: Vec<SceneFile>,
        output_root: impl Into<PathBuf>,
        procedure: Arc<dyn SceneProcedure>,
    ) -> Self {
        Self {
            scenes,
            output_root: output_root.into(),
            procedure,
        }
    }

    pub fn scenes(&self) -> &[SceneFile] {
        &self.scenes
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn procedure(&self) -> &dyn SceneProcedure {
        self.procedure.as_ref()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

impl std::fmt::Debug for BatchJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchJob")
            .field("scenes", &self.scenes)
            .field("output_root", &self.output_root)
            .field("procedure", &self.procedure.name())
            .finish()
    }
}
