//! # Discover Scenes Use Case
//!
//! シーンファイル発見ユースケース

use std::sync::Arc;

use crate::domain::entities::scene_file::SceneFile;
use crate::domain::errors::ProcessingError;
use crate::domain::repositories::scene_repository::{SceneQuery, SceneRepository};

/// シーンファイル発見ユースケース
///
/// 指定されたディレクトリからシーンファイルを発見する
pub struct DiscoverScenesUseCase<R: SceneRepository> {
    scene_repository: Arc<R>,
}

impl<R: SceneRepository> DiscoverScenesUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `scene_repository` - シーンリポジトリ
    pub fn new(scene_repository: Arc<R>) -> Self {
        Self { scene_repository }
    }

    /// シーンファイルを発見する
    ///
    /// # Arguments
    ///
    /// * `query` - ディレクトリ・拡張子・許可リスト
    ///
    /// # Returns
    ///
    /// 発見されたシーンファイルのリスト
    ///
    /// # Errors
    ///
    /// ディレクトリが存在しない場合に `DirectoryNotFound` を返す
    pub async fn execute(&self, query: &SceneQuery) -> Result<Vec<SceneFile>, ProcessingError> {
        self.scene_repository.discover_scene_files(query).await
    }
}
