//! # Scene Repository Trait
//!
//! シーンファイルの発見を抽象化

use async_trait::async_trait;

use crate::domain::entities::scene_file::SceneFile;
use crate::domain::errors::ProcessingError;

/// シーンファイルの検索条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneQuery {
    /// 検索するディレクトリ
    pub dir: String,
    /// 対象拡張子（ドットなし、大文字小文字を区別）
    pub extensions: Vec<String>,
    /// 論理名の許可リスト（空の場合はすべて対象）
    pub allow_list: Vec<String>,
}

/// シーンリポジトリ
///
/// シーンファイルの発見を担当するリポジトリ
#[async_trait]
pub trait SceneRepository: Send + Sync {
    /// シーンファイルを発見する
    ///
    /// # Returns
    ///
    /// 安定した順序で並んだシーンファイル。該当なしは空のリスト。
    ///
    /// # Errors
    ///
    /// ディレクトリが存在しない場合は `ProcessingError::DirectoryNotFound`
    async fn discover_scene_files(&self, query: &SceneQuery)
        -> Result<Vec<SceneFile>, ProcessingError>;
}
