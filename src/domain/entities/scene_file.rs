//! # SceneFile Entity
//!
//! 処理対象のシーンファイル

use std::path::{Path, PathBuf};

use serde::Serialize;

/// ホストアプリケーションのネイティブ拡張子（テキスト形式）
pub const NATIVE_EXTENSION: &str = "ma";
/// ホストアプリケーションのバイナリ拡張子
pub const BINARY_EXTENSION: &str = "mb";

/// シーンファイルの形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneFormat {
    Native,
    Binary,
    /// 設定で追加された拡張子
    Other,
}

impl SceneFormat {
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            NATIVE_EXTENSION => SceneFormat::Native,
            BINARY_EXTENSION => SceneFormat::Binary,
            _ => SceneFormat::Other,
        }
    }
}

/// シーンファイル
///
/// パスと論理名（拡張子を除いたファイル名）で識別される。
/// 発見後は不変。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneFile {
    path: PathBuf,
    logical_name: String,
    format: SceneFormat,
}

impl SceneFile {
    /// パスからシーンファイルを作成
    ///
    /// 拡張子が `extensions` に含まれない場合は `None`。
    /// ファイルの存在確認は呼び出し側（リポジトリ）の責務。
    ///
    /// ```
    /// use scenebatch::domain::entities::scene_file::{SceneFile, SceneFormat};
    ///
    /// let extensions = vec!["ma".to_string(), "mb".to_string()];
    /// let scene = SceneFile::from_path("/anims/Walk.mb", &extensions).unwrap();
    /// assert_eq!(scene.logical_name(), "Walk");
    /// assert_eq!(scene.format(), SceneFormat::Binary);
    ///
    /// assert!(SceneFile::from_path("/anims/notes.txt", &extensions).is_none());
    /// ```
    pub fn from_path(path: impl AsRef<Path>, extensions: &[String]) -> Option<Self> {
        let path = path.as_ref();
        let ext = path.extension()?.to_str()?;
        if !extensions.iter().any(|e| e == ext) {
            return None;
        }
        let logical_name = path.file_stem()?.to_str()?.to_string();

        Some(Self {
            path: path.to_path_buf(),
            logical_name,
            format: SceneFormat::from_extension(ext),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 出力ファイル名の導出に使う論理名
    pub fn logical_name(&self) -> &str {
        &self.logical_name
    }

    pub fn format(&self) -> SceneFormat {
        self.format
    }

    /// シーンファイルが置かれているディレクトリ
    pub fn source_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}
