//! # Domain Errors
//!
//! バッチ処理のエラー分類
//!
//! - **HostError**: ホストアプリケーション呼び出し単位の失敗
//! - **ProcessingError**: シーンファイル単位／バッチ単位の失敗

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// ホストアプリケーションが返すエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HostError {
    /// ホストがリクエストを拒否した（破損ファイル、バージョン違いなど）
    #[error("host rejected request: {0}")]
    Rejected(String),

    /// 一時的に利用できないリソース（ファイルロック競合など）
    #[error("host resource busy: {0}")]
    Busy(String),

    /// 指定したノードがシーンに存在しない
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// セッションが起動していない、または応答しない
    #[error("host session unavailable: {0}")]
    Unavailable(String),

    /// ブリッジとの通信内容が不正
    #[error("host protocol error: {0}")]
    Protocol(String),
}

impl HostError {
    /// リトライで回復し得るエラーかどうか
    ///
    /// ```
    /// use scenebatch::domain::errors::HostError;
    ///
    /// assert!(HostError::Busy("file locked".to_string()).is_transient());
    /// assert!(!HostError::Rejected("corrupt file".to_string()).is_transient());
    /// ```
    pub fn is_transient(&self) -> bool {
        matches!(self, HostError::Busy(_))
    }
}

/// シーン処理のエラー
///
/// `DirectoryNotFound` とセッション初期化失敗（`HostSession`）のみがバッチ全体を中断する。
/// それ以外はファイル単位で `Failed` として記録される。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessingError {
    #[error("scene directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to load scene {}: {source}", path.display())]
    SceneLoad { path: PathBuf, source: HostError },

    #[error("failed to resolve reference {reference}: {source}")]
    ReferenceResolution { reference: String, source: HostError },

    #[error("failed to export {}: {source}", path.display())]
    Export { path: PathBuf, source: HostError },

    #[error("failed to render {scene}: {message}")]
    Render { scene: String, message: String },

    #[error("failed to save scene {}: {source}", path.display())]
    SceneSave { path: PathBuf, source: HostError },

    #[error("failed to prepare output path {}: {message}", path.display())]
    OutputPath { path: PathBuf, message: String },

    #[error("host session error: {0}")]
    HostSession(#[from] HostError),

    #[error("scene processing timed out after {}s", after.as_secs())]
    Timeout { after: Duration },
}

impl ProcessingError {
    /// レポート出力用のエラー種別名
    pub fn kind(&self) -> &'static str {
        match self {
            ProcessingError::DirectoryNotFound { .. } => "directory_not_found",
            ProcessingError::SceneLoad { .. } => "scene_load",
            ProcessingError::ReferenceResolution { .. } => "reference_resolution",
            ProcessingError::Export { .. } => "export",
            ProcessingError::Render { .. } => "render",
            ProcessingError::SceneSave { .. } => "scene_save",
            ProcessingError::OutputPath { .. } => "output_path",
            ProcessingError::HostSession(_) => "host_session",
            ProcessingError::Timeout { .. } => "timeout",
        }
    }

    /// 出力ディレクトリ作成などのI/Oエラーを変換
    pub fn output_path(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        ProcessingError::OutputPath {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
