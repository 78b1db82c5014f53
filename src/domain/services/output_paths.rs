//! # Output Path Service
//!
//! シーンの論理名から成果物のパスを導出する

use std::path::{Path, PathBuf};

use crate::domain::entities::render_request::FRAME_SUFFIX;
use crate::domain::entities::scene_file::SceneFile;

/// 成果物パスの導出
pub struct OutputPaths;

impl OutputPaths {
    /// `<output_root>/<name>.<ext>`
    ///
    /// ```
    /// use std::path::{Path, PathBuf};
    /// use scenebatch::domain::entities::scene_file::SceneFile;
    /// use scenebatch::domain::services::output_paths::OutputPaths;
    ///
    /// let scene = SceneFile::from_path("/anims/Walk.ma", &["ma".to_string()]).unwrap();
    /// assert_eq!(
    ///     OutputPaths::artifact(Path::new("/export/FBX"), &scene, "fbx"),
    ///     PathBuf::from("/export/FBX/Walk.fbx")
    /// );
    /// ```
    pub fn artifact(output_root: &Path, scene: &SceneFile, ext: &str) -> PathBuf {
        output_root.join(format!("{}.{}", scene.logical_name(), ext))
    }

    /// フレーム連番の出力ディレクトリ `<output_root>/<name>/`
    pub fn frame_dir(output_root: &Path, scene: &SceneFile) -> PathBuf {
        output_root.join(scene.logical_name())
    }

    /// レンダラーに渡すフレームのプレフィックス `<output_root>/<name>/<name>_frame`
    pub fn frame_prefix(output_root: &Path, scene: &SceneFile) -> PathBuf {
        Self::frame_dir(output_root, scene)
            .join(format!("{}{}", scene.logical_name(), FRAME_SUFFIX))
    }

    /// アニメーション画像のパス（`dir` 未指定時はシーンと同じディレクトリ）
    pub fn animation(dir: Option<&Path>, scene: &SceneFile, ext: &str) -> PathBuf {
        let dir = dir.unwrap_or_else(|| scene.source_dir());
        Self::artifact(dir, scene, ext)
    }
}
