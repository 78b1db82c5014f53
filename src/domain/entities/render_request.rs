//! # Render Value Objects
//!
//! プレビューレンダリングのリクエストと、出力されるフレーム連番の命名規則

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::frame_range::FrameRange;

/// フレーム連番ファイル名の接尾辞（`<name>_frame.0001.jpg`）
pub const FRAME_SUFFIX: &str = "_frame";

/// ホストのプレビューレンダラーへのリクエスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// フレームファイルのプレフィックス（ディレクトリ + `<name>_frame`）
    pub output_prefix: PathBuf,
    pub range: FrameRange,
    pub width: u32,
    pub height: u32,
    /// 0〜100
    pub quality: u8,
    pub raster_ext: String,
    pub frame_padding: usize,
    pub off_screen: bool,
    pub show_ornaments: bool,
}

/// レンダリング済みフレーム連番
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSequence {
    pub dir: PathBuf,
    pub base_name: String,
    pub range: FrameRange,
    pub padding: usize,
    pub raster_ext: String,
}

impl FrameSequence {
    /// 指定フレームのファイルパス
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use scenebatch::domain::entities::frame_range::FrameRange;
    /// use scenebatch::domain::entities::render_request::FrameSequence;
    ///
    /// let seq = FrameSequence {
    ///     dir: PathBuf::from("/renders/Walk"),
    ///     base_name: "Walk".to_string(),
    ///     range: FrameRange::new(1.0, 10.0),
    ///     padding: 4,
    ///     raster_ext: "jpg".to_string(),
    /// };
    /// assert_eq!(seq.frame_path(7), PathBuf::from("/renders/Walk/Walk_frame.0007.jpg"));
    /// ```
    pub fn frame_path(&self, frame: i64) -> PathBuf {
        self.dir.join(format!(
            "{}{}.{:0width$}.{}",
            self.base_name,
            FRAME_SUFFIX,
            frame,
            self.raster_ext,
            width = self.padding
        ))
    }

    /// 昇順の期待フレームパス
    pub fn expected_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.range.frames().map(|frame| self.frame_path(frame))
    }
}

/// アニメーション画像の組み立て結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyReport {
    pub frames_written: usize,
    pub frames_missing: usize,
}
