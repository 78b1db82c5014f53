//! # Animation Assembler Trait
//!
//! フレーム連番からアニメーション画像を組み立てる処理を抽象化

use std::path::Path;

use crate::domain::entities::render_request::{AssemblyReport, FrameSequence};
use crate::domain::errors::ProcessingError;

/// アニメーション画像アセンブラ
///
/// 欠けているフレームは読み飛ばす。フレームが1枚も無い場合はエラー。
pub trait AnimationAssembler: Send + Sync {
    /// 出力ファイルの拡張子
    fn extension(&self) -> &'static str;

    /// フレーム連番を `output` に書き出す（同期処理）
    fn assemble(
        &self,
        frames: &FrameSequence,
        output: &Path,
    ) -> Result<AssemblyReport, ProcessingError>;
}
