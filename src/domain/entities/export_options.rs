//! # ExportOptions Value Object
//!
//! インターチェンジ形式エクスポートのオプション
//!
//! ホストのエクスポートコマンドにはフラットな名前付きオプションとして渡される。

use serde::{Deserialize, Serialize};

use super::frame_range::FrameRange;

/// 回転の表現
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationRepresentation {
    Euler,
    Quaternion,
}

/// アップ軸
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpAxis {
    Y,
    Z,
}

/// エクスポートオプション
///
/// デフォルトはゲームエンジン向けアニメーション書き出しの設定
/// （アニメーションのみ・ベイク有効・オイラー角・Y-up・バイナリ出力）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub include_animation: bool,
    pub animation_only: bool,
    pub bake_complex_animation: bool,
    /// 未指定の場合はシーンの再生範囲
    pub bake_start: Option<f64>,
    /// 未指定の場合はシーンの再生範囲
    pub bake_end: Option<f64>,
    pub resample_animation: bool,
    pub rotation: RotationRepresentation,
    pub up_axis: UpAxis,
    pub include_children: bool,
    pub triangulate: bool,
    pub embedded_textures: bool,
    pub ascii: bool,
    pub use_scene_name: bool,
    pub file_version: Option<String>,
    pub cameras: bool,
    pub lights: bool,
    pub constraints: bool,
    pub skins: bool,
    pub shapes: bool,
    pub smoothing_groups: bool,
    pub smooth_mesh: bool,
    pub tangents: bool,
    pub input_connections: bool,
    pub referenced_assets_content: bool,
    pub constant_key_reducer: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_animation: true,
            animation_only: true,
            bake_complex_animation: true,
            bake_start: None,
            bake_end: None,
            resample_animation: true,
            rotation: RotationRepresentation::Euler,
            up_axis: UpAxis::Y,
            include_children: true,
            triangulate: false,
            embedded_textures: false,
            ascii: false,
            use_scene_name: false,
            file_version: Some("FBX202000".to_string()),
            cameras: false,
            lights: false,
            constraints: false,
            skins: true,
            shapes: true,
            smoothing_groups: true,
            smooth_mesh: true,
            tangents: true,
            input_connections: false,
            referenced_assets_content: true,
            constant_key_reducer: false,
        }
    }
}

impl ExportOptions {
    /// ベイク範囲が未指定の部分を再生範囲で補ったオプションを返す
    ///
    /// 明示的に指定された値は上書きしない。
    pub fn with_bake_range(&self, range: FrameRange) -> Self {
        Self {
            bake_start: Some(self.bake_start.unwrap_or(range.start)),
            bake_end: Some(self.bake_end.unwrap_or(range.end)),
            ..self.clone()
        }
    }
}
