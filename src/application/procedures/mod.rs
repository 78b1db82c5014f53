//! # Scene Procedures
//!
//! `SceneProcedure` の実装（シーンごとの変換処理）
//!
//! ## 処理
//!
//! - **ExportAnimationProcedure**: アニメーションのエクスポート
//! - **RepairReferencesProcedure**: リファレンスパスの修正
//! - **RenderPreviewProcedure**: プレビューレンダリングとアニメーション画像の作成
//! - **joint_attributes**: ジョイント属性の調整

pub mod export_animation;
pub mod joint_attributes;
pub mod node_ops;
pub mod reference_repair;
pub mod render_preview;

pub use export_animation::ExportAnimationProcedure;
pub use joint_attributes::{
    DisableSegmentScaleCompensateProcedure, SetRotateOrderProcedure, SnapJointProcedure,
};
pub use reference_repair::{ReferenceRepair, RepairReferencesProcedure};
pub use render_preview::{RenderPreviewProcedure, RenderSettings};
