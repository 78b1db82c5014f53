//! # Joint Attribute Procedures
//!
//! ジョイントの属性・トランスフォームを調整する処理
//!
//! - **SetRotateOrderProcedure**: すべてのジョイントの回転順序を設定
//! - **DisableSegmentScaleCompensateProcedure**: セグメントスケール補正を無効化
//! - **SnapJointProcedure**: ジョイントを別ジョイントの位置へスナップ

use std::path::Path;

use async_trait::async_trait;
use log::info;

use crate::domain::entities::node_attribute::{
    AttributeValue, RotateOrder, JOINT_NODE_TYPE, SEGMENT_SCALE_COMPENSATE,
};
use crate::domain::entities::scene_file::SceneFile;
use crate::domain::errors::ProcessingError;
use crate::domain::procedure::{ProcedureOutcome, SceneProcedure};
use crate::domain::repositories::host_session::HostSession;
use crate::domain::services::joint_snap::{snap_position, SnapAxes};

/// 回転順序設定処理
pub struct SetRotateOrderProcedure {
    order: RotateOrder,
    preserve_orientation: bool,
}

impl SetRotateOrderProcedure {
    pub fn new(order: RotateOrder, preserve_orientation: bool) -> Self {
        Self {
            order,
            preserve_orientation,
        }
    }
}

#[async_trait]
impl SceneProcedure for SetRotateOrderProcedure {
    fn name(&self) -> &'static str {
        "rotate-order"
    }

    async fn apply(
        &self,
        scene: &SceneFile,
        _output_root: &Path,
        session: &mut dyn HostSession,
    ) -> Result<ProcedureOutcome, ProcessingError> {
        let joints = session.list_nodes(JOINT_NODE_TYPE).await?;
        if joints.is_empty() {
            return Ok(ProcedureOutcome::skipped("scene has no joints"));
        }

        for joint in &joints {
            session
                .set_rotate_order(joint, self.order, self.preserve_orientation)
                .await?;
        }

        info!(
            "{}: set rotate order {} on {} joints",
            scene.logical_name(),
            self.order,
            joints.len()
        );
        Ok(ProcedureOutcome::modified())
    }
}

/// セグメントスケール補正の無効化処理
///
/// `joints` が空の場合はシーン内のすべてのジョイントが対象。
pub struct DisableSegmentScaleCompensateProcedure {
    joints: Vec<String>,
}

impl DisableSegmentScaleCompensateProcedure {
    pub fn new(joints: Vec<String>) -> Self {
        Self { joints }
    }
}

#[async_trait]
impl SceneProcedure for DisableSegmentScaleCompensateProcedure {
    fn name(&self) -> &'static str {
        "disable-ssc"
    }

    async fn apply(
        &self,
        scene: &SceneFile,
        _output_root: &Path,
        session: &mut dyn HostSession,
    ) -> Result<ProcedureOutcome, ProcessingError> {
        let joints = if self.joints.is_empty() {
            session.list_nodes(JOINT_NODE_TYPE).await?
        } else {
            self.joints.clone()
        };
        if joints.is_empty() {
            return Ok(ProcedureOutcome::skipped("scene has no joints"));
        }

        for joint in &joints {
            session
                .set_attribute(joint, SEGMENT_SCALE_COMPENSATE, AttributeValue::Bool(false))
                .await?;
        }

        info!(
            "{}: segment scale compensate turned off for {} joints",
            scene.logical_name(),
            joints.len()
        );
        Ok(ProcedureOutcome::modified())
    }
}

/// ジョイントスナップ処理
pub struct SnapJointProcedure {
    target: String,
    source: String,
    axes: SnapAxes,
}

impl SnapJointProcedure {
    pub fn new(target: impl Into<String>, source: impl Into<String>, axes: SnapAxes) -> Self {
        Self {
            target: target.into(),
            source: source.into(),
            axes,
        }
    }
}

#[async_trait]
impl SceneProcedure for SnapJointProcedure {
    fn name(&self) -> &'static str {
        "snap-joint"
    }

    async fn apply(
        &self,
        scene: &SceneFile,
        _output_root: &Path,
        session: &mut dyn HostSession,
    ) -> Result<ProcedureOutcome, ProcessingError> {
        let source = session.world_translation(&self.source).await?;
        let target = session.world_translation(&self.target).await?;
        let snapped = snap_position(target, source, self.axes);

        session.set_world_translation(&self.target, snapped).await?;

        info!(
            "{}: snapped {} to {} at {:?}",
            scene.logical_name(),
            self.target,
            self.source,
            snapped
        );
        Ok(ProcedureOutcome::modified())
    }
}
