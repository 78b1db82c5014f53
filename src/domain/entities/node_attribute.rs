//! # Node Attribute Value Objects
//!
//! ノード属性値とジョイントの回転順序

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// ジョイントのセグメントスケール補正属性
pub const SEGMENT_SCALE_COMPENSATE: &str = "segmentScaleCompensate";
/// ジョイントのノードタイプ
pub const JOINT_NODE_TYPE: &str = "joint";

/// 属性値
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// 回転順序
///
/// ホスト側の `rotateOrder` 属性値（0〜5）に対応する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotateOrder {
    Xyz = 0,
    Yzx = 1,
    Zxy = 2,
    Xzy = 3,
    Yxz = 4,
    Zyx = 5,
}

impl RotateOrder {
    pub fn index(self) -> i64 {
        self as i64
    }

    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(RotateOrder::Xyz),
            1 => Some(RotateOrder::Yzx),
            2 => Some(RotateOrder::Zxy),
            3 => Some(RotateOrder::Xzy),
            4 => Some(RotateOrder::Yxz),
            5 => Some(RotateOrder::Zyx),
            _ => None,
        }
    }
}

impl fmt::Display for RotateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RotateOrder::Xyz => "xyz",
            RotateOrder::Yzx => "yzx",
            RotateOrder::Zxy => "zxy",
            RotateOrder::Xzy => "xzy",
            RotateOrder::Yxz => "yxz",
            RotateOrder::Zyx => "zyx",
        };
        f.write_str(name)
    }
}

impl FromStr for RotateOrder {
    type Err = String;

    /// 軸名（`xzy`）またはインデックス（`3`）を受け付ける
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(index) = s.parse::<i64>() {
            return RotateOrder::from_index(index)
                .ok_or_else(|| format!("rotate order index out of range: {}", index));
        }
        match s.to_ascii_lowercase().as_str() {
            "xyz" => Ok(RotateOrder::Xyz),
            "yzx" => Ok(RotateOrder::Yzx),
            "zxy" => Ok(RotateOrder::Zxy),
            "xzy" => Ok(RotateOrder::Xzy),
            "yxz" => Ok(RotateOrder::Yxz),
            "zyx" => Ok(RotateOrder::Zyx),
            other => Err(format!("unknown rotate order: {}", other)),
        }
    }
}
