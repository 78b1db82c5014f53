//! # Joint Snap Service
//!
//! ジョイントを別ジョイントの位置へスナップする座標計算

use serde::{Deserialize, Serialize};

/// スナップする軸
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapAxes {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl Default for SnapAxes {
    fn default() -> Self {
        Self {
            x: true,
            y: true,
            z: true,
        }
    }
}

impl SnapAxes {
    /// `"xz"` のような軸指定文字列から作成
    ///
    /// ```
    /// use scenebatch::domain::services::joint_snap::SnapAxes;
    ///
    /// let axes = SnapAxes::parse("xz").unwrap();
    /// assert!(axes.x && !axes.y && axes.z);
    /// assert!(SnapAxes::parse("w").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        let mut axes = SnapAxes {
            x: false,
            y: false,
            z: false,
        };
        for c in s.chars() {
            match c.to_ascii_lowercase() {
                'x' => axes.x = true,
                'y' => axes.y = true,
                'z' => axes.z = true,
                other => return Err(format!("unknown axis: {}", other)),
            }
        }
        Ok(axes)
    }
}

/// スナップ後のワールド座標
///
/// 指定軸は `source` の値、それ以外は `target` の値を保つ。
pub fn snap_position(target: [f64; 3], source: [f64; 3], axes: SnapAxes) -> [f64; 3] {
    [
        if axes.x { source[0] } else { target[0] },
        if axes.y { source[1] } else { target[1] },
        if axes.z { source[2] } else { target[2] },
    ]
}
