//! # FrameRange Value Object
//!
//! シーンの再生範囲（タイムライン範囲）

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// 再生範囲（開始・終了フレームを含む）
///
/// ホストの再生範囲は小数フレームを返すことがあるため `f64` で保持する。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameRange {
    pub start: f64,
    pub end: f64,
}

impl FrameRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// 整数フレームの範囲（小数部は切り捨て）
    ///
    /// ```
    /// use scenebatch::domain::entities::frame_range::FrameRange;
    ///
    /// let range = FrameRange::new(1.0, 4.5);
    /// assert_eq!(range.frames().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    /// ```
    pub fn frames(&self) -> RangeInclusive<i64> {
        (self.start.trunc() as i64)..=(self.end.trunc() as i64)
    }

    pub fn is_empty(&self) -> bool {
        self.frames().is_empty()
    }

    pub fn frame_count(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.end.trunc() as i64 - self.start.trunc() as i64 + 1) as usize
        }
    }
}
