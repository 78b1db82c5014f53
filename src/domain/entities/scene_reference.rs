//! # SceneReference Entity
//!
//! シーンに読み込まれている外部リファレンス

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// 外部リファレンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneReference {
    /// ホストが返すリファレンスのハンドル（リファレンスファイル名）
    pub handle: String,
    /// リファレンスノード名（リロード操作の対象）
    pub node: String,
    /// 現在のディスク上のパス
    pub path: PathBuf,
    /// ロード済みかどうか
    pub loaded: bool,
}

impl SceneReference {
    /// パスに検索トークンが含まれるか（部分一致）
    ///
    /// ```
    /// use scenebatch::domain::entities::scene_reference::SceneReference;
    ///
    /// let reference = SceneReference {
    ///     handle: "rigRN".to_string(),
    ///     node: "rigRN".to_string(),
    ///     path: "/assets/rigs/old_rig.mb".into(),
    ///     loaded: true,
    /// };
    /// assert!(reference.matches("old_rig.mb"));
    /// assert!(!reference.matches("new_rig.mb"));
    /// ```
    pub fn matches(&self, search_token: &str) -> bool {
        self.path.to_string_lossy().contains(search_token)
    }
}
