//! # NodeSelection Value Object
//!
//! エクスポート対象ノードの選択方法

use serde::{Deserialize, Serialize};

/// ノード選択方法
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum NodeSelection {
    /// ルートノードとその階層下すべて
    Hierarchy { root: String },
    /// 名前で指定したノード
    Names { names: Vec<String> },
    /// 指定タイプのノードすべて
    Type { node_type: String },
}

impl Default for NodeSelection {
    fn default() -> Self {
        NodeSelection::Hierarchy {
            root: "Root_M".to_string(),
        }
    }
}
