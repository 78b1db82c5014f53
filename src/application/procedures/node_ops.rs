//! # Node Operations
//!
//! 複数の変換処理で共有するサブステップ（ノード削除・選択・出力ディレクトリ作成）

use std::path::Path;

use log::info;

use crate::domain::entities::node_selection::NodeSelection;
use crate::domain::errors::ProcessingError;
use crate::domain::repositories::host_session::HostSession;

/// 存在するノードだけを削除する
///
/// 存在しないノードはログに残すのみでエラーにしない。
///
/// # Returns
///
/// 実際に削除したノード名
pub async fn remove_nodes_if_present(
    session: &mut dyn HostSession,
    names: &[String],
) -> Result<Vec<String>, ProcessingError> {
    let mut removed = Vec::new();

    for name in names {
        if session.node_exists(name).await? {
            session.delete_node(name).await?;
            info!("Deleted unrecognized node: {}", name);
            removed.push(name.clone());
        } else {
            info!("No unrecognized node found: {}", name);
        }
    }

    Ok(removed)
}

/// 選択をクリアしてからノードを選択する
///
/// # Returns
///
/// 選択されたノード名
pub async fn select_nodes(
    session: &mut dyn HostSession,
    selection: &NodeSelection,
) -> Result<Vec<String>, ProcessingError> {
    session.clear_selection().await?;

    let selected = match selection {
        NodeSelection::Hierarchy { root } => {
            session.select(std::slice::from_ref(root), true).await?
        }
        NodeSelection::Names { names } => session.select(names, false).await?,
        NodeSelection::Type { node_type } => {
            let nodes = session.list_nodes(node_type).await?;
            if nodes.is_empty() {
                Vec::new()
            } else {
                session.select(&nodes, false).await?
            }
        }
    };

    info!("Selected {} nodes", selected.len());
    Ok(selected)
}

/// 出力ディレクトリを作成する（既に存在する場合は何もしない）
pub async fn ensure_dir(dir: &Path) -> Result<(), ProcessingError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| ProcessingError::output_path(dir, e))
}
