//! # Host Session Trait
//!
//! ホストアプリケーション（シーングラフAPI）とのセッションを抽象化
//!
//! 現在のシーン・選択状態・再生範囲といったホスト側のグローバル状態は、
//! すべてこのセッション経由で明示的に扱う。テストでは偽のセッションに差し替える。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::export_options::ExportOptions;
use crate::domain::entities::frame_range::FrameRange;
use crate::domain::entities::node_attribute::{AttributeValue, RotateOrder};
use crate::domain::entities::render_request::RenderRequest;
use crate::domain::entities::scene_reference::SceneReference;
use crate::domain::errors::HostError;

/// シーンを開くときのオプション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenOptions {
    /// 未保存の変更を破棄して開く
    pub force: bool,
    /// リファレンスを読み込む（壊れたリファレンスを修正する場合は `false`）
    pub load_references: bool,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            force: true,
            load_references: true,
        }
    }
}

/// ホストセッション
///
/// ホストは再入不可能なため、すべての呼び出しは1つずつ完了を待って行う。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HostSession: Send {
    /// セッションを初期化する（既に起動済みなら何もしない）
    async fn initialize(&mut self) -> Result<(), HostError>;

    /// セッションを終了する
    async fn teardown(&mut self) -> Result<(), HostError>;

    /// 応答しなくなったセッションを再初期化する
    async fn recover(&mut self) -> Result<(), HostError>;

    /// シーンファイルを開く
    async fn open_scene(&mut self, path: &Path, options: OpenOptions) -> Result<(), HostError>;

    /// 現在のシーンを上書き保存する
    async fn save_scene(&mut self) -> Result<(), HostError>;

    /// 現在開いているシーンのパス
    fn current_scene(&self) -> Option<PathBuf>;

    async fn node_exists(&mut self, name: &str) -> Result<bool, HostError>;

    async fn delete_node(&mut self, name: &str) -> Result<(), HostError>;

    /// 指定タイプのノード名を列挙する
    async fn list_nodes(&mut self, node_type: &str) -> Result<Vec<String>, HostError>;

    async fn clear_selection(&mut self) -> Result<(), HostError>;

    /// ノードを選択に追加し、選択後の全ノードを返す
    ///
    /// `hierarchy` が `true` の場合は階層下のノードも選択する。
    async fn select(&mut self, names: &[String], hierarchy: bool)
        -> Result<Vec<String>, HostError>;

    async fn set_attribute(
        &mut self,
        node: &str,
        attribute: &str,
        value: AttributeValue,
    ) -> Result<(), HostError>;

    /// 回転順序を設定する（`preserve_orientation` の場合は見た目の姿勢を保つ）
    async fn set_rotate_order(
        &mut self,
        node: &str,
        order: RotateOrder,
        preserve_orientation: bool,
    ) -> Result<(), HostError>;

    async fn world_translation(&mut self, node: &str) -> Result<[f64; 3], HostError>;

    async fn set_world_translation(
        &mut self,
        node: &str,
        translation: [f64; 3],
    ) -> Result<(), HostError>;

    /// 現在の再生範囲
    async fn playback_range(&mut self) -> Result<FrameRange, HostError>;

    /// シーンのリファレンスハンドルを列挙する
    async fn list_references(&mut self) -> Result<Vec<String>, HostError>;

    /// リファレンスのパス・ノード・ロード状態を取得する
    async fn describe_reference(&mut self, handle: &str) -> Result<SceneReference, HostError>;

    /// リファレンスノードを別パスで読み直す
    async fn reload_reference(&mut self, node: &str, path: &Path) -> Result<(), HostError>;

    /// 選択中のノードをエクスポートする
    async fn export(&mut self, path: &Path, options: &ExportOptions) -> Result<(), HostError>;

    /// プレビューをフレーム連番としてレンダリングする
    async fn render(&mut self, request: &RenderRequest) -> Result<(), HostError>;
}
