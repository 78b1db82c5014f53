//! In-Memory Host Session
//!
//! ホストアプリケーションを使わずにバッチ処理を動かすためのセッション
//!
//! シーンはパスごとにメモリ上に登録する。エクスポートとレンダリングは
//! 実際にファイルを書き出すので、出力パスや GIF 作成まで検証できる。

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use image::{Rgb, RgbImage};

use scenebatch::domain::entities::export_options::ExportOptions;
use scenebatch::domain::entities::frame_range::FrameRange;
use scenebatch::domain::entities::node_attribute::{AttributeValue, RotateOrder};
use scenebatch::domain::entities::render_request::RenderRequest;
use scenebatch::domain::entities::scene_reference::SceneReference;
use scenebatch::domain::errors::HostError;
use scenebatch::domain::repositories::host_session::{HostSession, OpenOptions};

/// シーン内のノード
#[derive(Debug, Clone, PartialEq)]
pub struct FakeNode {
    pub node_type: String,
    pub parent: Option<String>,
    pub attributes: BTreeMap<String, AttributeValue>,
    pub rotate_order: RotateOrder,
    pub translation: [f64; 3],
}

/// メモリ上のシーン
#[derive(Debug, Clone)]
pub struct FakeScene {
    pub nodes: BTreeMap<String, FakeNode>,
    pub playback_range: FrameRange,
    pub references: Vec<SceneReference>,
    /// 解決できないリファレンスのハンドル
    pub broken_references: HashSet<String>,
    /// 開こうとすると返すエラー
    pub load_error: Option<HostError>,
}

impl FakeScene {
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            nodes: BTreeMap::new(),
            playback_range: FrameRange::new(start, end),
            references: Vec::new(),
            broken_references: HashSet::new(),
            load_error: None,
        }
    }

    /// `Root_M` を頂点とする最小限のリグ
    pub fn rig(start: f64, end: f64) -> Self {
        [
            ("Root_M", None),
            ("Spine1_M", Some("Root_M")),
            ("Hip_R", Some("Root_M")),
            ("Knee_R", Some("Hip_R")),
        ]
        .into_iter()
        .fold(Self::new(start, end), |scene, (name, parent)| {
            scene.with_node(name, "joint", parent)
        })
    }

    pub fn with_node(mut self, name: &str, node_type: &str, parent: Option<&str>) -> Self {
        self.nodes.insert(
            name.to_string(),
            FakeNode {
                node_type: node_type.to_string(),
                parent: parent.map(String::from),
                attributes: BTreeMap::new(),
                rotate_order: RotateOrder::Xyz,
                translation: [0.0; 3],
            },
        );
        self
    }

    pub fn with_translation(mut self, name: &str, translation: [f64; 3]) -> Self {
        if let Some(node) = self.nodes.get_mut(name) {
            node.translation = translation;
        }
        self
    }

    pub fn with_reference(mut self, handle: &str, node: &str, path: impl Into<PathBuf>) -> Self {
        self.references.push(SceneReference {
            handle: handle.to_string(),
            node: node.to_string(),
            path: path.into(),
            loaded: true,
        });
        self
    }

    pub fn with_broken_reference(mut self, handle: &str) -> Self {
        self.broken_references.insert(handle.to_string());
        self
    }

    pub fn with_load_error(mut self, error: HostError) -> Self {
        self.load_error = Some(error);
        self
    }

    fn node_mut(&mut self, name: &str) -> Result<&mut FakeNode, HostError> {
        self.nodes
            .get_mut(name)
            .ok_or_else(|| HostError::NodeNotFound(name.to_string()))
    }

    fn descendants(&self, root: &str) -> Vec<String> {
        let mut found = vec![root.to_string()];
        let mut index = 0;
        while index < found.len() {
            let parent = found[index].clone();
            found.extend(
                self.nodes
                    .iter()
                    .filter(|(_, node)| node.parent.as_deref() == Some(parent.as_str()))
                    .map(|(name, _)| name.clone()),
            );
            index += 1;
        }
        found
    }
}

/// メモリ上のホストセッション
#[derive(Debug, Default)]
pub struct InMemoryHostSession {
    /// 保存済みのシーン（パスごと）
    scenes: HashMap<PathBuf, FakeScene>,
    /// 開こうとすると応答しなくなるシーン
    hanging: HashSet<PathBuf>,
    open: Option<(PathBuf, FakeScene)>,
    selection: Vec<String>,
    running: bool,
    initialize_error: Option<HostError>,

    pub initialize_calls: usize,
    pub teardown_calls: usize,
    pub recover_calls: usize,
    pub opened: Vec<PathBuf>,
    pub saved: Vec<PathBuf>,
    pub exports: Vec<(PathBuf, ExportOptions)>,
    pub renders: Vec<RenderRequest>,
}

impl InMemoryHostSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// シーンを登録する
    pub fn add_scene(&mut self, path: impl Into<PathBuf>, scene: FakeScene) -> &mut Self {
        self.scenes.insert(path.into(), scene);
        self
    }

    /// 開くと応答が返らないシーンを登録する
    pub fn add_hanging_scene(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.hanging.insert(path.into());
        self
    }

    pub fn fail_initialize(&mut self, error: HostError) -> &mut Self {
        self.initialize_error = Some(error);
        self
    }

    /// 保存済みのシーン状態
    pub fn scene(&self, path: &Path) -> Option<&FakeScene> {
        self.scenes.get(path)
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    fn ensure_running(&self) -> Result<(), HostError> {
        if self.running {
            Ok(())
        } else {
            Err(HostError::Unavailable("session is not initialized".to_string()))
        }
    }

    fn open_scene_mut(&mut self) -> Result<&mut FakeScene, HostError> {
        self.ensure_running()?;
        self.open
            .as_mut()
            .map(|(_, scene)| scene)
            .ok_or_else(|| HostError::Rejected("no scene is open".to_string()))
    }

    fn write_file(path: &Path, contents: &[u8]) -> Result<(), HostError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| HostError::Rejected(e.to_string()))?;
        }
        fs::write(path, contents).map_err(|e| HostError::Rejected(e.to_string()))
    }
}

#[async_trait]
impl HostSession for InMemoryHostSession {
    async fn initialize(&mut self) -> Result<(), HostError> {
        self.initialize_calls += 1;
        if let Some(error) = self.initialize_error.clone() {
            return Err(error);
        }
        self.running = true;
        Ok(())
    }

    async fn teardown(&mut self) -> Result<(), HostError> {
        self.teardown_calls += 1;
        self.ensure_running()?;
        self.running = false;
        self.open = None;
        Ok(())
    }

    async fn recover(&mut self) -> Result<(), HostError> {
        self.recover_calls += 1;
        self.open = None;
        self.selection.clear();
        self.running = true;
        Ok(())
    }

    async fn open_scene(&mut self, path: &Path, _options: OpenOptions) -> Result<(), HostError> {
        self.ensure_running()?;
        if self.hanging.contains(path) {
            std::future::pending::<()>().await;
        }

        self.opened.push(path.to_path_buf());
        let scene = self
            .scenes
            .get(path)
            .ok_or_else(|| HostError::Rejected(format!("cannot open {}", path.display())))?;
        if let Some(error) = &scene.load_error {
            return Err(error.clone());
        }

        self.open = Some((path.to_path_buf(), scene.clone()));
        self.selection.clear();
        Ok(())
    }

    async fn save_scene(&mut self) -> Result<(), HostError> {
        self.ensure_running()?;
        let (path, scene) = self
            .open
            .clone()
            .ok_or_else(|| HostError::Rejected("no scene is open".to_string()))?;
        self.scenes.insert(path.clone(), scene);
        self.saved.push(path);
        Ok(())
    }

    fn current_scene(&self) -> Option<PathBuf> {
        self.open.as_ref().map(|(path, _)| path.clone())
    }

    async fn node_exists(&mut self, name: &str) -> Result<bool, HostError> {
        Ok(self.open_scene_mut()?.nodes.contains_key(name))
    }

    async fn delete_node(&mut self, name: &str) -> Result<(), HostError> {
        self.open_scene_mut()?
            .nodes
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| HostError::NodeNotFound(name.to_string()))
    }

    async fn list_nodes(&mut self, node_type: &str) -> Result<Vec<String>, HostError> {
        Ok(self
            .open_scene_mut()?
            .nodes
            .iter()
            .filter(|(_, node)| node.node_type == node_type)
            .map(|(name, _)| name.clone())
            .collect())
    }

    async fn clear_selection(&mut self) -> Result<(), HostError> {
        self.ensure_running()?;
        self.selection.clear();
        Ok(())
    }

    async fn select(
        &mut self,
        names: &[String],
        hierarchy: bool,
    ) -> Result<Vec<String>, HostError> {
        let scene = self.open_scene_mut()?;
        let mut picked = Vec::new();
        for name in names {
            if !scene.nodes.contains_key(name) {
                return Err(HostError::NodeNotFound(name.clone()));
            }
            if hierarchy {
                picked.extend(scene.descendants(name));
            } else {
                picked.push(name.clone());
            }
        }

        for name in picked {
            if !self.selection.contains(&name) {
                self.selection.push(name);
            }
        }
        Ok(self.selection.clone())
    }

    async fn set_attribute(
        &mut self,
        node: &str,
        attribute: &str,
        value: AttributeValue,
    ) -> Result<(), HostError> {
        self.open_scene_mut()?
            .node_mut(node)?
            .attributes
            .insert(attribute.to_string(), value);
        Ok(())
    }

    async fn set_rotate_order(
        &mut self,
        node: &str,
        order: RotateOrder,
        _preserve_orientation: bool,
    ) -> Result<(), HostError> {
        self.open_scene_mut()?.node_mut(node)?.rotate_order = order;
        Ok(())
    }

    async fn world_translation(&mut self, node: &str) -> Result<[f64; 3], HostError> {
        Ok(self.open_scene_mut()?.node_mut(node)?.translation)
    }

    async fn set_world_translation(
        &mut self,
        node: &str,
        translation: [f64; 3],
    ) -> Result<(), HostError> {
        self.open_scene_mut()?.node_mut(node)?.translation = translation;
        Ok(())
    }

    async fn playback_range(&mut self) -> Result<FrameRange, HostError> {
        Ok(self.open_scene_mut()?.playback_range)
    }

    async fn list_references(&mut self) -> Result<Vec<String>, HostError> {
        Ok(self
            .open_scene_mut()?
            .references
            .iter()
            .map(|r| r.handle.clone())
            .collect())
    }

    async fn describe_reference(&mut self, handle: &str) -> Result<SceneReference, HostError> {
        let scene = self.open_scene_mut()?;
        if scene.broken_references.contains(handle) {
            return Err(HostError::Rejected(format!(
                "reference file for {} cannot be resolved",
                handle
            )));
        }
        scene
            .references
            .iter()
            .find(|r| r.handle == handle)
            .cloned()
            .ok_or_else(|| HostError::NodeNotFound(handle.to_string()))
    }

    async fn reload_reference(&mut self, node: &str, path: &Path) -> Result<(), HostError> {
        let reference = self
            .open_scene_mut()?
            .references
            .iter_mut()
            .find(|r| r.node == node)
            .ok_or_else(|| HostError::NodeNotFound(node.to_string()))?;
        reference.path = path.to_path_buf();
        reference.loaded = true;
        Ok(())
    }

    async fn export(&mut self, path: &Path, options: &ExportOptions) -> Result<(), HostError> {
        self.ensure_running()?;
        if self.selection.is_empty() {
            return Err(HostError::Rejected("nothing is selected".to_string()));
        }
        Self::write_file(path, self.selection.join("\n").as_bytes())?;
        self.exports.push((path.to_path_buf(), options.clone()));
        Ok(())
    }

    async fn render(&mut self, request: &RenderRequest) -> Result<(), HostError> {
        self.open_scene_mut()?;
        for frame in request.range.frames() {
            let path = PathBuf::from(format!(
                "{}.{:0width$}.{}",
                request.output_prefix.display(),
                frame,
                request.raster_ext,
                width = request.frame_padding
            ));
            let shade = (frame.rem_euclid(8) * 32) as u8;
            RgbImage::from_pixel(request.width, request.height, Rgb([shade, shade, 255]))
                .save(&path)
                .map_err(|e| HostError::Rejected(format!("{}: {}", path.display(), e)))?;
        }
        self.renders.push(request.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn opened(scene: FakeScene) -> InMemoryHostSession {
        let mut session = InMemoryHostSession::new();
        session.add_scene("/anims/Walk.ma", scene);
        session.initialize().await.unwrap();
        session
            .open_scene(Path::new("/anims/Walk.ma"), OpenOptions::default())
            .await
            .unwrap();
        session
    }

    #[tokio::test]
    async fn test_requires_initialize() {
        let mut session = InMemoryHostSession::new();
        session.add_scene("/anims/Walk.ma", FakeScene::new(1.0, 10.0));

        let err = session
            .open_scene(Path::new("/anims/Walk.ma"), OpenOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, HostError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_hierarchy_selection() {
        let mut session = opened(FakeScene::rig(1.0, 10.0)).await;

        let selected = session
            .select(&["Hip_R".to_string()], true)
            .await
            .unwrap();

        assert_eq!(selected, vec!["Hip_R", "Knee_R"]);
    }

    #[tokio::test]
    async fn test_unsaved_changes_are_discarded_on_reopen() {
        let mut session = opened(FakeScene::rig(1.0, 10.0)).await;
        session.delete_node("Knee_R").await.unwrap();

        session
            .open_scene(Path::new("/anims/Walk.ma"), OpenOptions::default())
            .await
            .unwrap();
        assert!(session.node_exists("Knee_R").await.unwrap());

        session.delete_node("Knee_R").await.unwrap();
        session.save_scene().await.unwrap();
        let saved = session.scene(Path::new("/anims/Walk.ma")).unwrap();
        assert!(!saved.nodes.contains_key("Knee_R"));
    }

    #[tokio::test]
    async fn test_render_writes_frames() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = opened(FakeScene::new(1.0, 3.0)).await;

        session
            .render(&RenderRequest {
                output_prefix: temp_dir.path().join("Walk_frame"),
                range: FrameRange::new(1.0, 3.0),
                width: 4,
                height: 4,
                quality: 100,
                raster_ext: "png".to_string(),
                frame_padding: 4,
                off_screen: true,
                show_ornaments: false,
            })
            .await
            .unwrap();

        assert!(temp_dir.path().join("Walk_frame.0001.png").is_file());
        assert!(temp_dir.path().join("Walk_frame.0003.png").is_file());
    }
}
