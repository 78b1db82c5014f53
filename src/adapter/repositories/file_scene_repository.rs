//! File Scene Repository Implementation
//!
//! SceneRepositoryのファイルシステム実装

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, info};
use walkdir::WalkDir;

use crate::domain::entities::scene_file::SceneFile;
use crate::domain::errors::ProcessingError;
use crate::domain::repositories::scene_repository::{SceneQuery, SceneRepository};

/// ディレクトリ直下のシーンファイル走査
///
/// `iter()` を呼ぶたびにディレクトリを読み直すため、何度でも走査し直せる。
#[derive(Debug, Clone)]
pub struct SceneScan {
    dir: PathBuf,
    extensions: Vec<String>,
    allow_list: Vec<String>,
}

impl SceneScan {
    /// 走査を作成する
    ///
    /// # Errors
    ///
    /// ディレクトリが存在しない（またはディレクトリでない）場合は `DirectoryNotFound`
    pub fn new(query: &SceneQuery) -> Result<Self, ProcessingError> {
        let expanded = shellexpand::tilde(&query.dir);
        let dir = PathBuf::from(expanded.as_ref());

        if !dir.is_dir() {
            return Err(ProcessingError::DirectoryNotFound { path: dir });
        }

        // ホストに渡すパスは絶対パス（シンボリックリンク解決済み）にそろえる
        let dir = dir
            .canonicalize()
            .map_err(|_| ProcessingError::DirectoryNotFound { path: dir.clone() })?;

        Ok(Self {
            dir,
            extensions: query.extensions.clone(),
            allow_list: query.allow_list.clone(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// ファイル名順にシーンファイルを返すイテレータ
    pub fn iter(&self) -> impl Iterator<Item = SceneFile> + '_ {
        WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| SceneFile::from_path(entry.path(), &self.extensions))
            .filter(|scene| self.is_allowed(scene))
    }

    fn is_allowed(&self, scene: &SceneFile) -> bool {
        if self.allow_list.is_empty() || self.allow_list.iter().any(|n| n == scene.logical_name()) {
            true
        } else {
            debug!("Not in allow list: {}", scene.path().display());
            false
        }
    }
}

/// ファイルシステムベースのシーンリポジトリ
pub struct FileSceneRepository;

impl FileSceneRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// シーンファイルを発見する（内部実装）
    fn discover_scene_files_internal(query: &SceneQuery) -> Result<Vec<SceneFile>, ProcessingError> {
        let scan = SceneScan::new(query)?;
        let scenes: Vec<SceneFile> = scan.iter().collect();

        info!(
            "Found {} scene files in {}",
            scenes.len(),
            scan.dir().display()
        );

        Ok(scenes)
    }
}

#[async_trait]
impl SceneRepository for FileSceneRepository {
    async fn discover_scene_files(
        &self,
        query: &SceneQuery,
    ) -> Result<Vec<SceneFile>, ProcessingError> {
        let query = query.clone();
        let dir = PathBuf::from(&query.dir);
        tokio::task::spawn_blocking(move || Self::discover_scene_files_internal(&query))
            .await
            .map_err(|e| ProcessingError::OutputPath {
                path: dir,
                message: format!("Failed to spawn blocking task: {}", e),
            })?
    }
}

impl Default for FileSceneRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn query(dir: &Path, allow_list: &[&str]) -> SceneQuery {
        SceneQuery {
            dir: dir.to_string_lossy().to_string(),
            extensions: vec!["ma".to_string(), "mb".to_string()],
            allow_list: allow_list.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "").unwrap();
    }

    fn names(scenes: &[SceneFile]) -> Vec<String> {
        scenes
            .iter()
            .map(|s| s.path().file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_discover_matching_files_in_name_order() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["Walk.mb", "Idle.ma", "notes.txt", "Run.MA", "Jump.ma.bak"] {
            touch(temp_dir.path(), name);
        }

        let scenes =
            FileSceneRepository::discover_scene_files_internal(&query(temp_dir.path(), &[]))
                .unwrap();

        assert_eq!(names(&scenes), vec!["Idle.ma", "Walk.mb"]);
    }

    #[test]
    fn test_discover_is_top_level_only() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "A.ma");
        fs::create_dir(temp_dir.path().join("incrementalSave")).unwrap();
        touch(&temp_dir.path().join("incrementalSave"), "A.0001.ma");
        fs::create_dir(temp_dir.path().join("folder.ma")).unwrap();

        let scenes =
            FileSceneRepository::discover_scene_files_internal(&query(temp_dir.path(), &[]))
                .unwrap();

        assert_eq!(names(&scenes), vec!["A.ma"]);
    }

    #[test]
    fn test_allow_list_filters_by_logical_name() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["A.ma", "B.mb", "C.ma"] {
            touch(temp_dir.path(), name);
        }

        let scenes = FileSceneRepository::discover_scene_files_internal(&query(
            temp_dir.path(),
            &["C", "B", "Z"],
        ))
        .unwrap();

        assert_eq!(names(&scenes), vec!["B.mb", "C.ma"]);
    }

    #[test]
    fn test_empty_directory_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();

        let scenes =
            FileSceneRepository::discover_scene_files_internal(&query(temp_dir.path(), &[]))
                .unwrap();

        assert!(scenes.is_empty());
    }

    #[test]
    fn test_missing_directory() {
        let err = FileSceneRepository::discover_scene_files_internal(&query(
            Path::new("/nonexistent/anims"),
            &[],
        ))
        .unwrap_err();

        assert_eq!(
            err,
            ProcessingError::DirectoryNotFound {
                path: PathBuf::from("/nonexistent/anims")
            }
        );
    }

    #[test]
    fn test_scan_is_restartable() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "A.ma");

        let scan = SceneScan::new(&query(temp_dir.path(), &[])).unwrap();
        assert_eq!(scan.iter().count(), 1);

        touch(temp_dir.path(), "B.ma");
        assert_eq!(scan.iter().count(), 2);
        assert_eq!(scan.iter().count(), 2);
    }

    #[test]
    fn test_relative_directory_yields_absolute_paths() {
        // テストはマニフェストディレクトリをカレントにして実行される
        let query = SceneQuery {
            dir: "tests/fixtures".to_string(),
            extensions: vec!["json".to_string()],
            allow_list: vec![],
        };

        let scenes = FileSceneRepository::discover_scene_files_internal(&query).unwrap();

        let expected = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures/config.json")
            .canonicalize()
            .unwrap();
        assert_eq!(scenes.len(), 1);
        assert!(scenes[0].path().is_absolute());
        assert_eq!(scenes[0].path(), expected.as_path());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_resolved() {
        let temp_dir = TempDir::new().unwrap();
        let real = temp_dir.path().join("real");
        fs::create_dir(&real).unwrap();
        touch(&real, "Walk.ma");
        let link = temp_dir.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let scenes = FileSceneRepository::discover_scene_files_internal(&query(&link, &[])).unwrap();

        assert_eq!(
            scenes[0].path(),
            real.canonicalize().unwrap().join("Walk.ma").as_path()
        );
    }

    #[tokio::test]
    async fn test_discover_via_trait() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "Stretch.ma");

        let repo = FileSceneRepository::new();
        let scenes = repo
            .discover_scene_files(&query(temp_dir.path(), &[]))
            .await
            .unwrap();

        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes[0].logical_name(), "Stretch");
    }
}
