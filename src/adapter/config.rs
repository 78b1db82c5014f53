//! Configuration
//!
//! JSON設定ファイルの読み込み

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::application::dto::processing_config::ProcessingConfig;
use crate::application::procedures::export_animation::default_cleanup_nodes;
use crate::application::procedures::{ReferenceRepair, RenderSettings};
use crate::domain::entities::export_options::ExportOptions;
use crate::domain::entities::node_selection::NodeSelection;
use crate::domain::entities::scene_file::{BINARY_EXTENSION, NATIVE_EXTENSION};
use crate::domain::services::retry_policy::RetryPolicy;

/// デフォルトの設定ファイルパス
pub const DEFAULT_CONFIG_PATH: &str = "./.scenebatch/config.json";

/// ホストブリッジの起動コマンド
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HostConfig {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            command: "mayapy".to_string(),
            args: vec!["-m".to_string(), "scenebatch_bridge".to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub scene_dir: String,
    pub output_dir: String,
    pub extensions: Vec<String>,
    /// 処理するシーンの論理名（空の場合はすべて）
    pub allow_list: Vec<String>,

    // Export
    pub export: ExportOptions,
    pub selection: NodeSelection,
    pub cleanup_nodes: Vec<String>,

    // Reference repair / render
    pub reference_repair: Option<ReferenceRepair>,
    pub render: RenderSettings,

    // Host session
    pub host: HostConfig,
    pub file_timeout_secs: Option<u64>,
    pub open_retry: RetryPolicy,
    pub save_modified_scenes: bool,

    pub report_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scene_dir: ".".to_string(),
            output_dir: "./FBX".to_string(),
            extensions: vec![NATIVE_EXTENSION.to_string(), BINARY_EXTENSION.to_string()],
            allow_list: Vec::new(),
            export: ExportOptions::default(),
            selection: NodeSelection::default(),
            cleanup_nodes: default_cleanup_nodes(),
            reference_repair: None,
            render: RenderSettings::default(),
            host: HostConfig::default(),
            file_timeout_secs: None,
            open_retry: RetryPolicy::default(),
            save_modified_scenes: true,
            report_path: None,
        }
    }
}

impl Config {
    /// 設定ファイルを読み込む
    ///
    /// ファイルが存在しない場合はデフォルト設定を返す。
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());

        if !path.exists() {
            log::info!(
                "No config file at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// `~` を展開した出力ディレクトリ
    pub fn output_root(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.output_dir).as_ref())
    }

    /// バッチ処理設定に変換
    pub fn processing_config(&self) -> ProcessingConfig {
        ProcessingConfig::new(
            self.file_timeout_secs.map(Duration::from_secs),
            self.open_retry,
            self.save_modified_scenes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load("/nonexistent/path/config.json").unwrap();

        assert_eq!(config.extensions, vec!["ma", "mb"]);
        assert_eq!(config.cleanup_nodes, default_cleanup_nodes());
        assert!(config.save_modified_scenes);
        assert!(config.reference_repair.is_none());
    }

    #[test]
    fn test_load_partial_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "scene_dir": "/anims",
                "output_dir": "/anims/FBX",
                "allow_list": ["Walk", "Run"],
                "file_timeout_secs": 600,
                "reference_repair": {{
                    "search_token": "old_rig.mb",
                    "replace_path": "/assets/rigs/new_rig.mb"
                }},
                "export": {{ "up_axis": "z" }}
            }}"#
        )
        .unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.scene_dir, "/anims");
        assert_eq!(config.allow_list, vec!["Walk", "Run"]);
        assert_eq!(
            config.reference_repair,
            Some(ReferenceRepair::new("old_rig.mb", "/assets/rigs/new_rig.mb"))
        );
        assert!(config.export.animation_only);
        assert_eq!(config.selection, NodeSelection::default());

        let processing = config.processing_config();
        assert_eq!(processing.file_timeout, Some(Duration::from_secs(600)));
        assert_eq!(processing.open_retry, RetryPolicy::default());
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = Config::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
