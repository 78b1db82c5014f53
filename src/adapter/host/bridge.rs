//! Host Bridge Session
//!
//! ホストアプリケーション内で動くブリッジスクリプトを子プロセスとして起動し、
//! 標準入出力の改行区切りJSONで操作を依頼する。
//!
//! ```text
//! → {"id":1,"op":"open_scene","params":{"path":"/anims/Walk.ma","force":true,"load_references":true}}
//! ← {"id":1,"ok":true,"result":null}
//! ← {"id":2,"ok":false,"error":{"kind":"busy","message":"file is locked"}}
//! ```

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

use crate::adapter::config::HostConfig;
use crate::domain::entities::export_options::ExportOptions;
use crate::domain::entities::frame_range::FrameRange;
use crate::domain::entities::node_attribute::{AttributeValue, RotateOrder};
use crate::domain::entities::render_request::RenderRequest;
use crate::domain::entities::scene_reference::SceneReference;
use crate::domain::errors::HostError;
use crate::domain::repositories::host_session::{HostSession, OpenOptions};

/// teardown 応答の待ち時間
const TEARDOWN_GRACE: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
struct BridgeRequest<'a> {
    id: u64,
    op: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct BridgeResponse {
    id: u64,
    ok: bool,
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<BridgeError>,
}

#[derive(Debug, Deserialize)]
struct BridgeError {
    kind: String,
    #[serde(default)]
    message: String,
}

impl From<BridgeError> for HostError {
    fn from(error: BridgeError) -> Self {
        match error.kind.as_str() {
            "rejected" => HostError::Rejected(error.message),
            "busy" => HostError::Busy(error.message),
            "not_found" => HostError::NodeNotFound(error.message),
            other => HostError::Protocol(format!("{}: {}", other, error.message)),
        }
    }
}

struct BridgeProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
}

/// 子プロセスのブリッジ経由のホストセッション
pub struct BridgeHostSession {
    config: HostConfig,
    process: Option<BridgeProcess>,
    next_id: u64,
    current_scene: Option<PathBuf>,
}

impl BridgeHostSession {
    pub fn new(config: HostConfig) -> Self {
        Self {
            config,
            process: None,
            next_id: 0,
            current_scene: None,
        }
    }

    fn spawn(&self) -> Result<BridgeProcess, HostError> {
        info!(
            "Starting host bridge: {} {}",
            self.config.command,
            self.config.args.join(" ")
        );

        let mut child = Command::new(&self.config.command)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                HostError::Unavailable(format!("failed to start {}: {}", self.config.command, e))
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| HostError::Unavailable("bridge stdin not captured".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| HostError::Unavailable("bridge stdout not captured".to_string()))?;

        Ok(BridgeProcess {
            child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
        })
    }

    async fn kill(&mut self) {
        if let Some(mut process) = self.process.take() {
            if let Err(e) = process.child.kill().await {
                warn!("Failed to kill host bridge: {}", e);
            }
        }
        self.current_scene = None;
    }

    /// リクエストを1件送り、同じIDの応答を待つ
    async fn call(&mut self, op: &str, params: Value) -> Result<Value, HostError> {
        self.next_id += 1;
        let id = self.next_id;

        let process = self
            .process
            .as_mut()
            .ok_or_else(|| HostError::Unavailable("host bridge is not running".to_string()))?;

        let mut line = serde_json::to_string(&BridgeRequest { id, op, params })
            .map_err(|e| HostError::Protocol(e.to_string()))?;
        line.push('\n');
        debug!("→ {}", line.trim_end());

        process
            .stdin
            .write_all(line.as_bytes())
            .await
            .map_err(|e| HostError::Unavailable(format!("failed to write to bridge: {}", e)))?;
        process
            .stdin
            .flush()
            .await
            .map_err(|e| HostError::Unavailable(format!("failed to write to bridge: {}", e)))?;

        loop {
            let line = process
                .stdout
                .next_line()
                .await
                .map_err(|e| HostError::Unavailable(format!("failed to read from bridge: {}", e)))?
                .ok_or_else(|| HostError::Unavailable("host bridge exited".to_string()))?;

            if line.trim().is_empty() {
                continue;
            }
            debug!("← {}", line);

            let response: BridgeResponse = serde_json::from_str(&line)
                .map_err(|e| HostError::Protocol(format!("invalid response {:?}: {}", line, e)))?;

            if response.id != id {
                // タイムアウトで破棄したリクエストへの遅れた応答
                warn!(
                    "Skipping bridge response {} while waiting for {}",
                    response.id, id
                );
                continue;
            }

            return if response.ok {
                Ok(response.result)
            } else {
                Err(response
                    .error
                    .map(HostError::from)
                    .unwrap_or_else(|| HostError::Protocol(format!("{} failed", op))))
            };
        }
    }

    async fn call_as<T: DeserializeOwned>(&mut self, op: &str, params: Value) -> Result<T, HostError> {
        let result = self.call(op, params).await?;
        serde_json::from_value(result)
            .map_err(|e| HostError::Protocol(format!("unexpected result for {}: {}", op, e)))
    }

    async fn call_unit(&mut self, op: &str, params: Value) -> Result<(), HostError> {
        self.call(op, params).await.map(|_| ())
    }
}

#[async_trait]
impl HostSession for BridgeHostSession {
    async fn initialize(&mut self) -> Result<(), HostError> {
        if self.process.is_some() {
            return Ok(());
        }
        self.process = Some(self.spawn()?);

        if let Err(e) = self.call_unit("initialize", Value::Null).await {
            self.kill().await;
            return Err(e);
        }
        Ok(())
    }

    async fn teardown(&mut self) -> Result<(), HostError> {
        if self.process.is_none() {
            return Ok(());
        }

        let result = match tokio::time::timeout(
            TEARDOWN_GRACE,
            self.call_unit("teardown", Value::Null),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(HostError::Unavailable(
                "host bridge did not acknowledge teardown".to_string(),
            )),
        };

        self.kill().await;
        result
    }

    async fn recover(&mut self) -> Result<(), HostError> {
        self.kill().await;
        self.initialize().await
    }

    async fn open_scene(&mut self, path: &Path, options: OpenOptions) -> Result<(), HostError> {
        self.current_scene = None;
        self.call_unit(
            "open_scene",
            json!({
                "path": path,
                "force": options.force,
                "load_references": options.load_references,
            }),
        )
        .await?;

        self.current_scene = self.call_as("current_scene", Value::Null).await?;
        Ok(())
    }

    async fn save_scene(&mut self) -> Result<(), HostError> {
        self.call_unit("save_scene", Value::Null).await
    }

    fn current_scene(&self) -> Option<PathBuf> {
        self.current_scene.clone()
    }

    async fn node_exists(&mut self, name: &str) -> Result<bool, HostError> {
        self.call_as("node_exists", json!({ "name": name })).await
    }

    async fn delete_node(&mut self, name: &str) -> Result<(), HostError> {
        self.call_unit("delete_node", json!({ "name": name })).await
    }

    async fn list_nodes(&mut self, node_type: &str) -> Result<Vec<String>, HostError> {
        self.call_as("list_nodes", json!({ "type": node_type })).await
    }

    async fn clear_selection(&mut self) -> Result<(), HostError> {
        self.call_unit("clear_selection", Value::Null).await
    }

    async fn select(
        &mut self,
        names: &[String],
        hierarchy: bool,
    ) -> Result<Vec<String>, HostError> {
        self.call_as(
            "select",
            json!({ "names": names, "hierarchy": hierarchy, "add": true }),
        )
        .await
    }

    async fn set_attribute(
        &mut self,
        node: &str,
        attribute: &str,
        value: AttributeValue,
    ) -> Result<(), HostError> {
        self.call_unit(
            "set_attribute",
            json!({ "node": node, "attribute": attribute, "value": value }),
        )
        .await
    }

    async fn set_rotate_order(
        &mut self,
        node: &str,
        order: RotateOrder,
        preserve_orientation: bool,
    ) -> Result<(), HostError> {
        self.call_unit(
            "set_rotate_order",
            json!({
                "node": node,
                "order": order.index(),
                "preserve": preserve_orientation,
            }),
        )
        .await
    }

    async fn world_translation(&mut self, node: &str) -> Result<[f64; 3], HostError> {
        self.call_as("world_translation", json!({ "node": node })).await
    }

    async fn set_world_translation(
        &mut self,
        node: &str,
        translation: [f64; 3],
    ) -> Result<(), HostError> {
        self.call_unit(
            "set_world_translation",
            json!({ "node": node, "translation": translation }),
        )
        .await
    }

    async fn playback_range(&mut self) -> Result<FrameRange, HostError> {
        self.call_as("playback_range", Value::Null).await
    }

    async fn list_references(&mut self) -> Result<Vec<String>, HostError> {
        self.call_as("list_references", Value::Null).await
    }

    async fn describe_reference(&mut self, handle: &str) -> Result<SceneReference, HostError> {
        self.call_as("describe_reference", json!({ "handle": handle }))
            .await
    }

    async fn reload_reference(&mut self, node: &str, path: &Path) -> Result<(), HostError> {
        self.call_unit("reload_reference", json!({ "node": node, "path": path }))
            .await
    }

    async fn export(&mut self, path: &Path, options: &ExportOptions) -> Result<(), HostError> {
        self.call_unit("export", json!({ "path": path, "options": options }))
            .await
    }

    async fn render(&mut self, request: &RenderRequest) -> Result<(), HostError> {
        self.call_unit("render", json!(request)).await
    }
}
