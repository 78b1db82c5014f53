//! # Session Lifecycle
//!
//! ホストセッションのスコープ管理（初期化・シーンオープン・回復・終了）

use std::path::Path;
use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::time::sleep;

use crate::domain::errors::{HostError, ProcessingError};
use crate::domain::repositories::host_session::{HostSession, OpenOptions};
use crate::domain::services::retry_policy::RetryPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LifecycleState {
    Idle,
    Ready,
    /// 回復に失敗した（次のシーンオープン時に再度回復を試みる）
    Broken,
    TornDown,
}

/// セッションライフサイクル管理
///
/// バッチ処理の間、ホストセッションを排他的に借用する。
/// `teardown` はバッチごとに1回だけ実行され、その失敗はログに記録して握りつぶす。
pub struct SessionLifecycle<'s> {
    session: &'s mut dyn HostSession,
    retry: RetryPolicy,
    state: LifecycleState,
}

impl<'s> SessionLifecycle<'s> {
    pub fn new(session: &'s mut dyn HostSession, retry: RetryPolicy) -> Self {
        Self {
            session,
            retry,
            state: LifecycleState::Idle,
        }
    }

    /// セッションを初期化する
    ///
    /// 既に初期化済みの場合は何もしない。
    ///
    /// # Errors
    ///
    /// ホストの起動に失敗した場合は `ProcessingError::HostSession`（バッチ全体が中断される）
    pub async fn initialize(&mut self) -> Result<(), ProcessingError> {
        match self.state {
            LifecycleState::Ready => {
                debug!("Host session already initialized");
                return Ok(());
            }
            LifecycleState::TornDown => {
                return Err(HostError::Unavailable("session already torn down".to_string()).into());
            }
            LifecycleState::Idle | LifecycleState::Broken => {}
        }

        self.session.initialize().await.map_err(|e| {
            error!("Failed to initialize host session: {}", e);
            ProcessingError::HostSession(e)
        })?;

        self.state = LifecycleState::Ready;
        info!("Host session initialized");
        Ok(())
    }

    /// セッションを終了する
    ///
    /// 2回目以降の呼び出しは何もしない。終了時のエラーは伝播しない。
    pub async fn teardown(&mut self) {
        if self.state == LifecycleState::TornDown {
            debug!("Host session already torn down");
            return;
        }

        match self.session.teardown().await {
            Ok(()) => info!("Host session torn down"),
            Err(e) => warn!("Host session teardown failed (ignored): {}", e),
        }
        self.state = LifecycleState::TornDown;
    }

    /// タイムアウト後などにセッションを再初期化する
    pub async fn recover(&mut self) -> Result<(), ProcessingError> {
        if self.state == LifecycleState::TornDown {
            return Err(HostError::Unavailable("session already torn down".to_string()).into());
        }

        warn!("Recovering host session...");
        match self.session.recover().await {
            Ok(()) => {
                self.state = LifecycleState::Ready;
                info!("Host session recovered");
                Ok(())
            }
            Err(e) => {
                self.state = LifecycleState::Broken;
                Err(ProcessingError::HostSession(e))
            }
        }
    }

    /// シーンを開く
    ///
    /// 一時的な失敗（ファイルロックなど）は指数バックオフでリトライする。
    /// 開いた後、ホストの現在シーンが `path` であることを確認する。
    pub async fn open_scene(
        &mut self,
        path: &Path,
        options: OpenOptions,
    ) -> Result<(), ProcessingError> {
        match self.state {
            LifecycleState::Ready => {}
            LifecycleState::Broken => self.recover().await?,
            LifecycleState::Idle | LifecycleState::TornDown => {
                return Err(HostError::Unavailable("session is not initialized".to_string()).into());
            }
        }

        let mut retry_count = 0;
        loop {
            match self.session.open_scene(path, options).await {
                Ok(()) => break,
                Err(e) if self.retry.should_retry(&e, retry_count) => {
                    retry_count += 1;
                    let delay = self.retry.delay_ms(retry_count);
                    warn!(
                        "Opening {} failed (attempt {}), retrying in {}ms: {}",
                        path.display(),
                        retry_count,
                        delay,
                        e
                    );
                    sleep(Duration::from_millis(delay)).await;
                }
                Err(e) => {
                    return Err(ProcessingError::SceneLoad {
                        path: path.to_path_buf(),
                        source: e,
                    });
                }
            }
        }

        match self.session.current_scene() {
            Some(current) if is_same_scene(&current, path) => {
                debug!("Opened scene {}", path.display());
                Ok(())
            }
            other => Err(ProcessingError::SceneLoad {
                path: path.to_path_buf(),
                source: HostError::Protocol(format!(
                    "host reports {} as the current scene",
                    other
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "no scene".to_string())
                )),
            }),
        }
    }

    /// 処理中のセッション
    pub fn session(&mut self) -> &mut dyn HostSession {
        &mut *self.session
    }
}

/// 同じシーンファイルを指しているか
///
/// 文字列として一致しない場合も、両方を正規化して同じファイルなら一致とみなす。
fn is_same_scene(current: &Path, expected: &Path) -> bool {
    if current == expected {
        return true;
    }
    match (current.canonicalize(), expected.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
