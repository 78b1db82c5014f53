//! # Domain Layer
//!
//! このモジュールはバッチ処理の核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - ホストアプリケーションやファイルシステムの実装を知らない
//! - ホストのグローバル状態は `HostSession` trait 経由でのみ扱う
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: エンティティとバリューオブジェクト（SceneFile, BatchJob, ProcessingResultなど）
//! - **errors**: エラー分類（ProcessingError, HostError）
//! - **procedure**: シーン変換処理の trait
//! - **repositories**: Repository / Session trait（インターフェース定義のみ）
//! - **services**: Domain Service（パス導出、リトライ、座標計算）

pub mod entities;
pub mod errors;
pub mod procedure;
pub mod repositories;
pub mod services;
