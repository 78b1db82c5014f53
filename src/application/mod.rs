//! # Application Layer
//!
//! アプリケーション固有のビジネスフロー（ユースケース）
//!
//! ## 特徴
//!
//! - Domain層のエンティティとサービスを組み合わせてビジネスフローを実現
//! - Repository / Session trait に依存（実装には依存しない）
//! - ホストアプリケーションの詳細は知らない
//!
//! ## 構成要素
//!
//! - **dto**: Data Transfer Object
//! - **procedures**: シーン変換処理
//! - **session_lifecycle**: ホストセッションのスコープ管理
//! - **use_cases**: ユースケース

pub mod dto;
pub mod procedures;
pub mod session_lifecycle;
pub mod use_cases;
