//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **DiscoverScenesUseCase**: シーンファイルの発見
//! - **ProcessBatchUseCase**: シーンファイルのバッチ処理

pub mod discover_scenes;
pub mod process_batch;
