//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **SceneFile**: 処理対象のシーンファイル
//! - **BatchJob**: 1回の実行で処理するシーンの集合
//! - **ProcessingResult / BatchReport**: 処理結果

pub mod batch_job;
pub mod export_options;
pub mod frame_range;
pub mod node_attribute;
pub mod node_selection;
pub mod processing_result;
pub mod render_request;
pub mod scene_file;
pub mod scene_reference;
