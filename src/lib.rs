//! # Scenebatch
//!
//! 3Dシーンファイルをディレクトリ単位でホストアプリケーションに読み込み、
//! エクスポート・リファレンス修正・プレビューレンダリングなどを一括で行うツール
//!
//! このプロジェクトはクリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: シーン・結果・エラーの型と、ホストセッションなどのトレイト
//! - **Application層**: セッションのライフサイクル管理、シーンごとの処理、バッチ処理（ユースケース）
//! - **Adapter層**: 外部システムとの統合（ホストブリッジ, ファイルシステム, 画像）
//! - **Driver層**: CLI、依存性注入

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
// カバレッジ計測時に外部プロセス依存コードを除外するために使用
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
