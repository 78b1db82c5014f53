//! Adapter Layer
//!
//! 外部システム（ホストアプリケーション, ファイルシステム, 画像）との統合

pub mod config;
pub mod host;
pub mod imaging;
pub mod repositories;
