//! Host Session Implementations
//!
//! - **BridgeHostSession**: 子プロセスのブリッジ経由でホストを操作

pub mod bridge;

pub use bridge::BridgeHostSession;
