//! # Domain Services
//!
//! エンティティに属さないビジネスルール

pub mod joint_snap;
pub mod output_paths;
pub mod retry_policy;
