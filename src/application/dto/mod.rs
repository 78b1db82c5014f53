//! # Data Transfer Objects
//!
//! ユースケースに渡す設定

pub mod processing_config;
