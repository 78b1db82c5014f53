//! テスト用の共通モジュール

#![allow(dead_code)]

pub mod in_memory;

pub use in_memory::{FakeScene, InMemoryHostSession};
