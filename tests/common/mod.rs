//! Common test utilities for vpsctl CLI tests.
//!
//! - `TestEnv`: temp project/home directories plus fake ssh tooling on PATH
//! - Fixtures: reusable config snippets

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
