//! Integration test utilities for the storial API
//!
//! Spawns the real router on a local port and drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
