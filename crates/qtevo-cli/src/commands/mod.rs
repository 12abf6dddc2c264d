//! CLI command implementations.

pub mod common;
pub mod config;
pub mod stable_set;
pub mod version;
