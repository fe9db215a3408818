//! Shared types and utilities for ftp-to-s3.
//!
//! This crate provides common functionality used across all ftp-to-s3 crates:
//! - Default settings shared by the source, storage and transfer layers
//! - Remote path helpers for building source paths and destination keys
//! - Generic progress observer trait

pub mod constants;
pub mod path_utils;
pub mod progress;

// Re-export commonly used items at crate root
pub use constants::*;
pub use path_utils::{base_name, destination_key, directory_prefix, join_remote_path};
pub use progress::{NoOpProgress, ProgressCallback};
