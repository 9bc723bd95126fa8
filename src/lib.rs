//! Uninstall targets - choose what to delete under an application directory
//!
//! This crate provides functionality for:
//! - Building a lazily expanded checkbox tree of files and folders
//! - Cascading check/uncheck rules and collecting the selection
//! - Folder sizes and icon kinds for each entry
//! - An interactive TUI picker and deletion of the picked paths

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod target;
pub mod tui;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, TargetError};
pub use target::{TargetTree, TreeEntry};
