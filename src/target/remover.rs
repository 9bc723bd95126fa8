//! Deletes the selected targets.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::size::entry_size;

/// Result of removing one path.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RemovalResult {
    /// The path was deleted (or would be, in a dry run).
    Removed { path: PathBuf, freed_bytes: u64 },
    /// Deletion failed.
    Failed { path: PathBuf, error: String },
    /// Nothing to do.
    Skipped { path: PathBuf, reason: String },
}

impl RemovalResult {
    pub fn path(&self) -> &Path {
        match self {
            RemovalResult::Removed { path, .. }
            | RemovalResult::Failed { path, .. }
            | RemovalResult::Skipped { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RemoveOptions {
    /// If true, don't actually delete anything.
    pub dry_run: bool,
}

/// Summary of a batch of removals.
#[derive(Debug, Default, Serialize)]
pub struct RemovalSummary {
    pub removed_count: usize,
    pub failed_count: usize,
    pub skipped_count: usize,
    pub total_freed: u64,
}

pub struct Remover {
    options: RemoveOptions,
}

impl Remover {
    pub fn new(options: RemoveOptions) -> Self {
        Self { options }
    }

    /// Remove one file or directory tree. Symlinks are removed, not followed.
    pub fn remove(&self, path: &Path) -> RemovalResult {
        let metadata = match fs::symlink_metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return RemovalResult::Skipped {
                    path: path.to_path_buf(),
                    reason: "already gone".to_string(),
                };
            }
            Err(e) => {
                return RemovalResult::Failed {
                    path: path.to_path_buf(),
                    error: e.to_string(),
                };
            }
        };

        let is_dir = metadata.is_dir();
        let freed_bytes = entry_size(path, is_dir).unwrap_or(0);

        if self.options.dry_run {
            tracing::info!(path = %path.display(), freed_bytes, "Would remove");
            return RemovalResult::Removed {
                path: path.to_path_buf(),
                freed_bytes,
            };
        }

        let outcome = if is_dir {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };

        match outcome {
            Ok(()) => {
                tracing::info!(path = %path.display(), freed_bytes, "Removed");
                RemovalResult::Removed {
                    path: path.to_path_buf(),
                    freed_bytes,
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove");
                RemovalResult::Failed {
                    path: path.to_path_buf(),
                    error: e.to_string(),
                }
            }
        }
    }

    pub fn remove_all(&self, items: &[PathBuf]) -> Vec<RemovalResult> {
        items.iter().map(|p| self.remove(p)).collect()
    }

    pub fn summarize(results: &[RemovalResult]) -> RemovalSummary {
        let mut summary = RemovalSummary::default();

        for result in results {
            match result {
                RemovalResult::Removed { freed_bytes, .. } => {
                    summary.removed_count += 1;
                    summary.total_freed += freed_bytes;
                }
                RemovalResult::Failed { .. } => summary.failed_count += 1,
                RemovalResult::Skipped { .. } => summary.skipped_count += 1,
            }
        }

        summary
    }
}
