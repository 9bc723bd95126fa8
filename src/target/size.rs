use std::fs::{self, Metadata};
use std::path::Path;

use walkdir::WalkDir;

/// Get apparent file size (content length)
pub fn file_size(metadata: &Metadata) -> u64 {
    metadata.len()
}

/// Total size of all regular files below `path`.
///
/// Symlinks are not followed. Returns `None` when `path` is missing or is
/// not a directory; unreadable entries inside it are skipped.
pub fn folder_size(path: &Path) -> Option<u64> {
    match fs::symlink_metadata(path) {
        Ok(m) if m.is_dir() => {}
        _ => return None,
    }

    let total = WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::debug!(error = %err, "Skipping unreadable entry while sizing folder");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| file_size(&m))
        .sum();

    Some(total)
}

/// Size shown for an entry. Failures are logged and reported as unknown.
pub fn entry_size(path: &Path, is_dir: bool) -> Option<u64> {
    if is_dir {
        let size = folder_size(path);
        if size.is_none() {
            tracing::warn!(path = %path.display(), "Could not compute folder size");
        }
        return size;
    }

    match fs::symlink_metadata(path) {
        Ok(m) => Some(file_size(&m)),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "Could not read file size");
            None
        }
    }
}

/// Format a size for display; unknown sizes become an empty string.
pub fn format_size(size: Option<u64>) -> String {
    size.map(|bytes| humansize::format_size(bytes, humansize::BINARY))
        .unwrap_or_default()
}
