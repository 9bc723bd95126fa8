//! Icon decoration for tree entries.

use std::path::Path;

/// Kind of icon shown next to an entry.
///
/// The discriminants are stable image-list indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryIcon {
    Folder = 0,
    Document = 1,
    Executable = 2,
}

impl EntryIcon {
    /// Pick the icon for a path.
    pub fn for_path(path: &Path, is_dir: bool, executable_extensions: &[String]) -> Self {
        if is_dir {
            return EntryIcon::Folder;
        }

        if has_executable_extension(path, executable_extensions) || has_exec_bit(path) {
            EntryIcon::Executable
        } else {
            EntryIcon::Document
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Two-column glyph for the terminal.
    pub fn glyph(self) -> &'static str {
        match self {
            EntryIcon::Folder => "▸▪",
            EntryIcon::Document => "··",
            EntryIcon::Executable => "⚙ ",
        }
    }
}

fn has_executable_extension(path: &Path, executable_extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map_or(false, |ext| executable_extensions.iter().any(|e| *e == ext))
}

#[cfg(unix)]
fn has_exec_bit(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::symlink_metadata(path)
        .map(|m| m.file_type().is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn has_exec_bit(_path: &Path) -> bool {
    false
}
