use std::fs;
use std::path::{Path, PathBuf};

use super::icon::EntryIcon;
use super::options::TreeOptions;
use super::size::entry_size;

/// Index of an entry inside a [`TargetTree`](super::TargetTree).
pub type EntryId = usize;

/// A filesystem node together with its checkbox state.
#[derive(Debug, Clone)]
pub struct TreeEntry {
    /// Full path to the file or directory
    pub path: PathBuf,

    /// Entry name (last component of path)
    pub name: String,

    /// True if this is a real directory (symlinks never are)
    pub is_dir: bool,

    /// Whether the entry is checked for deletion
    pub checked: bool,

    /// Cached size in bytes; `None` when it could not be determined
    pub size: Option<u64>,

    pub icon: EntryIcon,

    /// Error message if we couldn't read this entry or its listing
    pub error: Option<String>,

    pub parent: Option<EntryId>,

    /// Child ids; `None` until the directory listing is loaded
    pub children: Option<Vec<EntryId>>,

    pub expanded: bool,
}

impl TreeEntry {
    /// Build an entry without computing its size.
    pub fn new(path: PathBuf, parent: Option<EntryId>, options: &TreeOptions) -> Self {
        let is_dir = fs::symlink_metadata(&path)
            .map(|m| m.is_dir())
            .unwrap_or(false);
        let icon = EntryIcon::for_path(&path, is_dir, &options.executable_extensions);

        Self {
            name: display_name(&path),
            path,
            is_dir,
            checked: false,
            size: None,
            icon,
            error: None,
            parent,
            children: None,
            expanded: false,
        }
    }

    /// Build an entry and compute its size.
    pub fn from_path(path: PathBuf, parent: Option<EntryId>, options: &TreeOptions) -> Self {
        let mut entry = Self::new(path, parent, options);
        entry.refresh_size();
        entry
    }

    pub fn refresh_size(&mut self) {
        self.size = entry_size(&self.path, self.is_dir);
    }

    pub fn can_expand(&self) -> bool {
        self.is_dir
    }

    pub fn is_loaded(&self) -> bool {
        self.children.is_some()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
