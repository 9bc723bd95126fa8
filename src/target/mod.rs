mod entry;
mod formatter;
mod icon;
mod options;
mod remover;
mod size;
mod tree;

pub use entry::{EntryId, TreeEntry};
pub use formatter::{format_selection, format_selection_json, format_tree};
pub use icon::EntryIcon;
pub use options::TreeOptions;
pub use remover::{RemovalResult, RemovalSummary, RemoveOptions, Remover};
pub use size::{entry_size, file_size, folder_size, format_size};
pub use tree::{SelectionSummary, TargetTree, VisibleRow};
