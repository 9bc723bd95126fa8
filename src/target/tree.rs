//! Checkbox tree of deletion targets.
//!
//! Entries live in an arena and are addressed by [`EntryId`]. Directory
//! listings are loaded lazily the first time a directory's children are
//! requested.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Result, TargetError};

use super::entry::{EntryId, TreeEntry};
use super::options::TreeOptions;
use super::size::entry_size;

/// A row of the flattened tree, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRow {
    pub id: EntryId,
    /// Depth in the tree (0 = root).
    pub depth: usize,
}

/// Count and known total size of the current selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionSummary {
    pub count: usize,
    pub total_size: u64,
}

impl SelectionSummary {
    /// Summarize paths that are no longer backed by a tree.
    pub fn from_paths(items: &[PathBuf]) -> Self {
        let total_size = items
            .iter()
            .filter_map(|p| {
                let is_dir = fs::symlink_metadata(p).map(|m| m.is_dir()).unwrap_or(false);
                entry_size(p, is_dir)
            })
            .sum();
        Self {
            count: items.len(),
            total_size,
        }
    }
}

#[derive(Debug, Default)]
pub struct TargetTree {
    entries: Vec<TreeEntry>,
    roots: Vec<EntryId>,
    options: TreeOptions,
}

impl TargetTree {
    pub fn new(options: TreeOptions) -> Self {
        Self {
            entries: Vec::new(),
            roots: Vec::new(),
            options,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.roots.clear();
    }

    pub fn roots(&self) -> &[EntryId] {
        &self.roots
    }

    pub fn get(&self, id: EntryId) -> Option<&TreeEntry> {
        self.entries.get(id)
    }

    pub fn parent(&self, id: EntryId) -> Option<EntryId> {
        self.entries.get(id).and_then(|e| e.parent)
    }

    pub fn is_checked(&self, id: EntryId) -> bool {
        self.entries.get(id).map_or(false, |e| e.checked)
    }

    /// Find a loaded entry by path.
    pub fn find(&self, path: &Path) -> Option<EntryId> {
        self.entries.iter().position(|e| e.path == path)
    }

    /// Add a top-level entry.
    pub fn add_root(&mut self, path: PathBuf) -> EntryId {
        let id = self.entries.len();
        self.entries
            .push(TreeEntry::from_path(path, None, &self.options));
        self.roots.push(id);
        id
    }

    /// Replace the tree with `root_dir`, expanded and fully checked.
    ///
    /// When the root holds only directories they are expanded as well, so the
    /// first screen shows more than a list of folders.
    ///
    /// A symlinked root is resolved first, so the tree lists the real folder.
    pub fn populate(&mut self, root_dir: &Path) -> Result<EntryId> {
        let io_error = |e: std::io::Error| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TargetError::PathNotFound(root_dir.to_path_buf())
            } else {
                TargetError::Io {
                    path: root_dir.to_path_buf(),
                    source: e,
                }
            }
        };
        let resolved = fs::canonicalize(root_dir).map_err(io_error)?;
        let metadata = fs::metadata(&resolved).map_err(io_error)?;
        if !metadata.is_dir() {
            return Err(TargetError::NotADirectory(root_dir.to_path_buf()));
        }

        self.clear();
        let root = self.add_root(resolved);
        self.expand(root);

        let subs = self.children(root);
        if subs.iter().all(|&id| self.entries[id].is_dir) {
            for id in subs {
                self.expand(id);
            }
        }

        self.check_all();

        tracing::info!(
            root = %root_dir.display(),
            entries = self.entries.len(),
            "Populated target tree"
        );

        Ok(root)
    }

    /// Children of `id`, loading the directory listing on first use.
    pub fn children(&mut self, id: EntryId) -> Vec<EntryId> {
        self.load_children(id);
        self.loaded_children(id).to_vec()
    }

    /// Children that are already loaded; empty when not loaded yet.
    pub fn loaded_children(&self, id: EntryId) -> &[EntryId] {
        self.entries
            .get(id)
            .and_then(|e| e.children.as_deref())
            .unwrap_or(&[])
    }

    fn load_children(&mut self, id: EntryId) {
        let (path, checked) = match self.entries.get(id) {
            Some(e) if e.can_expand() && !e.is_loaded() => (e.path.clone(), e.checked),
            _ => return,
        };

        let read_dir = match fs::read_dir(&path) {
            Ok(rd) => rd,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Cannot list directory");
                let entry = &mut self.entries[id];
                entry.error = Some(err.to_string());
                entry.children = Some(Vec::new());
                return;
            }
        };

        let include_hidden = self.options.include_hidden;
        let paths: Vec<PathBuf> = read_dir
            .filter_map(|e| match e {
                Ok(e) => Some(e),
                Err(err) => {
                    tracing::debug!(path = %path.display(), error = %err, "Skipping unreadable entry");
                    None
                }
            })
            .filter(|e| include_hidden || !TreeOptions::is_hidden(&e.file_name().to_string_lossy()))
            .map(|e| e.path())
            .collect();

        // Folder sizes need a full walk each, so size siblings in parallel.
        let options = &self.options;
        let mut loaded: Vec<TreeEntry> = paths
            .into_par_iter()
            .map(|p| TreeEntry::from_path(p, Some(id), options))
            .collect();

        let dirs_first = self.options.dirs_first;
        loaded.sort_by(|a, b| {
            let by_kind = if dirs_first {
                b.is_dir.cmp(&a.is_dir)
            } else {
                std::cmp::Ordering::Equal
            };
            by_kind.then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });

        let first = self.entries.len();
        let ids: Vec<EntryId> = (first..first + loaded.len()).collect();
        for mut child in loaded {
            child.checked = checked;
            self.entries.push(child);
        }

        tracing::debug!(path = %path.display(), count = ids.len(), "Loaded directory listing");
        self.entries[id].children = Some(ids);
    }

    /// Expand a directory. Returns false for entries that cannot expand.
    pub fn expand(&mut self, id: EntryId) -> bool {
        match self.entries.get(id) {
            Some(e) if e.can_expand() => {}
            _ => return false,
        }
        self.load_children(id);
        self.entries[id].expanded = true;
        true
    }

    pub fn collapse(&mut self, id: EntryId) {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.expanded = false;
        }
    }

    pub fn toggle_expanded(&mut self, id: EntryId) {
        let Some(expanded) = self.entries.get(id).map(|e| e.expanded) else {
            return;
        };
        if expanded {
            self.collapse(id);
        } else {
            self.expand(id);
        }
    }

    /// Load and expand every directory in the tree.
    pub fn expand_all(&mut self) {
        let mut stack: Vec<EntryId> = self.roots.clone();
        while let Some(id) = stack.pop() {
            if self.expand(id) {
                stack.extend(self.loaded_children(id).iter().copied());
            }
        }
    }

    pub fn collapse_all(&mut self) {
        for entry in &mut self.entries {
            entry.expanded = false;
        }
    }

    /// Set the checkbox of `id`, applying the cascade rule.
    ///
    /// Checking marks the whole loaded subtree; children loaded later inherit
    /// their parent's state. Unchecking leaves the descendants checked and
    /// also unchecks the chain of checked ancestors, stopping at the first
    /// one that is already unchecked.
    ///
    /// An unloaded directory always stands for descendants in its own state,
    /// so its listing is loaded before it is unchecked.
    pub fn set_checked(&mut self, id: EntryId, value: bool) {
        if id >= self.entries.len() {
            return;
        }

        if value {
            let mut stack = vec![id];
            while let Some(current) = stack.pop() {
                let entry = &mut self.entries[current];
                entry.checked = true;
                if let Some(children) = &entry.children {
                    stack.extend(children.iter().copied());
                }
            }
        } else {
            self.load_children(id);
            self.entries[id].checked = false;
            let mut parent = self.entries[id].parent;
            while let Some(p) = parent {
                if !self.entries[p].checked {
                    break;
                }
                self.entries[p].checked = false;
                parent = self.entries[p].parent;
            }
        }
    }

    pub fn toggle_checked(&mut self, id: EntryId) {
        let value = !self.is_checked(id);
        self.set_checked(id, value);
    }

    pub fn check_all(&mut self) {
        for id in self.roots.clone() {
            self.set_checked(id, true);
        }
    }

    pub fn uncheck_all(&mut self) {
        for entry in &mut self.entries {
            entry.checked = false;
        }
    }

    /// Ids selected under `id`: the entry itself when checked, otherwise the
    /// selection of each loaded child.
    fn selected_ids(&self, id: EntryId, out: &mut Vec<EntryId>) {
        let Some(entry) = self.entries.get(id) else {
            return;
        };
        if entry.checked {
            out.push(id);
            return;
        }
        for &child in self.loaded_children(id) {
            self.selected_ids(child, out);
        }
    }

    /// Paths selected in the subtree rooted at `id`.
    pub fn selected_items(&self, id: EntryId) -> Vec<PathBuf> {
        let mut ids = Vec::new();
        self.selected_ids(id, &mut ids);
        ids.into_iter()
            .map(|i| self.entries[i].path.clone())
            .collect()
    }

    /// Flat list of everything slated for deletion, in tree order.
    ///
    /// A checked directory appears once; nothing below it is listed.
    pub fn items_to_delete(&self) -> Vec<PathBuf> {
        self.roots
            .iter()
            .flat_map(|&root| self.selected_items(root))
            .collect()
    }

    pub fn selection_summary(&self) -> SelectionSummary {
        let mut ids = Vec::new();
        for &root in &self.roots {
            self.selected_ids(root, &mut ids);
        }
        SelectionSummary {
            count: ids.len(),
            total_size: ids.iter().filter_map(|&i| self.entries[i].size).sum(),
        }
    }

    /// Rows for every entry reachable through expanded directories.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let mut rows = Vec::new();
        let mut stack: Vec<VisibleRow> = self
            .roots
            .iter()
            .rev()
            .map(|&id| VisibleRow { id, depth: 0 })
            .collect();

        while let Some(row) = stack.pop() {
            rows.push(row);
            let entry = &self.entries[row.id];
            if entry.expanded {
                stack.extend(self.loaded_children(row.id).iter().rev().map(|&id| VisibleRow {
                    id,
                    depth: row.depth + 1,
                }));
            }
        }

        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    /// root/
    ///   bin/app.exe (10 bytes)
    ///   bin/lib.so (20 bytes)
    ///   data/cache/blob (5 bytes)
    ///   readme.txt (3 bytes)
    fn create_install_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        fs::create_dir_all(root.join("bin")).unwrap();
        fs::create_dir_all(root.join("data/cache")).unwrap();
        File::create(root.join("bin/app.exe"))
            .unwrap()
            .write_all(&[0; 10])
            .unwrap();
        File::create(root.join("bin/lib.so"))
            .unwrap()
            .write_all(&[0; 20])
            .unwrap();
        File::create(root.join("data/cache/blob"))
            .unwrap()
            .write_all(&[0; 5])
            .unwrap();
        File::create(root.join("readme.txt"))
            .unwrap()
            .write_all(b"hey")
            .unwrap();

        dir
    }

    fn populated(dir: &TempDir) -> (TargetTree, EntryId) {
        let mut tree = TargetTree::new(TreeOptions::default());
        let root = tree.populate(dir.path()).unwrap();
        (tree, root)
    }

    fn id_of(tree: &TargetTree, dir: &TempDir, rel: &str) -> EntryId {
        tree.find(&dir.path().join(rel)).unwrap()
    }

    #[test]
    fn test_populate_checks_everything_and_selects_root() {
        let dir = create_install_dir();
        let (tree, root) = populated(&dir);

        assert!(tree.is_checked(root));
        assert!(tree.get(root).unwrap().expanded);
        assert_eq!(tree.items_to_delete(), vec![dir.path().to_path_buf()]);
        assert_eq!(tree.get(root).unwrap().size, Some(38));
    }

    #[test]
    fn test_populate_with_file_in_root_does_not_expand_subdirs() {
        let dir = create_install_dir();
        let (tree, _) = populated(&dir);

        let bin = id_of(&tree, &dir, "bin");
        assert!(!tree.get(bin).unwrap().expanded);
        assert!(!tree.get(bin).unwrap().is_loaded());
    }

    #[test]
    fn test_populate_with_only_dirs_expands_them() {
        let dir = create_install_dir();
        fs::remove_file(dir.path().join("readme.txt")).unwrap();
        let (tree, _) = populated(&dir);

        let bin = id_of(&tree, &dir, "bin");
        let data = id_of(&tree, &dir, "data");
        assert!(tree.get(bin).unwrap().expanded);
        assert!(tree.get(data).unwrap().expanded);
        assert!(tree.is_checked(id_of(&tree, &dir, "bin/app.exe")));
    }

    #[test]
    fn test_populate_empty_root() {
        let dir = TempDir::new().unwrap();
        let (tree, root) = populated(&dir);

        assert!(tree.loaded_children(root).is_empty());
        assert_eq!(tree.items_to_delete(), vec![dir.path().to_path_buf()]);
    }

    #[test]
    fn test_populate_missing_root() {
        let dir = TempDir::new().unwrap();
        let mut tree = TargetTree::new(TreeOptions::default());
        let err = tree.populate(&dir.path().join("gone")).unwrap_err();
        assert!(matches!(err, TargetError::PathNotFound(_)));
    }

    #[test]
    fn test_populate_file_root() {
        let dir = create_install_dir();
        let mut tree = TargetTree::new(TreeOptions::default());
        let err = tree.populate(&dir.path().join("readme.txt")).unwrap_err();
        assert!(matches!(err, TargetError::NotADirectory(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_populate_symlinked_root_lists_target() {
        let dir = create_install_dir();
        let links = TempDir::new().unwrap();
        let link = links.path().join("app");
        std::os::unix::fs::symlink(dir.path(), &link).unwrap();

        let mut tree = TargetTree::new(TreeOptions::default());
        let root = tree.populate(&link).unwrap();

        let entry = tree.get(root).unwrap();
        assert!(entry.is_dir);
        assert_eq!(entry.path, dir.path().canonicalize().unwrap());
        assert_eq!(entry.size, Some(38));
        assert_eq!(tree.loaded_children(root).len(), 3);
        assert_eq!(tree.items_to_delete(), vec![entry.path.clone()]);
    }

    #[test]
    fn test_children_sorted_dirs_first() {
        let dir = create_install_dir();
        let (tree, root) = populated(&dir);

        let names: Vec<&str> = tree
            .loaded_children(root)
            .iter()
            .map(|&id| tree.get(id).unwrap().name.as_str())
            .collect();
        assert_eq!(names, vec!["bin", "data", "readme.txt"]);
    }

    #[test]
    fn test_hidden_entries_filtered() {
        let dir = create_install_dir();
        fs::write(dir.path().join(".uninstall.log"), b"x").unwrap();

        let mut tree = TargetTree::new(TreeOptions::default().with_hidden(false));
        let root = tree.populate(dir.path()).unwrap();
        assert_eq!(tree.loaded_children(root).len(), 3);

        let mut tree = TargetTree::new(TreeOptions::default());
        let root = tree.populate(dir.path()).unwrap();
        assert_eq!(tree.loaded_children(root).len(), 4);
    }

    #[test]
    fn test_unchecking_child_unchecks_ancestor_chain() {
        let dir = create_install_dir();
        let (mut tree, root) = populated(&dir);

        let data = id_of(&tree, &dir, "data");
        let cache = tree.children(data)[0];
        let blob = tree.children(cache)[0];

        tree.set_checked(blob, false);

        assert!(!tree.is_checked(blob));
        assert!(!tree.is_checked(cache));
        assert!(!tree.is_checked(data));
        assert!(!tree.is_checked(root));
        // Siblings keep their state
        assert!(tree.is_checked(id_of(&tree, &dir, "bin")));
        assert!(tree.is_checked(id_of(&tree, &dir, "readme.txt")));
    }

    #[test]
    fn test_uncheck_stops_at_unchecked_ancestor() {
        let dir = create_install_dir();
        let (mut tree, root) = populated(&dir);

        let bin = id_of(&tree, &dir, "bin");
        let exe = tree.children(bin)[0];
        let lib = tree.children(bin)[1];

        tree.set_checked(root, false);
        tree.set_checked(bin, true);
        tree.set_checked(exe, false);

        assert!(!tree.is_checked(bin));
        assert!(tree.is_checked(lib));
        assert!(!tree.is_checked(root));
    }

    #[test]
    fn test_unchecking_parent_keeps_loaded_children() {
        let dir = create_install_dir();
        let (mut tree, root) = populated(&dir);

        tree.set_checked(root, false);

        let mut expected = vec![
            dir.path().join("bin"),
            dir.path().join("data"),
            dir.path().join("readme.txt"),
        ];
        expected.sort();
        let mut items = tree.items_to_delete();
        items.sort();
        assert_eq!(items, expected);
    }

    #[test]
    fn test_checking_parent_checks_loaded_descendants() {
        let dir = create_install_dir();
        let (mut tree, root) = populated(&dir);
        tree.uncheck_all();

        let data = id_of(&tree, &dir, "data");
        let cache = tree.children(data)[0];
        let blob = tree.children(cache)[0];
        assert!(!tree.is_checked(blob));

        tree.set_checked(root, true);
        assert!(tree.is_checked(data));
        assert!(tree.is_checked(cache));
        assert!(tree.is_checked(blob));
    }

    #[test]
    fn test_lazily_loaded_children_inherit_state() {
        let dir = create_install_dir();
        let (mut tree, _) = populated(&dir);

        let bin = id_of(&tree, &dir, "bin");
        assert!(!tree.get(bin).unwrap().is_loaded());
        for id in tree.children(bin) {
            assert!(tree.is_checked(id));
        }

        tree.uncheck_all();
        let data = id_of(&tree, &dir, "data");
        for id in tree.children(data) {
            assert!(!tree.is_checked(id));
        }
    }

    #[test]
    fn test_unchecking_folder_selects_same_items_loaded_or_not() {
        let dir = create_install_dir();

        let (mut unloaded, _) = populated(&dir);
        let data = id_of(&unloaded, &dir, "data");
        assert!(!unloaded.get(data).unwrap().is_loaded());
        unloaded.set_checked(data, false);

        let (mut loaded, _) = populated(&dir);
        let data = id_of(&loaded, &dir, "data");
        loaded.children(data);
        loaded.set_checked(data, false);

        let expected = vec![
            dir.path().join("bin"),
            dir.path().join("data/cache"),
            dir.path().join("readme.txt"),
        ];
        assert_eq!(unloaded.items_to_delete(), expected);
        assert_eq!(loaded.items_to_delete(), expected);
    }

    #[test]
    fn test_selection_walk_mixed() {
        let dir = create_install_dir();
        let (mut tree, _) = populated(&dir);

        let bin = id_of(&tree, &dir, "bin");
        let children = tree.children(bin);
        let lib = children[1];
        tree.set_checked(lib, false);

        let items = tree.items_to_delete();
        assert_eq!(
            items,
            vec![
                dir.path().join("bin/app.exe"),
                dir.path().join("data"),
                dir.path().join("readme.txt"),
            ]
        );

        let summary = tree.selection_summary();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.total_size, 10 + 5 + 3);
    }

    #[test]
    fn test_summary_from_paths_matches_tree() {
        let dir = create_install_dir();
        let (tree, _) = populated(&dir);
        let items = tree.items_to_delete();
        assert_eq!(SelectionSummary::from_paths(&items), tree.selection_summary());
    }

    #[test]
    fn test_uncheck_all_selects_nothing() {
        let dir = create_install_dir();
        let (mut tree, _) = populated(&dir);
        tree.uncheck_all();
        assert!(tree.items_to_delete().is_empty());
        assert_eq!(tree.selection_summary(), SelectionSummary::default());
    }

    #[test]
    fn test_toggle_checked() {
        let dir = create_install_dir();
        let (mut tree, _) = populated(&dir);
        let readme = id_of(&tree, &dir, "readme.txt");

        tree.toggle_checked(readme);
        assert!(!tree.is_checked(readme));
        tree.toggle_checked(readme);
        assert!(tree.is_checked(readme));
    }

    #[test]
    fn test_visible_rows_follow_expansion() {
        let dir = create_install_dir();
        let (mut tree, root) = populated(&dir);

        let rows = tree.visible_rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], VisibleRow { id: root, depth: 0 });
        assert!(rows[1..].iter().all(|r| r.depth == 1));

        let bin = id_of(&tree, &dir, "bin");
        tree.expand(bin);
        let rows = tree.visible_rows();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[2].depth, 2);
        assert_eq!(tree.get(rows[2].id).unwrap().name, "app.exe");

        tree.collapse(bin);
        assert_eq!(tree.visible_rows().len(), 4);
    }

    #[test]
    fn test_expand_all_and_collapse_all() {
        let dir = create_install_dir();
        let (mut tree, _) = populated(&dir);

        tree.expand_all();
        // root, bin, app.exe, lib.so, data, cache, blob, readme.txt
        assert_eq!(tree.visible_rows().len(), 8);

        tree.collapse_all();
        assert_eq!(tree.visible_rows().len(), 1);
    }

    #[test]
    fn test_expand_file_is_noop() {
        let dir = create_install_dir();
        let (mut tree, _) = populated(&dir);
        let readme = id_of(&tree, &dir, "readme.txt");
        assert!(!tree.expand(readme));
        assert!(tree.children(readme).is_empty());
    }

    #[test]
    fn test_toggle_expanded() {
        let dir = create_install_dir();
        let (mut tree, _) = populated(&dir);
        let bin = id_of(&tree, &dir, "bin");

        tree.toggle_expanded(bin);
        assert!(tree.get(bin).unwrap().expanded);
        tree.toggle_expanded(bin);
        assert!(!tree.get(bin).unwrap().expanded);
    }

    #[test]
    fn test_children_sizes_computed() {
        let dir = create_install_dir();
        let (tree, _) = populated(&dir);

        let bin = id_of(&tree, &dir, "bin");
        let data = id_of(&tree, &dir, "data");
        assert_eq!(tree.get(bin).unwrap().size, Some(30));
        assert_eq!(tree.get(data).unwrap().size, Some(5));
    }
}
