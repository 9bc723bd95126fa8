//! Application state for the picker.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::target::{SelectionSummary, TargetTree, TreeEntry, TreeOptions, VisibleRow};

/// The current UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal navigation mode.
    Normal,
    /// Asking whether to accept the selection.
    Confirm,
    /// Help overlay mode.
    Help,
}

/// How the picker ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// The user accepted; these paths are slated for deletion.
    Accepted(Vec<PathBuf>),
    /// The user quit without accepting.
    Cancelled,
}

/// Main application state for the TUI.
pub struct App {
    /// Directory the picker was opened on.
    pub root: PathBuf,

    /// Checkbox tree of targets.
    pub tree: TargetTree,

    /// Flattened visible rows (for rendering).
    pub visible_rows: Vec<VisibleRow>,

    /// Currently highlighted index in visible_rows.
    pub selected: usize,

    /// Current UI mode.
    pub mode: Mode,

    /// Cached count/size of the checked selection.
    pub summary: SelectionSummary,

    /// Application should quit.
    pub should_quit: bool,

    /// Set once the user accepts or cancels.
    pub outcome: Option<PickOutcome>,

    /// Status message to display.
    pub status_message: Option<String>,

    /// Render with colors.
    pub color: bool,

    /// Width of the size column.
    pub size_column: u16,
}

impl App {
    /// Create a new App instance with an empty tree.
    pub fn new(root: PathBuf) -> Self {
        Self::with_config(root, &Config::default())
    }

    pub fn with_config(root: PathBuf, config: &Config) -> Self {
        Self {
            root,
            tree: TargetTree::new(TreeOptions::from(&config.picker)),
            visible_rows: Vec::new(),
            selected: 0,
            mode: Mode::Normal,
            summary: SelectionSummary::default(),
            should_quit: false,
            outcome: None,
            status_message: None,
            color: config.tui.color,
            size_column: config.tui.size_column,
        }
    }

    /// Load the root directory into the tree.
    pub fn populate(&mut self) -> Result<()> {
        self.tree.populate(&self.root)?;
        self.selected = 0;
        self.refresh();
        Ok(())
    }

    /// Recompute visible rows and the selection summary after a tree change.
    ///
    /// The highlight stays on the same entry when it is still visible.
    pub fn refresh(&mut self) {
        let current = self.selected_row().map(|r| r.id);
        self.visible_rows = self.tree.visible_rows();
        self.summary = self.tree.selection_summary();

        if let Some(id) = current {
            if let Some(idx) = self.visible_rows.iter().position(|r| r.id == id) {
                self.selected = idx;
                return;
            }
        }
        self.selected = self.selected.min(self.visible_rows.len().saturating_sub(1));
    }

    pub fn selected_row(&self) -> Option<VisibleRow> {
        self.visible_rows.get(self.selected).copied()
    }

    /// Get the currently highlighted entry, if any.
    pub fn selected_entry(&self) -> Option<&TreeEntry> {
        self.selected_row().and_then(|r| self.tree.get(r.id))
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.visible_rows.is_empty() {
            return;
        }
        let last = self.visible_rows.len() - 1;
        let target = self.selected as isize + delta;
        self.selected = target.clamp(0, last as isize) as usize;
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible_rows.len().saturating_sub(1);
    }

    pub fn expand_selected(&mut self) {
        if let Some(row) = self.selected_row() {
            self.tree.expand(row.id);
            self.refresh();
        }
    }

    /// Collapse the highlighted directory, or jump to its parent.
    pub fn collapse_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let expanded = self.tree.get(row.id).map_or(false, |e| e.expanded);
        if expanded {
            self.tree.collapse(row.id);
            self.refresh();
        } else if let Some(parent) = self.tree.parent(row.id) {
            if let Some(idx) = self.visible_rows.iter().position(|r| r.id == parent) {
                self.selected = idx;
            }
        }
    }

    pub fn toggle_expand_selected(&mut self) {
        if let Some(row) = self.selected_row() {
            self.tree.toggle_expanded(row.id);
            self.refresh();
        }
    }

    pub fn toggle_check_selected(&mut self) {
        if let Some(row) = self.selected_row() {
            self.tree.toggle_checked(row.id);
            self.refresh();
        }
    }

    pub fn check_all(&mut self) {
        self.tree.check_all();
        self.refresh();
        self.status_message = Some("Selected everything".to_string());
    }

    pub fn uncheck_all(&mut self) {
        self.tree.uncheck_all();
        self.refresh();
        self.status_message = Some("Cleared selection".to_string());
    }

    pub fn expand_all(&mut self) {
        self.tree.expand_all();
        self.refresh();
    }

    pub fn collapse_all(&mut self) {
        self.tree.collapse_all();
        self.refresh();
    }

    /// Open the confirm dialog, unless nothing is checked.
    pub fn request_confirm(&mut self) {
        if self.summary.count == 0 {
            self.status_message = Some("Nothing selected".to_string());
        } else {
            self.mode = Mode::Confirm;
        }
    }

    pub fn accept(&mut self) {
        let items = self.tree.items_to_delete();
        tracing::info!(count = items.len(), "Selection accepted");
        self.outcome = Some(PickOutcome::Accepted(items));
        self.should_quit = true;
    }

    pub fn cancel(&mut self) {
        tracing::info!("Selection cancelled");
        self.outcome = Some(PickOutcome::Cancelled);
        self.should_quit = true;
    }
}
