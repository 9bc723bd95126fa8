use crate::config::PickerConfig;

/// Options controlling how directory listings are loaded into the tree.
#[derive(Debug, Clone)]
pub struct TreeOptions {
    /// Include hidden files/directories (starting with .)
    pub include_hidden: bool,

    /// List directories before files
    pub dirs_first: bool,

    /// Lowercase extensions (no dot) that get the executable icon
    pub executable_extensions: Vec<String>,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self::from(&PickerConfig::default())
    }
}

impl From<&PickerConfig> for TreeOptions {
    fn from(config: &PickerConfig) -> Self {
        Self {
            include_hidden: config.show_hidden,
            dirs_first: config.dirs_first,
            executable_extensions: config.executable_extensions.clone(),
        }
    }
}

impl TreeOptions {
    /// Create a new TreeOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to include hidden files
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Set whether directories are listed first
    pub fn with_dirs_first(mut self, enabled: bool) -> Self {
        self.dirs_first = enabled;
        self
    }

    /// Set executable extensions
    pub fn with_executable_extensions(mut self, extensions: Vec<String>) -> Self {
        self.executable_extensions = extensions;
        self
    }

    pub(crate) fn is_hidden(name: &str) -> bool {
        name.starts_with('.')
    }
}
