//! Formatting options for configuration output.

/// Options for rendering a configuration tree.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Spaces per indent level (default: 4)
    pub spaces_per_indent: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            spaces_per_indent: 4,
        }
    }
}

impl FormatOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indent width in spaces.
    pub fn spaces_per_indent(mut self, spaces: usize) -> Self {
        self.spaces_per_indent = spaces;
        self
    }
}
