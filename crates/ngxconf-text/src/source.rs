//! File-backed configuration source.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::Text;

/// A file operation failure, carrying the path it happened on.
#[derive(Debug)]
pub struct IoError {
    /// The path the operation was attempted on.
    pub path: PathBuf,
    /// The underlying failure.
    pub source: io::Error,
}

impl IoError {
    /// Wrap an [`io::Error`] with the path it occurred on.
    pub fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Configuration source loaded from a file.
///
/// Owns the file contents; [`SourceFile::text`] hands out a fresh cursor
/// over them.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    contents: String,
}

impl SourceFile {
    /// Read the file at `path` into memory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| IoError::new(path, e))?;
        debug!(path = %path.display(), bytes = contents.len(), "loaded source file");
        Ok(Self {
            path: path.to_path_buf(),
            contents,
        })
    }

    /// The path this source was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The raw file contents.
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// A cursor over the file contents.
    pub fn text(&self) -> Text<'_> {
        Text::new(&self.contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_fails() {
        let err = SourceFile::load("this_file_does_not_exist.conf").unwrap_err();
        assert_eq!(err.source.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("this_file_does_not_exist.conf"));
    }
}
