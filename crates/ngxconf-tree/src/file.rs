//! Reading and writing configuration files.

use std::fmt;
use std::fs;
use std::path::Path;

use ngxconf_text::{IoError, SourceFile};
use tracing::debug;

use crate::node::Scope;
use crate::parse::{ParseError, parse};

/// Top-level error for file-backed operations.
#[derive(Debug)]
pub enum Error {
    /// The file contents violated the grammar.
    Parse(ParseError),
    /// The file could not be read or written.
    Io(IoError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

impl From<IoError> for Error {
    fn from(err: IoError) -> Self {
        Error::Io(err)
    }
}

impl Scope {
    /// Load and parse a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Scope, Error> {
        let file = SourceFile::load(path)?;
        Ok(parse(file.contents())?)
    }

    /// Render this scope and write it to `path`.
    ///
    /// The write is not atomic; an interrupted write leaves partial
    /// contents on disk.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let rendered = self.to_string();
        fs::write(path, &rendered).map_err(|e| Error::Io(IoError::new(path, e)))?;
        debug!(path = %path.display(), bytes = rendered.len(), "saved scope");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("nginx.conf");
        let output_path = dir.path().join("nginx-out.conf");
        let input = "user nginx;\n\nserver {\n    listen 80;\n}\n";
        fs::write(&input_path, input).unwrap();

        let scope = Scope::from_file(&input_path).unwrap();
        scope.save_to_file(&output_path).unwrap();
        assert_eq!(fs::read_to_string(&output_path).unwrap(), input);
    }

    #[test]
    fn from_missing_file_is_an_io_error() {
        let err = Scope::from_file("this_file_does_not_exist.conf").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn save_into_missing_directory_is_an_io_error() {
        let scope = Scope::new();
        let err = scope.save_to_file("this/path/does/not/exist.conf").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn from_file_surfaces_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.conf");
        fs::write(&path, "worker_processes 4").unwrap();
        let err = Scope::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
