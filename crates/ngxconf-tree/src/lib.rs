#![doc = include_str!("../README.md")]

mod diagnostic;
mod file;
mod node;
mod parse;
mod path;
mod render;

pub use file::Error;
pub use ngxconf_text::{IoError, SourceFile, Span, Text, TextError};
pub use node::{Comment, Directive, Node, Scope};
pub use parse::{ParseError, ParseErrorKind, parse};
pub use path::PATH_SEPARATOR;
