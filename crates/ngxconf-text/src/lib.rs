#![doc = include_str!("../README.md")]

mod source;
mod span;
mod text;

pub use source::{IoError, SourceFile};
pub use span::Span;
pub use text::{Text, TextError};
