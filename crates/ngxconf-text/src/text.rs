//! Cursor over raw configuration text.

use std::fmt;

use tracing::trace;

/// Error raised by cursor reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextError {
    /// A character read landed outside the source bounds.
    OutOfRange {
        /// The absolute byte offset that was requested.
        offset: isize,
    },
    /// An assertion that a line terminator exists at an offset failed.
    ExpectedEol {
        /// The absolute byte offset that was checked.
        offset: usize,
    },
}

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextError::OutOfRange { offset } => {
                write!(f, "character read out of range at offset {}", offset)
            }
            TextError::ExpectedEol { offset } => {
                write!(f, "expected a line terminator at offset {}", offset)
            }
        }
    }
}

impl std::error::Error for TextError {}

/// A scanner over configuration source text.
///
/// Holds the full source and a byte position. All inspection is relative to
/// the position; the position only ever moves forward. Line terminators are
/// `\n` (the grammar does not model CRLF).
#[derive(Clone)]
pub struct Text<'src> {
    source: &'src str,
    pos: usize,
}

impl<'src> Text<'src> {
    /// Create a new cursor at the start of `source`.
    pub fn new(source: &'src str) -> Self {
        Self { source, pos: 0 }
    }

    /// The full source text.
    #[inline]
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Current byte position.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The unread suffix of the source.
    #[inline]
    pub fn remainder(&self) -> &'src str {
        self.source.get(self.pos..).unwrap_or("")
    }

    /// The character at the current position.
    #[inline]
    pub fn get_char(&self) -> Result<char, TextError> {
        self.get_char_at(0)
    }

    /// The character at `pos + offset`.
    ///
    /// Fails with [`TextError::OutOfRange`] when the resulting index is
    /// negative or past the end of the source.
    pub fn get_char_at(&self, offset: isize) -> Result<char, TextError> {
        let index = self.pos as isize + offset;
        if index < 0 || index as usize >= self.source.len() {
            return Err(TextError::OutOfRange { offset: index });
        }
        self.source
            .get(index as usize..)
            .and_then(|rest| rest.chars().next())
            .ok_or(TextError::OutOfRange { offset: index })
    }

    /// Advance the position by `n` bytes. No bound check; later reads fail
    /// with `OutOfRange` if the position ran past the end.
    #[inline]
    pub fn inc(&mut self, n: usize) {
        self.pos += n;
    }

    /// Advance past the character at the current position, or by a single
    /// byte when no character can be read there.
    #[inline]
    pub fn bump(&mut self) {
        match self.get_char() {
            Ok(c) => self.pos += c.len_utf8(),
            Err(_) => self.pos += 1,
        }
    }

    /// Whether the position is at or past the end of the source.
    #[inline]
    pub fn eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Whether the cursor sits at the start of a blank line, i.e. the
    /// character at the position is a line terminator.
    #[inline]
    pub fn is_empty_line(&self) -> bool {
        matches!(self.get_char(), Ok('\n'))
    }

    /// Offset of the next line terminator at or after the position.
    ///
    /// When no terminator exists the result points at the last valid index
    /// of the source (`next_eol` of `"roman"` is 4), so that consuming a
    /// final unterminated line still lands the position at end of input.
    pub fn next_eol(&self) -> usize {
        let bytes = self.source.as_bytes();
        let mut i = self.pos;
        while i < bytes.len() {
            if bytes[i] == b'\n' {
                return i;
            }
            i += 1;
        }
        bytes.len().saturating_sub(1)
    }

    /// Offset of the most recent line terminator at or before the position,
    /// 0 when there is none.
    pub fn last_eol(&self) -> usize {
        let bytes = self.source.as_bytes();
        let mut i = self.pos.min(bytes.len());
        loop {
            if i < bytes.len() && bytes[i] == b'\n' {
                return i;
            }
            if i == 0 {
                return 0;
            }
            i -= 1;
        }
    }

    /// Assert that a line terminator sits at `offset`.
    ///
    /// Fails with [`TextError::ExpectedEol`] when the offset is out of range
    /// or holds any other character.
    pub fn assert_eol(&self, offset: usize) -> Result<(), TextError> {
        match self.source.as_bytes().get(offset) {
            Some(b'\n') => Ok(()),
            _ => Err(TextError::ExpectedEol { offset }),
        }
    }

    /// Advance the position to just past the next line terminator,
    /// consuming one physical line.
    pub fn goto_next_eol(&mut self) {
        let eol = self.next_eol();
        trace!(from = self.pos, to = eol + 1, "consume line");
        self.pos = eol + 1;
    }
}
