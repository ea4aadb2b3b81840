//! Single-pass parser for nginx-style configuration text.
//!
//! The parser walks the cursor once, dispatching on the character class
//! under it, and never reads more than one character ahead or unreads.
//! Block directives push a frame onto an explicit stack; a `}` pops the
//! frame and attaches the collected scope as the directive's child, so
//! nesting depth is bounded by the heap, not the call stack.

use ngxconf_text::{Span, Text};
use tracing::{debug, trace};

use crate::node::{Comment, Directive, Node, Scope};

/// Grammar violation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A directive reached the end of its line or the end of input without
    /// a `;` terminator or a `{` block opener.
    UnterminatedDirective,
    /// A `{` block was never closed.
    UnclosedScope,
}

/// A grammar violation with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Source location.
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// An open `{` block whose interior is still being collected.
struct Frame {
    /// The block head; its child scope is attached when the frame pops.
    directive: Directive,
    /// The surrounding scope, restored when the frame pops.
    parent: Scope,
    /// Offset of the opening brace, for unclosed-scope reporting.
    open: usize,
}

/// Parse configuration text into a scope tree.
///
/// All-or-nothing: the first grammar violation aborts the parse and the
/// partial tree is dropped.
pub fn parse(source: &str) -> Result<Scope, ParseError> {
    let mut text = Text::new(source);
    let mut stack: Vec<Frame> = Vec::new();
    let mut scope = Scope::new();

    loop {
        if text.eof() {
            if let Some(frame) = stack.last() {
                return Err(ParseError::new(
                    ParseErrorKind::UnclosedScope,
                    Span::new(frame.open as u32, frame.open as u32 + 1),
                ));
            }
            break;
        }
        if text.is_empty_line() {
            text.goto_next_eol();
            scope.push(Node::EmptyLine);
            continue;
        }
        match text.get_char() {
            Ok('#') => {
                let comment = parse_comment(&mut text);
                scope.push(Node::Comment(comment));
            }
            Ok('}') => match stack.pop() {
                Some(frame) => {
                    text.inc(1);
                    consume_blank_line_end(&mut text);
                    let mut directive = frame.directive;
                    directive.child = Some(scope);
                    trace!(name = %directive.name, "closed block");
                    scope = frame.parent;
                    scope.push(Node::Directive(directive));
                }
                // A stray `}` at the top level stops the parse: closing
                // braces belong to an enclosing block, and there is none.
                None => break,
            },
            Ok(c) if c.is_ascii_alphabetic() => match parse_directive(&mut text)? {
                Parsed::Simple(directive) => scope.push(Node::Directive(directive)),
                Parsed::BlockOpen { directive, open } => {
                    trace!(name = %directive.name, "opened block");
                    stack.push(Frame {
                        directive,
                        parent: std::mem::take(&mut scope),
                        open,
                    });
                }
            },
            // Formatting noise: skip one character and retry.
            _ => text.bump(),
        }
    }

    debug!(nodes = scope.nodes.len(), "parsed top-level scope");
    Ok(scope)
}

enum Parsed {
    Simple(Directive),
    BlockOpen { directive: Directive, open: usize },
}

/// Parse a directive head: identifier, optional value run, then `;` or `{`.
///
/// The cursor sits on the first letter of the name. After the terminator,
/// a same-line `#` comment is attached to the directive and the rest of
/// the line is consumed when blank.
fn parse_directive(text: &mut Text) -> Result<Parsed, ParseError> {
    let start = text.pos();

    let name = {
        let rest = text.remainder();
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        text.inc(len);
        rest[..len].to_string()
    };

    skip_inline_space(text);

    // Value run: everything up to the terminator. Quoted stretches keep
    // `;` and `{` literal; the quotes stay part of the value text.
    let value_start = text.pos();
    let mut quote: Option<char> = None;
    let terminator = loop {
        let c = match text.get_char() {
            Ok(c) => c,
            Err(_) => return Err(unterminated(start, text.pos())),
        };
        match quote {
            Some(q) => {
                if c == '\n' {
                    return Err(unterminated(start, text.pos()));
                }
                if c == q {
                    quote = None;
                }
                text.bump();
            }
            None => match c {
                ';' | '{' => break c,
                '"' | '\'' => {
                    quote = Some(c);
                    text.bump();
                }
                '\n' => return Err(unterminated(start, text.pos())),
                _ => text.bump(),
            },
        }
    };

    let value = text.source()[value_start..text.pos()].trim_end();
    let mut directive = Directive::new(name);
    if !value.is_empty() {
        directive.value = Some(value.to_string());
    }

    let open = text.pos();
    text.inc(1);
    attach_line_tail(text, &mut directive);
    trace!(name = %directive.name, block = (terminator == '{'), "directive");

    match terminator {
        '{' => Ok(Parsed::BlockOpen { directive, open }),
        _ => Ok(Parsed::Simple(directive)),
    }
}

fn unterminated(start: usize, end: usize) -> ParseError {
    ParseError::new(
        ParseErrorKind::UnterminatedDirective,
        Span::new(start as u32, end as u32),
    )
}

/// Parse a `#` comment line. The cursor sits on the `#`; the line and its
/// terminator are consumed.
fn parse_comment(text: &mut Text) -> Comment {
    text.inc(1);
    if let Ok(' ') = text.get_char() {
        text.inc(1);
    }
    let start = text.pos();
    let end = line_end(text);
    let body = &text.source()[start..end];
    text.inc(end - start);
    if !text.eof() {
        text.inc(1);
    }
    Comment::new(body)
}

/// Consume the rest of the line after a `;` or `{` when it holds only
/// whitespace or a `#` comment; the comment becomes the directive's
/// same-line annotation. Anything else stays for the main loop.
fn attach_line_tail(text: &mut Text, directive: &mut Directive) {
    skip_inline_space(text);
    match text.get_char() {
        Ok('#') => {
            text.inc(1);
            if let Ok(' ') = text.get_char() {
                text.inc(1);
            }
            let start = text.pos();
            let end = line_end(text);
            directive.comment = Some(text.source()[start..end].to_string());
            text.inc(end - start);
            if !text.eof() {
                text.inc(1);
            }
        }
        Ok('\n') => text.inc(1),
        _ => {}
    }
}

/// Consume trailing whitespace and the terminator after a closing brace.
fn consume_blank_line_end(text: &mut Text) {
    skip_inline_space(text);
    if let Ok('\n') = text.get_char() {
        text.inc(1);
    }
}

fn skip_inline_space(text: &mut Text) {
    while let Ok(' ' | '\t') = text.get_char() {
        text.inc(1);
    }
}

/// Offset of the line terminator after the cursor, or the end of input for
/// a final unterminated line.
fn line_end(text: &Text) -> usize {
    match text.remainder().find('\n') {
        Some(i) => text.pos() + i,
        None => text.source().len(),
    }
}
