//! Pretty-printing of configuration trees.
//!
//! Every node renders itself given an indent level and the number of
//! spaces per level. A scope renders its nodes one level deeper than
//! itself, so the root of a tree prints at level -1 and its direct
//! children land at column zero. Negative levels produce no indent.

use std::fmt;

use crate::node::{Comment, Directive, Node, Scope};

/// Spaces per indent level used by the `Display` impls.
pub(crate) const SPACES_PER_INDENT: usize = 4;

impl Scope {
    /// Render this scope, its nodes at `indent_level + 1`.
    pub fn pretty_print(&self, indent_level: i32, spaces_per_indent: usize) -> String {
        let mut out = String::new();
        self.render(&mut out, indent_level, spaces_per_indent);
        out
    }

    pub(crate) fn render(&self, out: &mut String, indent_level: i32, spaces_per_indent: usize) {
        for node in &self.nodes {
            node.render(out, indent_level + 1, spaces_per_indent);
        }
    }
}

impl Node {
    /// Render this node at the given indent level.
    pub fn pretty_print(&self, indent_level: i32, spaces_per_indent: usize) -> String {
        let mut out = String::new();
        self.render(&mut out, indent_level, spaces_per_indent);
        out
    }

    pub(crate) fn render(&self, out: &mut String, indent_level: i32, spaces_per_indent: usize) {
        match self {
            Node::EmptyLine => out.push('\n'),
            Node::Comment(comment) => comment.render(out, indent_level, spaces_per_indent),
            Node::Directive(directive) => directive.render(out, indent_level, spaces_per_indent),
        }
    }
}

impl Comment {
    /// Render this comment at the given indent level.
    pub fn pretty_print(&self, indent_level: i32, spaces_per_indent: usize) -> String {
        let mut out = String::new();
        self.render(&mut out, indent_level, spaces_per_indent);
        out
    }

    pub(crate) fn render(&self, out: &mut String, indent_level: i32, spaces_per_indent: usize) {
        push_indent(out, indent_level, spaces_per_indent);
        out.push_str("# ");
        out.push_str(&self.text);
        out.push('\n');
    }
}

impl Directive {
    /// Render this directive at the given indent level, including its
    /// whole block when it has a child scope.
    pub fn pretty_print(&self, indent_level: i32, spaces_per_indent: usize) -> String {
        let mut out = String::new();
        self.render(&mut out, indent_level, spaces_per_indent);
        out
    }

    pub(crate) fn render(&self, out: &mut String, indent_level: i32, spaces_per_indent: usize) {
        push_indent(out, indent_level, spaces_per_indent);
        out.push_str(&self.name);
        if let Some(value) = &self.value {
            out.push(' ');
            out.push_str(value);
        }
        match &self.child {
            Some(_) => out.push_str(" {"),
            None => out.push(';'),
        }
        if let Some(comment) = &self.comment {
            out.push_str(" # ");
            out.push_str(comment);
        }
        out.push('\n');
        if let Some(child) = &self.child {
            child.render(out, indent_level, spaces_per_indent);
            push_indent(out, indent_level, spaces_per_indent);
            out.push_str("}\n");
        }
    }
}

fn push_indent(out: &mut String, indent_level: i32, spaces_per_indent: usize) {
    if indent_level > 0 {
        for _ in 0..(indent_level as usize * spaces_per_indent) {
            out.push(' ');
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty_print(-1, SPACES_PER_INDENT))
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty_print(0, SPACES_PER_INDENT))
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty_print(0, SPACES_PER_INDENT))
    }
}
