//! Node types for configuration trees.
//!
//! A scope owns an ordered list of nodes; the list order is render order.
//! Directives are one node kind among the formatting nodes (comments and
//! blank lines), so a scope's directive view is a filtered walk over the
//! same list and the two can never fall out of step.

/// A renderable node in a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A blank separator line.
    EmptyLine,
    /// A standalone `#` comment line.
    Comment(Comment),
    /// A directive, simple or block.
    Directive(Directive),
}

impl Node {
    /// Get the directive, if this node is one.
    pub fn as_directive(&self) -> Option<&Directive> {
        match self {
            Node::Directive(directive) => Some(directive),
            _ => None,
        }
    }

    /// Get the directive mutably, if this node is one.
    pub fn as_directive_mut(&mut self) -> Option<&mut Directive> {
        match self {
            Node::Directive(directive) => Some(directive),
            _ => None,
        }
    }

    /// Get the comment, if this node is one.
    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Node::Comment(comment) => Some(comment),
            _ => None,
        }
    }

    /// Whether this node is a blank line.
    pub fn is_empty_line(&self) -> bool {
        matches!(self, Node::EmptyLine)
    }
}

/// A `#` comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Comment content, without the `#` and the single leading space of
    /// the `# text` convention.
    pub text: String,
}

impl Comment {
    /// Create a comment from its content.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The comment content.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A named configuration statement.
///
/// A directive with a child scope renders as a block (`name value { ... }`);
/// one without renders as a simple statement (`name value;`). The comment is
/// the same-line `#` annotation after the terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Directive name. Never empty.
    pub name: String,
    /// Value text, verbatim including any quotes.
    pub value: Option<String>,
    /// Same-line trailing comment.
    pub comment: Option<String>,
    /// Nested scope for block directives.
    pub child: Option<Scope>,
}

impl Directive {
    /// Create a directive with no value, comment, or child scope.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            comment: None,
            child: None,
        }
    }

    /// Set the value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the same-line trailing comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Attach a child scope, making this a block directive.
    pub fn with_child(mut self, child: Scope) -> Self {
        self.child = Some(child);
        self
    }

    /// The value text, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Replace the value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    /// The child scope, if this is a block directive.
    pub fn child(&self) -> Option<&Scope> {
        self.child.as_ref()
    }

    /// The child scope mutably.
    pub fn child_mut(&mut self) -> Option<&mut Scope> {
        self.child.as_mut()
    }

    /// Whether this directive renders as a block.
    pub fn is_block(&self) -> bool {
        self.child.is_some()
    }
}

/// An ordered, renderable collection of nodes: one `{ }` block interior or
/// the top level of a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    /// Nodes in render order.
    pub nodes: Vec<Node>,
}

impl Scope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the scope holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The directives of this scope, in order, skipping formatting nodes.
    pub fn directives(&self) -> impl Iterator<Item = &Directive> {
        self.nodes.iter().filter_map(Node::as_directive)
    }

    /// The directives of this scope, mutably.
    pub fn directives_mut(&mut self) -> impl Iterator<Item = &mut Directive> {
        self.nodes.iter_mut().filter_map(Node::as_directive_mut)
    }

    /// Append a node.
    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Append a directive.
    pub fn push_directive(&mut self, directive: Directive) {
        self.nodes.push(Node::Directive(directive));
    }

    /// Append a directive, fluently.
    pub fn add_directive(mut self, directive: Directive) -> Self {
        self.push_directive(directive);
        self
    }

    /// Append a standalone comment, fluently.
    pub fn add_comment(mut self, text: impl Into<String>) -> Self {
        self.nodes.push(Node::Comment(Comment::new(text)));
        self
    }

    /// Append a blank line, fluently.
    pub fn add_empty_line(mut self) -> Self {
        self.nodes.push(Node::EmptyLine);
        self
    }
}
