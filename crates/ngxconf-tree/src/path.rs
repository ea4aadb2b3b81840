//! Path-addressed queries and mutations over a scope tree.
//!
//! Paths are directive names joined by a single backslash
//! (`http\server\listen`), each segment descending into the previous
//! directive's child scope. Lookups use exact string equality and first
//! match wins; later duplicates with the same name are invisible to
//! lookup. Segments cannot contain the separator; there is no escaping.

use tracing::trace;

use crate::node::{Directive, Scope};

/// Separator between directive names in a path.
pub const PATH_SEPARATOR: char = '\\';

impl Scope {
    /// First directive of this scope with the given name.
    pub fn directive_by_key(&self, key: &str) -> Option<&Directive> {
        self.directives().find(|d| d.name == key)
    }

    /// First directive of this scope with the given name, mutably.
    pub fn directive_by_key_mut(&mut self, key: &str) -> Option<&mut Directive> {
        self.directives_mut().find(|d| d.name == key)
    }

    /// Resolve a path to a directive.
    ///
    /// Returns `None` as soon as any segment is unresolved, including an
    /// intermediate directive that has no child scope.
    pub fn directive(&self, path: &str) -> Option<&Directive> {
        match path.split_once(PATH_SEPARATOR) {
            None => self.directive_by_key(path),
            Some((head, rest)) => self
                .directive_by_key(head)?
                .child
                .as_ref()?
                .directive(rest),
        }
    }

    /// Resolve a path to a directive, mutably.
    pub fn directive_mut(&mut self, path: &str) -> Option<&mut Directive> {
        match path.split_once(PATH_SEPARATOR) {
            None => self.directive_by_key_mut(path),
            Some((head, rest)) => self
                .directive_by_key_mut(head)?
                .child
                .as_mut()?
                .directive_mut(rest),
        }
    }

    /// Value of the directive at `path`.
    pub fn value(&self, path: &str) -> Option<&str> {
        self.directive(path)?.value.as_deref()
    }

    /// Replace the value of the directive at `path`.
    ///
    /// Returns whether the path resolved; an unresolved path is a no-op.
    pub fn set_value(&mut self, path: &str, value: impl Into<String>) -> bool {
        match self.directive_mut(path) {
            Some(directive) => {
                directive.value = Some(value.into());
                true
            }
            None => false,
        }
    }

    /// Append a `name value;` directive to the child scope of the
    /// directive at `path`, creating the child scope when the directive
    /// has none.
    ///
    /// Returns whether the path resolved; an unresolved path is a no-op.
    pub fn add_value(
        &mut self,
        path: &str,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> bool {
        match self.directive_mut(path) {
            Some(directive) => {
                directive
                    .child
                    .get_or_insert_with(Scope::new)
                    .push_directive(Directive::new(name).with_value(value));
                true
            }
            None => false,
        }
    }

    /// Values of all directives that share the last path segment's name in
    /// the scope the path leads to, in original order.
    ///
    /// This models the repeatable-directive pattern: with two `listen`
    /// lines in one server block, `values("server\listen")` returns both.
    pub fn values(&self, path: &str) -> Vec<&str> {
        let (parents, name) = split_parent(path);
        let Some(scope) = self.scope_at(&parents) else {
            return Vec::new();
        };
        scope
            .directives()
            .filter(|d| d.name == name)
            .filter_map(|d| d.value.as_deref())
            .collect()
    }

    /// Remove the first directive sharing the last path segment's name
    /// whose value equals `value`.
    ///
    /// Returns whether a directive was removed.
    pub fn del_value(&mut self, path: &str, value: &str) -> bool {
        let (parents, name) = split_parent(path);
        let Some(scope) = self.scope_at_mut(&parents) else {
            return false;
        };
        let position = scope.nodes.iter().position(|node| {
            node.as_directive()
                .is_some_and(|d| d.name == name && d.value.as_deref() == Some(value))
        });
        match position {
            Some(index) => {
                trace!(name, value, "removed directive");
                scope.nodes.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove all directives sharing the last path segment's name from the
    /// scope the path leads to, leaving every other node in place.
    ///
    /// Returns the number of directives removed.
    pub fn del_values(&mut self, path: &str) -> usize {
        let (parents, name) = split_parent(path);
        let Some(scope) = self.scope_at_mut(&parents) else {
            return 0;
        };
        let before = scope.nodes.len();
        scope
            .nodes
            .retain(|node| node.as_directive().is_none_or(|d| d.name != name));
        before - scope.nodes.len()
    }

    /// Scope addressed by a chain of block directives; `self` for an empty
    /// chain.
    fn scope_at(&self, segments: &[&str]) -> Option<&Scope> {
        let mut scope = self;
        for segment in segments {
            scope = scope.directive_by_key(segment)?.child.as_ref()?;
        }
        Some(scope)
    }

    /// Scope addressed by a chain of block directives, mutably.
    fn scope_at_mut(&mut self, segments: &[&str]) -> Option<&mut Scope> {
        match segments.split_first() {
            None => Some(self),
            Some((head, rest)) => self
                .directive_by_key_mut(head)?
                .child
                .as_mut()?
                .scope_at_mut(rest),
        }
    }
}

/// Split a path into its parent chain and last segment.
fn split_parent(path: &str) -> (Vec<&str>, &str) {
    let mut segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    let last = segments.pop().unwrap_or(path);
    (segments, last)
}

#[cfg(test)]
mod tests {
    use crate::parse;

    const SERVER: &str = "server {\n    listen 80;\n    listen 443;\n    root /srv;\n}\n";

    #[test]
    fn nested_path_resolution() {
        let scope = parse("a {\n    b {\n        c value;\n    }\n}\n").unwrap();
        assert_eq!(scope.value("a\\b\\c"), Some("value"));
        assert!(scope.directive("a\\x").is_none());
        assert!(scope.directive("x\\b").is_none());
    }

    #[test]
    fn path_through_simple_directive_is_unresolved() {
        let scope = parse("a 1;\n").unwrap();
        assert!(scope.directive("a\\b").is_none());
    }

    #[test]
    fn first_match_wins_for_duplicate_names() {
        let scope = parse("a 1;\na 2;\n").unwrap();
        assert_eq!(scope.value("a"), Some("1"));
    }

    #[test]
    fn set_value_rewrites_in_place() {
        let mut scope = parse(SERVER).unwrap();
        assert!(scope.set_value("server\\root", "/var/www"));
        assert_eq!(scope.value("server\\root"), Some("/var/www"));
    }

    #[test]
    fn set_value_on_unresolved_path_is_a_noop() {
        let mut scope = parse(SERVER).unwrap();
        assert!(!scope.set_value("server\\missing", "x"));
        assert_eq!(scope.to_string(), SERVER);
    }

    #[test]
    fn add_value_appends_to_child_scope() {
        let mut scope = parse(SERVER).unwrap();
        assert!(scope.add_value("server", "index", "index.html"));
        assert_eq!(scope.value("server\\index"), Some("index.html"));
    }

    #[test]
    fn add_value_creates_a_missing_child_scope() {
        let mut scope = parse("a 1;\n").unwrap();
        assert!(scope.add_value("a", "b", "2"));
        assert_eq!(scope.value("a\\b"), Some("2"));
        assert!(scope.directive("a").unwrap().is_block());
    }

    #[test]
    fn values_returns_all_same_named_siblings_in_order() {
        let scope = parse(SERVER).unwrap();
        assert_eq!(scope.values("server\\listen"), ["80", "443"]);
        assert_eq!(scope.values("server\\root"), ["/srv"]);
        assert!(scope.values("server\\missing").is_empty());
    }

    #[test]
    fn del_value_removes_the_first_matching_sibling() {
        let mut scope = parse(SERVER).unwrap();
        assert!(scope.del_value("server\\listen", "80"));
        assert_eq!(scope.values("server\\listen"), ["443"]);
        assert!(!scope.del_value("server\\listen", "80"));
    }

    #[test]
    fn del_values_removes_all_siblings_and_nothing_else() {
        let mut scope = parse(SERVER).unwrap();
        assert_eq!(scope.del_values("server\\listen"), 2);
        assert!(scope.values("server\\listen").is_empty());
        assert_eq!(scope.value("server\\root"), Some("/srv"));
        assert_eq!(scope.to_string(), "server {\n    root /srv;\n}\n");
    }

    #[test]
    fn single_segment_paths_operate_on_the_root() {
        let mut scope = parse("listen 80;\nlisten 443;\n").unwrap();
        assert_eq!(scope.values("listen"), ["80", "443"]);
        assert_eq!(scope.del_values("listen"), 2);
        assert!(scope.is_empty());
    }
}
