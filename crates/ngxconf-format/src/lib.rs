#![doc = include_str!("../README.md")]

mod options;

pub use options::FormatOptions;

use ngxconf_tree::{ParseError, Scope, parse};

/// Render a scope tree with the given options.
///
/// The tree is treated as the root of a document: its direct children
/// print at column zero.
pub fn format_scope(scope: &Scope, options: &FormatOptions) -> String {
    scope.pretty_print(-1, options.spaces_per_indent)
}

/// Parse configuration text and render it back canonically.
///
/// Canonically formatted input reproduces byte-for-byte; anything the
/// grammar does not model (trailing whitespace, tab indentation, several
/// statements on one line) comes out normalized.
pub fn format_source(source: &str, options: &FormatOptions) -> Result<String, ParseError> {
    let scope = parse(source)?;
    Ok(format_scope(&scope, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_source_is_a_fixpoint() {
        let source = "user nginx;\n\nhttp {\n    server {\n        listen 80;\n    }\n}\n";
        assert_eq!(
            format_source(source, &FormatOptions::default()).unwrap(),
            source
        );
    }

    #[test]
    fn messy_source_is_normalized() {
        let source = "  user  nginx ;\nhttp {  server { listen 80; } }\n";
        let output = format_source(source, &FormatOptions::default()).unwrap();
        insta::assert_snapshot!(output, @r#"
        user nginx;
        http {
            server {
                listen 80;
            }
        }
        "#);
    }

    #[test]
    fn comments_and_blank_lines_survive_formatting() {
        let source = "# frontends\nupstream web {\n    server 10.0.0.1;\n\n    server 10.0.0.2; # standby\n}\n";
        assert_eq!(
            format_source(source, &FormatOptions::default()).unwrap(),
            source
        );
    }

    #[test]
    fn indent_width_is_configurable() {
        let options = FormatOptions::new().spaces_per_indent(2);
        let output = format_source("server {\n    listen 80;\n}\n", &options).unwrap();
        assert_eq!(output, "server {\n  listen 80;\n}\n");
    }

    #[test]
    fn syntax_errors_surface() {
        assert!(format_source("worker_processes 4", &FormatOptions::default()).is_err());
    }
}
