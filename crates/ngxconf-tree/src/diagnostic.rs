//! Diagnostic rendering for parser errors.

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::parse::{ParseError, ParseErrorKind};

impl ParseError {
    /// Render this error with ariadne.
    ///
    /// Returns a string containing the formatted error message with source
    /// context.
    pub fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        self.write_report(filename, source, &mut output);
        String::from_utf8(output).unwrap_or_else(|_| format!("{}", self))
    }

    /// Write the error report to a writer.
    pub fn write_report<W: std::io::Write>(&self, filename: &str, source: &str, writer: W) {
        let report = self.build_report(filename);
        let _ = report
            .finish()
            .write((filename, Source::from(source)), writer);
    }

    fn build_report<'a>(
        &self,
        filename: &'a str,
    ) -> ariadne::ReportBuilder<'static, (&'a str, std::ops::Range<usize>)> {
        let range = self.span.start as usize..self.span.end as usize;

        match &self.kind {
            ParseErrorKind::UnterminatedDirective => {
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message("unterminated directive")
                    .with_label(
                        Label::new((filename, range))
                            .with_message("statement starts here")
                            .with_color(Color::Red),
                    )
                    .with_help("terminate the directive with ';' or open a block with '{'")
            }

            ParseErrorKind::UnclosedScope => {
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message("unclosed scope")
                    .with_label(
                        Label::new((filename, range))
                            .with_message("block opened here")
                            .with_color(Color::Red),
                    )
                    .with_help("add a closing '}'")
            }
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ParseErrorKind::UnterminatedDirective => write!(f, "unterminated directive"),
            ParseErrorKind::UnclosedScope => write!(f, "unclosed scope"),
        }?;
        write!(f, " at offset {}", self.span.start)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn stripped_render(err: &ParseError, source: &str) -> String {
        String::from_utf8(strip_ansi_escapes::strip(err.render("test.conf", source)))
            .unwrap_or_default()
    }

    #[test]
    fn unterminated_directive_diagnostic() {
        let source = "worker_processes 4";
        let err = parse(source).unwrap_err();
        let report = stripped_render(&err, source);
        assert!(report.contains("unterminated directive"));
        assert!(report.contains("test.conf"));
        assert!(report.contains(";"));
    }

    #[test]
    fn unclosed_scope_diagnostic() {
        let source = "server {\n    listen 80;\n";
        let err = parse(source).unwrap_err();
        let report = stripped_render(&err, source);
        assert!(report.contains("unclosed scope"));
        assert!(report.contains("block opened here"));
    }

    #[test]
    fn display_carries_the_offset() {
        let err = parse("server {\n").unwrap_err();
        assert_eq!(err.to_string(), "unclosed scope at offset 7");
    }
}
