//! Command-line interface for the ngxconf configuration processor.
//!
//! Paths passed to the query/mutation subcommands use backslash-separated
//! directive names, e.g. `http\server\listen`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ngxconf_format::{FormatOptions, format_scope};
use ngxconf_tree::{Node, Scope, SourceFile, parse};

const EXIT_SUCCESS: u8 = 0;
const EXIT_SYNTAX_ERROR: u8 = 1;
const EXIT_PATH_UNRESOLVED: u8 = 2;
const EXIT_IO_ERROR: u8 = 3;

#[derive(Debug, Parser)]
#[command(
    name = "ngxconf",
    version,
    about = "Parse, query, edit, and format nginx-style configuration files."
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a file and report syntax errors.
    Check {
        /// The configuration file to check.
        file: PathBuf,
    },
    /// Reformat a file with canonical indentation.
    Fmt {
        /// The configuration file to format.
        file: PathBuf,
        /// Write the result to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Rewrite the input file in place.
        #[arg(long, conflicts_with = "output")]
        in_place: bool,
        /// Indent width in spaces.
        #[arg(long, default_value_t = 4)]
        indent: usize,
    },
    /// Print the value of the directive at a path.
    Get {
        /// The configuration file to query.
        file: PathBuf,
        /// Backslash-separated directive path.
        path: String,
    },
    /// Print the values of all same-named sibling directives at a path.
    Values {
        /// The configuration file to query.
        file: PathBuf,
        /// Backslash-separated directive path.
        path: String,
    },
    /// Set the value of the directive at a path.
    Set {
        /// The configuration file to edit.
        file: PathBuf,
        /// Backslash-separated directive path.
        path: String,
        /// The new value.
        value: String,
        /// Write the result to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Rewrite the input file in place.
        #[arg(long, conflicts_with = "output")]
        in_place: bool,
    },
    /// Append a directive to the block at a path.
    Add {
        /// The configuration file to edit.
        file: PathBuf,
        /// Backslash-separated path of the enclosing block directive.
        path: String,
        /// Name of the new directive.
        name: String,
        /// Value of the new directive.
        value: String,
        /// Write the result to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Rewrite the input file in place.
        #[arg(long, conflicts_with = "output")]
        in_place: bool,
    },
    /// Delete directives at a path.
    Del {
        /// The configuration file to edit.
        file: PathBuf,
        /// Backslash-separated directive path.
        path: String,
        /// Delete only the first sibling with this value.
        #[arg(long, conflicts_with = "all")]
        value: Option<String>,
        /// Delete all same-named siblings.
        #[arg(long)]
        all: bool,
        /// Write the result to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Rewrite the input file in place.
        #[arg(long, conflicts_with = "output")]
        in_place: bool,
    },
    /// Dump the parsed tree as JSON.
    Json {
        /// The configuration file to dump.
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    run(Args::parse())
}

fn run(args: Args) -> ExitCode {
    match args.command {
        Command::Check { file } => match load(&file) {
            Ok(_) => ExitCode::from(EXIT_SUCCESS),
            Err(code) => code,
        },
        Command::Fmt {
            file,
            output,
            in_place,
            indent,
        } => {
            let scope = match load(&file) {
                Ok(scope) => scope,
                Err(code) => return code,
            };
            let options = FormatOptions::new().spaces_per_indent(indent);
            emit(&scope, &options, &file, output.as_deref(), in_place)
        }
        Command::Get { file, path } => {
            let scope = match load(&file) {
                Ok(scope) => scope,
                Err(code) => return code,
            };
            match scope.value(&path) {
                Some(value) => {
                    println!("{}", value);
                    ExitCode::from(EXIT_SUCCESS)
                }
                None => {
                    eprintln!("ngxconf: no directive at path '{}'", path);
                    ExitCode::from(EXIT_PATH_UNRESOLVED)
                }
            }
        }
        Command::Values { file, path } => {
            let scope = match load(&file) {
                Ok(scope) => scope,
                Err(code) => return code,
            };
            let values = scope.values(&path);
            if values.is_empty() {
                eprintln!("ngxconf: no directive at path '{}'", path);
                return ExitCode::from(EXIT_PATH_UNRESOLVED);
            }
            for value in values {
                println!("{}", value);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Command::Set {
            file,
            path,
            value,
            output,
            in_place,
        } => {
            let mut scope = match load(&file) {
                Ok(scope) => scope,
                Err(code) => return code,
            };
            if !scope.set_value(&path, value) {
                eprintln!("ngxconf: no directive at path '{}'", path);
                return ExitCode::from(EXIT_PATH_UNRESOLVED);
            }
            emit(
                &scope,
                &FormatOptions::default(),
                &file,
                output.as_deref(),
                in_place,
            )
        }
        Command::Add {
            file,
            path,
            name,
            value,
            output,
            in_place,
        } => {
            let mut scope = match load(&file) {
                Ok(scope) => scope,
                Err(code) => return code,
            };
            if !scope.add_value(&path, name, value) {
                eprintln!("ngxconf: no directive at path '{}'", path);
                return ExitCode::from(EXIT_PATH_UNRESOLVED);
            }
            emit(
                &scope,
                &FormatOptions::default(),
                &file,
                output.as_deref(),
                in_place,
            )
        }
        Command::Del {
            file,
            path,
            value,
            all,
            output,
            in_place,
        } => {
            if value.is_none() && !all {
                eprintln!("ngxconf: del requires --value or --all");
                return ExitCode::from(EXIT_PATH_UNRESOLVED);
            }
            let mut scope = match load(&file) {
                Ok(scope) => scope,
                Err(code) => return code,
            };
            let removed = match value {
                Some(value) => scope.del_value(&path, &value),
                None => scope.del_values(&path) > 0,
            };
            if !removed {
                eprintln!("ngxconf: no directive at path '{}'", path);
                return ExitCode::from(EXIT_PATH_UNRESOLVED);
            }
            emit(
                &scope,
                &FormatOptions::default(),
                &file,
                output.as_deref(),
                in_place,
            )
        }
        Command::Json { file } => {
            let scope = match load(&file) {
                Ok(scope) => scope,
                Err(code) => return code,
            };
            match serde_json::to_string_pretty(&scope_to_json(&scope)) {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::from(EXIT_SUCCESS)
                }
                Err(err) => {
                    eprintln!("ngxconf: {}", err);
                    ExitCode::from(EXIT_IO_ERROR)
                }
            }
        }
    }
}

/// Load and parse a configuration file, printing a diagnostic and mapping
/// to the right exit code on failure.
fn load(path: &Path) -> Result<Scope, ExitCode> {
    let file = match SourceFile::load(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("ngxconf: {}", err);
            return Err(ExitCode::from(EXIT_IO_ERROR));
        }
    };
    match parse(file.contents()) {
        Ok(scope) => Ok(scope),
        Err(err) => {
            let filename = path.display().to_string();
            err.write_report(&filename, file.contents(), std::io::stderr());
            Err(ExitCode::from(EXIT_SYNTAX_ERROR))
        }
    }
}

/// Render the scope and send it to stdout, an output file, or back to the
/// input file.
fn emit(
    scope: &Scope,
    options: &FormatOptions,
    input: &Path,
    output: Option<&Path>,
    in_place: bool,
) -> ExitCode {
    let rendered = format_scope(scope, options);
    let target = if in_place { Some(input) } else { output };
    match target {
        Some(path) => match fs::write(path, &rendered) {
            Ok(()) => ExitCode::from(EXIT_SUCCESS),
            Err(err) => {
                eprintln!("ngxconf: {}: {}", path.display(), err);
                ExitCode::from(EXIT_IO_ERROR)
            }
        },
        None => {
            print!("{}", rendered);
            ExitCode::from(EXIT_SUCCESS)
        }
    }
}

fn scope_to_json(scope: &Scope) -> serde_json::Value {
    serde_json::Value::Array(scope.nodes.iter().map(node_to_json).collect())
}

fn node_to_json(node: &Node) -> serde_json::Value {
    match node {
        Node::EmptyLine => serde_json::Value::Null,
        Node::Comment(comment) => serde_json::json!({ "comment": comment.text() }),
        Node::Directive(directive) => {
            let mut object = serde_json::Map::new();
            object.insert("name".to_string(), directive.name.clone().into());
            if let Some(value) = directive.value() {
                object.insert("value".to_string(), value.into());
            }
            if let Some(comment) = &directive.comment {
                object.insert("comment".to_string(), comment.clone().into());
            }
            if let Some(child) = directive.child() {
                object.insert("block".to_string(), scope_to_json(child));
            }
            serde_json::Value::Object(object)
        }
    }
}
