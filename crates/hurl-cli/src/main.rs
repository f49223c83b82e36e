//! Hurl language server CLI
//!
//! Examples:
//!   hurl-ls lsp                       - run the language server on stdio
//!   hurl-ls tree people.hurl          - print the parsed document as JSON
//!   hurl-ls captures people.hurl      - list capture sections
//!   hurl-ls captures people.hurl -l 9 - list variables usable on line 9

use std::io::{self, Read};

use clap::{Parser, Subcommand};
use hurl_parse::Document;

// ============================================================================
// Exit codes
// ============================================================================

const EXIT_SUCCESS: i32 = 0;
const EXIT_SYNTAX_ERROR: i32 = 1;
const EXIT_IO_ERROR: i32 = 3;

// ============================================================================
// CLI argument structures
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "hurl-ls", version, about = "Language server for Hurl files")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the language server on stdin/stdout
    Lsp,
    /// Print the parsed document tree as JSON
    Tree {
        /// Input file path or URI (or "-" for stdin)
        file: String,
        /// Single-line output
        #[arg(long)]
        compact: bool,
    },
    /// Print captured variables
    Captures {
        /// Input file path or URI (or "-" for stdin)
        file: String,
        /// Only the variables usable on this zero-based line
        #[arg(short, long)]
        line: Option<u32>,
    },
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
enum CliError {
    Io(io::Error),
    Source(hurl_lsp::source::SourceError),
    Parse(hurl_parse::ParseError),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Io(_) => EXIT_IO_ERROR,
            CliError::Source(_) => EXIT_IO_ERROR,
            CliError::Parse(_) => EXIT_SYNTAX_ERROR,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "{e}"),
            CliError::Source(e) => write!(f, "{e}"),
            CliError::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<hurl_parse::ParseError> for CliError {
    fn from(e: hurl_parse::ParseError) -> Self {
        CliError::Parse(e)
    }
}

// ============================================================================
// Commands
// ============================================================================

fn main() {
    let args = Args::parse();

    let result = match args.command {
        Command::Lsp => run_lsp(),
        Command::Tree { file, compact } => run_tree(&file, compact),
        Command::Captures { file, line } => run_captures(&file, line),
    };

    match result {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

fn run_lsp() -> Result<(), CliError> {
    let rt = tokio::runtime::Runtime::new().map_err(CliError::Io)?;
    rt.block_on(async {
        hurl_lsp::run()
            .await
            .map_err(|e| CliError::Io(io::Error::other(e)))
    })
}

fn run_tree(file: &str, compact: bool) -> Result<(), CliError> {
    let doc = read_document(file)?;
    let json = if compact {
        serde_json::to_string(&doc)
    } else {
        serde_json::to_string_pretty(&doc)
    }
    .map_err(|e| CliError::Io(io::Error::other(e)))?;

    println!("{json}");
    Ok(())
}

fn run_captures(file: &str, line: Option<u32>) -> Result<(), CliError> {
    let doc = read_document(file)?;

    match line {
        Some(line) => {
            for name in doc.captures_available(line) {
                println!("{name}");
            }
        }
        None => {
            for capture in &doc.captures() {
                println!(
                    "after line {}: {}",
                    capture.use_after,
                    capture.variables.join(", ")
                );
            }
        }
    }

    Ok(())
}

fn read_document(file: &str) -> Result<Document, CliError> {
    let lines: Vec<String> = if file == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        hurl_parse::split_lines(&buf)
            .into_iter()
            .map(str::to_string)
            .collect()
    } else {
        let path = hurl_lsp::source::uri_to_path(file);
        hurl_lsp::source::read_lines(&path).map_err(CliError::Source)?
    };

    Ok(hurl_parse::parse_lines(&lines)?)
}
