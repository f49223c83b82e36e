//! Line-oriented parser for Hurl files.
//!
//! [`parse`] turns the text of a `.hurl` file into an immutable [`Document`]
//! of request/response [`Entry`] nodes with source ranges. The document then
//! answers position queries for editor tooling: whether a cursor sits on a
//! method, on a response section name, in a place where a filter may be
//! typed, and which captured variables are in scope.
//!
//! ```
//! let doc = hurl_parse::parse("GET https://example.org\nHTTP/1.1 200\n").unwrap();
//! assert_eq!(doc.entries[0].request.method.name, "GET");
//! assert_eq!(doc.entries[0].response.as_ref().unwrap().status, 200);
//! ```

mod ast;
mod captures;
pub mod classify;
mod error;
mod parser;
mod query;
mod range;

pub use ast::{
    ASSERTS_SECTION, Body, CAPTURES_SECTION, Document, Entry, Headers, KeyValues, Method, Request,
    Response, Section, SectionName, Target,
};
pub use captures::{CaptureVars, Captures};
pub use classify::{LineKind, classify};
pub use error::{ParseError, ParseErrorKind};
pub use parser::Parser;
pub use range::SourceRange;

/// Split source text into lines, stripping `\n` and `\r\n` terminators.
///
/// Unlike [`str::lines`], a trailing newline yields a final empty line, so
/// line indices match editor coordinates.
pub fn split_lines(source: &str) -> Vec<&str> {
    source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Parse a whole document from source text.
pub fn parse(source: &str) -> Result<Document, ParseError> {
    parse_lines(&split_lines(source))
}

/// Parse a whole document from already split lines.
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Result<Document, ParseError> {
    Parser::new(lines).parse()
}
