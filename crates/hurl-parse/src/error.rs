//! Structural parse failures.

/// The two conditions that abort a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A request line with no tokens.
    EmptyMethodLine,
    /// A status line with fewer than two tokens.
    MalformedStatusLine {
        /// The offending line, trimmed.
        line: String,
    },
}

/// A structural failure, with the zero-based line it occurred on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: u32,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line: u32) -> Self {
        Self { kind, line }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ParseErrorKind::EmptyMethodLine => write!(
                f,
                "line {}: expected method line but got empty",
                self.line + 1
            ),
            ParseErrorKind::MalformedStatusLine { line } => write!(
                f,
                "line {}: invalid response status line: {:?}",
                self.line + 1,
                line
            ),
        }
    }
}

impl std::error::Error for ParseError {}
