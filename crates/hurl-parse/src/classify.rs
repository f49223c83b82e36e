//! Line classification.
//!
//! Every line of a Hurl file is put into exactly one [`LineKind`]. Several
//! kinds can match the same text (`GET` is both a method and a plausible body
//! line, `{"a": 1}` is both a key/value and a body line), so [`classify`]
//! checks the rules in a fixed order and the first match wins:
//!
//! 1. response status (`HTTP/1.1 200`)
//! 2. method (`POST https://example.org`)
//! 3. section header (`[Captures]`)
//! 4. key/value (`Content-Type: application/json`)
//! 5. blank or comment
//! 6. anything else starts a body

/// The syntactic role of a single raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// `HTTP/<version> <status>`
    ResponseStatus,
    /// An all-uppercase first token followed by an optional target.
    Method,
    /// `[Name]`
    SectionHeader,
    /// `key: value`
    HeaderKv,
    /// Empty after trimming, or a `#` comment.
    BlankOrComment,
    /// Brace, bracket, fence, or any unrecognised content.
    BodyStart,
}

impl LineKind {
    /// Lines that end a request without being consumed by it.
    #[inline]
    pub fn ends_request(self) -> bool {
        matches!(self, LineKind::ResponseStatus | LineKind::Method)
    }

    /// Lines that end a section without being consumed by it.
    #[inline]
    pub fn ends_section(self) -> bool {
        matches!(
            self,
            LineKind::SectionHeader | LineKind::Method | LineKind::ResponseStatus
        )
    }
}

/// Classify one raw line.
pub fn classify(line: &str) -> LineKind {
    if is_response_status(line) {
        LineKind::ResponseStatus
    } else if is_method(line) {
        LineKind::Method
    } else if section_name(line).is_some() {
        LineKind::SectionHeader
    } else if is_key_value(line) {
        LineKind::HeaderKv
    } else if is_blank_or_comment(line) {
        LineKind::BlankOrComment
    } else {
        LineKind::BodyStart
    }
}

/// `HTTP/<digits>[.<digits>]` as the first token of the trimmed line.
///
/// The status code itself is not checked here: the parser degrades a
/// non-integer status to `0`, and rejects a status line with no second
/// token. A half-typed `HTTP/1.1` therefore fails the parse of the whole
/// document, not just its own entry.
pub fn is_response_status(line: &str) -> bool {
    let Some(first) = line.split_whitespace().next() else {
        return false;
    };
    let Some(version) = first.strip_prefix("HTTP/") else {
        return false;
    };
    let (major, minor) = match version.split_once('.') {
        Some((major, minor)) => (major, Some(minor)),
        None => (version, None),
    };
    is_digits(major) && minor.is_none_or(is_digits)
}

/// First token of the trimmed line consists solely of uppercase letters.
pub fn is_method(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|token| token.chars().all(|c| c.is_ascii_uppercase()))
}

/// The identifier of a `[Name]` line, if this is one.
pub fn section_name(line: &str) -> Option<&str> {
    let name = line.trim().strip_prefix('[')?.strip_suffix(']')?;
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    valid.then_some(name)
}

/// A non-whitespace key starting at column 0, then `:` and anything after.
pub fn is_key_value(line: &str) -> bool {
    let Some((key, _)) = line.split_once(':') else {
        return false;
    };
    let key = key.trim_end();
    !key.is_empty() && !key.chars().any(char::is_whitespace)
}

/// Empty after trimming, or starting with `#`.
pub fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Split `key: value` at the first colon, trimming both halves.
pub fn split_key_value(line: &str) -> (&str, &str) {
    match line.split_once(':') {
        Some((key, value)) => (key.trim(), value.trim()),
        None => (line.trim(), ""),
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
