//! Syntax tree for a parsed Hurl file.
//!
//! A [`Document`] is built once from a complete sequence of lines and never
//! mutated afterwards. Every node carries the [`SourceRange`] it was parsed
//! from.

use crate::SourceRange;

/// Name of the response section whose keys are captured variables.
pub const CAPTURES_SECTION: &str = "Captures";

/// Name of the response section holding assertions.
pub const ASSERTS_SECTION: &str = "Asserts";

/// A whole Hurl file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Document {
    /// Entries in source order.
    pub entries: Vec<Entry>,
    /// Extent of the whole file.
    pub range: SourceRange,
}

/// A request and the response it expects, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Entry {
    pub request: Request,
    pub response: Option<Response>,
    /// From the request's start to the response's end.
    pub range: SourceRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Request {
    pub method: Method,
    pub target: Target,
    pub headers: Headers,
    pub sections: Vec<Section>,
    pub body: Body,
    pub range: SourceRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Response {
    /// The version token, e.g. `HTTP/1.1`.
    pub version: String,
    /// Status code as written, `0` when the status token is not an
    /// integer. Codes are not range-checked, so `99999` and `-1` are kept.
    pub status: i32,
    pub headers: Headers,
    pub sections: Vec<Section>,
    pub body: Body,
    pub range: SourceRange,
}

/// The method token of a request line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Method {
    pub name: String,
    pub range: SourceRange,
}

/// Everything after the method on a request line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Target {
    pub value: String,
    pub range: SourceRange,
}

/// Key/value lines directly under a request or response line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Headers {
    pub values: KeyValues,
    /// First to last header line; `None` if there are no headers.
    pub range: Option<SourceRange>,
}

/// Raw body lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Body {
    pub lines: Vec<String>,
    /// `None` if there is no body.
    pub range: Option<SourceRange>,
}

impl Body {
    /// The body as it appears in the file, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A `[Name]` block such as `[Captures]` or `[Asserts]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Section {
    pub name: SectionName,
    pub key_values: KeyValues,
    /// Lines that were neither key/value nor blank/comment, verbatim.
    pub raw_lines: Vec<String>,
    /// Every line after the header, verbatim. Index `i` is document line
    /// `range.start_line + 1 + i`.
    pub lines: Vec<String>,
    pub range: SourceRange,
}

impl Section {
    /// The raw text of document line `line`, if it belongs to this section's
    /// content (not its header).
    pub fn line(&self, line: u32) -> Option<&str> {
        let offset = line.checked_sub(self.range.start_line + 1)?;
        self.lines.get(offset as usize).map(String::as_str)
    }

    #[inline]
    pub fn is_captures(&self) -> bool {
        self.name.value == CAPTURES_SECTION
    }
}

/// The identifier between the brackets of a section header.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SectionName {
    pub value: String,
    pub range: SourceRange,
}

/// An insertion-ordered string map.
///
/// Inserting an existing key keeps its position and replaces its value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct KeyValues {
    entries: Vec<(String, String)>,
}

impl KeyValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Document {
    /// Responses in source order.
    pub fn responses(&self) -> impl Iterator<Item = &Response> {
        self.entries.iter().filter_map(|entry| entry.response.as_ref())
    }
}
