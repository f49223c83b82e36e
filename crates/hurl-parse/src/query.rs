//! Position queries over a parsed document.
//!
//! All queries take a zero-based line and a zero-based column measured on
//! the raw line. Editors report the cursor *between* characters; callers pass
//! the column of the character just before the cursor.

use crate::{Document, Entry, Request};

/// Length of the shortest HTTP method (`GET`, `PUT`).
const MIN_METHOD_LEN: u32 = 3;

impl Document {
    /// Whether the position is on a request's method token.
    ///
    /// The start of the first line always counts, so that method completion
    /// works in a document that has no entries yet.
    pub fn on_request_method(&self, line: u32, col: u32) -> bool {
        if line == 0 && col <= MIN_METHOD_LEN {
            return true;
        }

        self.entries
            .iter()
            .any(|entry| entry.request.method.range.contains(line, col))
    }

    /// Whether the position is on the target (URL) of a request line.
    pub fn on_request_target(&self, line: u32, col: u32) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.request.target.range.contains(line, col))
    }

    /// Whether the position is where a response section tag is being typed.
    ///
    /// True at the start of the line right after a status line, or anywhere
    /// on the name of an existing response section. Request sections such
    /// as `[QueryStringParams]` never count.
    pub fn on_response_section_name(&self, line: u32, col: u32) -> bool {
        let after_status = self
            .responses()
            .any(|response| line == response.range.start_line + 1 && col <= 1);

        after_status
            || self
                .responses()
                .flat_map(|response| &response.sections)
                .any(|section| section.name.range.contains(line, col))
    }

    /// Whether a filter may be suggested at the position.
    ///
    /// The position must be inside a response section, below its header.
    /// In `[Captures]`, the variable name before the colon is off limits.
    /// Nowhere may the position be inside a double-quoted string.
    pub fn can_use_filter(&self, line: u32, col: u32) -> bool {
        let section = self
            .responses()
            .filter(|response| response.range.start_line < line)
            .flat_map(|response| &response.sections)
            .find(|section| section.range.start_line < line && line <= section.range.end_line);

        let Some(text) = section.and_then(|section| section.line(line)) else {
            return false;
        };

        if section.is_some_and(|section| section.is_captures()) {
            match text.chars().position(|c| c == ':') {
                Some(colon) if col as usize > colon => {}
                _ => return false,
            }
        }

        !inside_quotes(text, col)
    }

    /// Names of variables captured before `line`.
    pub fn captures_available(&self, line: u32) -> Vec<String> {
        self.captures().before(line).variables()
    }

    /// The request whose method line is `line`.
    pub fn request_at(&self, line: u32) -> Option<&Request> {
        self.entries
            .iter()
            .map(|entry| &entry.request)
            .find(|request| request.method.range.start_line == line)
    }

    /// The entry spanning `line`.
    pub fn entry_at(&self, line: u32) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.range.spans_line(line))
    }
}

/// Whether `col` is inside a double-quoted string.
///
/// Counts `"` characters from the start of the line up to and including
/// `col`; an odd count means inside. Escaped quotes are not special.
fn inside_quotes(text: &str, col: u32) -> bool {
    let quotes = text
        .chars()
        .take(col as usize + 1)
        .filter(|&c| c == '"')
        .count();
    quotes % 2 == 1
}
