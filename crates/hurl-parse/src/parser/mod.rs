//! Single-pass line parser for Hurl files.

use tracing::{debug, trace};

use crate::ast::{
    Body, Document, Entry, Headers, KeyValues, Method, Request, Response, Section, SectionName,
    Target,
};
use crate::classify::{LineKind, classify, section_name, split_key_value};
use crate::range::{char_len, leading_whitespace};
use crate::{ParseError, ParseErrorKind, SourceRange};

/// Line-oriented parser over a complete, terminator-stripped line sequence.
///
/// The parser walks the lines once with a cursor:
///
/// ```text
/// expect entry -> request headers -> request sections/body
///              -> expect response -> response headers -> response sections/body
///              -> expect entry
/// ```
///
/// Each `parse_*` step returns its node with a provisional range covering
/// only the node's first line. The caller closes the range once the cursor
/// has moved past the node, so a node's end is always the last line it
/// consumed.
pub struct Parser<'a, S> {
    lines: &'a [S],
    /// Index of the next unconsumed line.
    pos: usize,
}

impl<'a, S: AsRef<str>> Parser<'a, S> {
    pub fn new(lines: &'a [S]) -> Self {
        Self { lines, pos: 0 }
    }

    /// Parse the whole document.
    ///
    /// Fails only on an empty method line or a status line with fewer than
    /// two tokens; everything else degrades gracefully.
    pub fn parse(mut self) -> Result<Document, ParseError> {
        let mut entries = Vec::new();

        loop {
            self.skip_blank_or_comment();
            let Some(kind) = self.peek_kind() else {
                break;
            };

            if kind == LineKind::Method {
                entries.push(self.parse_entry()?);
            } else {
                // Stray content outside any entry.
                trace!(line = self.pos, ?kind, "skipping line outside entry");
                self.pos += 1;
            }
        }

        debug!(
            lines = self.lines.len(),
            entries = entries.len(),
            "parsed hurl document"
        );

        Ok(Document {
            entries,
            range: self.document_range(),
        })
    }

    fn parse_entry(&mut self) -> Result<Entry, ParseError> {
        trace!(line = self.pos, "entry start");

        let mut request = self.parse_request()?;
        self.close_range(&mut request.range);

        self.skip_blank_or_comment();
        let response = if self.peek_kind() == Some(LineKind::ResponseStatus) {
            let mut response = self.parse_response()?;
            self.close_range(&mut response.range);
            Some(response)
        } else {
            None
        };

        let range = match &response {
            Some(response) => request.range.extend(response.range),
            None => request.range,
        };

        trace!(?range, has_response = response.is_some(), "entry end");
        Ok(Entry {
            request,
            response,
            range,
        })
    }

    fn parse_request(&mut self) -> Result<Request, ParseError> {
        let line_no = self.pos as u32;
        let raw = self.advance();
        let trimmed = raw.trim();

        let Some(name) = trimmed.split_whitespace().next() else {
            return Err(ParseError::new(ParseErrorKind::EmptyMethodLine, line_no));
        };
        let target = trimmed[name.len()..].trim();

        let indent = leading_whitespace(raw);
        let line_len = char_len(raw);
        let method_end = indent + char_len(name);

        let mut request = Request {
            method: Method {
                name: name.to_string(),
                range: SourceRange::on_line(line_no, indent, method_end),
            },
            target: Target {
                value: target.to_string(),
                // Any run of whitespace after the method counts as target.
                range: SourceRange::on_line(line_no, (method_end + 1).min(line_len), line_len),
            },
            headers: Headers::default(),
            sections: Vec::new(),
            body: Body::default(),
            range: SourceRange::provisional(line_no, indent, line_len),
        };

        while let Some(line) = self.peek() {
            let start = self.pos;

            match classify(line) {
                LineKind::ResponseStatus | LineKind::Method => break,
                LineKind::SectionHeader => {
                    let mut section = self.parse_section();
                    self.close_range(&mut section.range);
                    request.sections.push(section);
                }
                LineKind::HeaderKv => self.parse_header(&mut request.headers),
                LineKind::BlankOrComment => {
                    self.pos += 1;
                    if let Some(next) = self.body_after_separator(&[
                        LineKind::HeaderKv,
                        LineKind::SectionHeader,
                        LineKind::ResponseStatus,
                        LineKind::Method,
                    ]) {
                        request.body = self.capture_body(next, LineKind::ends_request);
                        break;
                    }
                }
                LineKind::BodyStart => {
                    request.body = self.capture_body(self.pos, LineKind::ends_request);
                    break;
                }
            }

            debug_assert!(self.pos > start, "request loop made no progress");
        }

        Ok(request)
    }

    fn parse_response(&mut self) -> Result<Response, ParseError> {
        let line_no = self.pos as u32;
        let raw = self.advance();
        let trimmed = raw.trim();

        let mut tokens = trimmed.split_whitespace();
        let (Some(version), Some(status)) = (tokens.next(), tokens.next()) else {
            return Err(ParseError::new(
                ParseErrorKind::MalformedStatusLine {
                    line: trimmed.to_string(),
                },
                line_no,
            ));
        };
        let status = status.parse::<i32>().unwrap_or_else(|_| {
            trace!(line = line_no, status, "non-integer status code");
            0
        });

        let mut response = Response {
            version: version.to_string(),
            status,
            headers: Headers::default(),
            sections: Vec::new(),
            body: Body::default(),
            range: SourceRange::provisional(line_no, leading_whitespace(raw), char_len(raw)),
        };

        let ends_body = |kind: LineKind| kind == LineKind::Method;

        while let Some(line) = self.peek() {
            let start = self.pos;

            match classify(line) {
                LineKind::Method => break,
                LineKind::SectionHeader => {
                    let mut section = self.parse_section();
                    self.close_range(&mut section.range);
                    response.sections.push(section);
                }
                LineKind::HeaderKv => self.parse_header(&mut response.headers),
                LineKind::BlankOrComment => {
                    self.pos += 1;
                    if let Some(next) = self.body_after_separator(&[
                        LineKind::HeaderKv,
                        LineKind::SectionHeader,
                        LineKind::Method,
                    ]) {
                        response.body = self.capture_body(next, ends_body);
                        break;
                    }
                }
                LineKind::ResponseStatus | LineKind::BodyStart => {
                    response.body = self.capture_body(self.pos, ends_body);
                    break;
                }
            }

            debug_assert!(self.pos > start, "response loop made no progress");
        }

        Ok(response)
    }

    fn parse_section(&mut self) -> Section {
        let line_no = self.pos as u32;
        let raw = self.advance();
        let name = section_name(raw).unwrap_or_default();

        let name_start = leading_whitespace(raw) + 1;
        let mut section = Section {
            name: SectionName {
                value: name.to_string(),
                range: SourceRange::on_line(line_no, name_start, name_start + char_len(name)),
            },
            key_values: KeyValues::new(),
            raw_lines: Vec::new(),
            lines: Vec::new(),
            range: SourceRange::provisional(line_no, leading_whitespace(raw), char_len(raw)),
        };
        trace!(line = line_no, name, "section start");

        while let Some(line) = self.peek() {
            let kind = classify(line);
            if kind.ends_section() {
                break;
            }

            self.pos += 1;
            section.lines.push(line.to_string());
            match kind {
                LineKind::HeaderKv => {
                    let (key, value) = split_key_value(line);
                    section.key_values.insert(key, value);
                }
                LineKind::BlankOrComment => {}
                _ => section.raw_lines.push(line.to_string()),
            }
        }

        section
    }

    fn parse_header(&mut self, headers: &mut Headers) {
        let line_no = self.pos as u32;
        let raw = self.advance();
        let (key, value) = split_key_value(raw);
        headers.values.insert(key, value);

        let line_range = SourceRange::on_line(line_no, 0, char_len(raw));
        headers.range = Some(match headers.range {
            Some(range) => range.extend(line_range),
            None => line_range,
        });
    }

    /// After a blank or comment line has been consumed, decide whether the
    /// next meaningful line starts a body.
    ///
    /// Returns the index of that line if its kind is not one of `continues`.
    /// At end of input there is no body.
    fn body_after_separator(&self, continues: &[LineKind]) -> Option<usize> {
        let next = self.next_meaningful()?;
        let kind = classify(self.line(next));
        (!continues.contains(&kind)).then_some(next)
    }

    /// Capture lines verbatim from `from` up to (not including) the first
    /// line whose kind satisfies `stop`, or the end of input.
    ///
    /// Blank or comment lines between the cursor and `from` are consumed
    /// without becoming part of the body. `from` must not itself satisfy
    /// `stop`, so at least one line is always consumed.
    fn capture_body(&mut self, from: usize, stop: impl Fn(LineKind) -> bool) -> Body {
        debug_assert!(from >= self.pos);
        self.pos = from;

        let mut lines = Vec::new();
        while let Some(line) = self.peek() {
            if stop(classify(line)) {
                break;
            }
            lines.push(line.to_string());
            self.pos += 1;
        }
        debug_assert!(!lines.is_empty(), "body capture consumed nothing");

        let mut range = SourceRange::provisional(from as u32, 0, char_len(self.line(from)));
        self.close_range(&mut range);
        trace!(?range, lines = lines.len(), "captured body");

        Body {
            lines,
            range: Some(range),
        }
    }

    /// Set the end of `range` to the last consumed line.
    fn close_range(&self, range: &mut SourceRange) {
        let last = self.pos.saturating_sub(1);
        range.close(last as u32, char_len(self.line(last)));
    }

    fn document_range(&self) -> SourceRange {
        match self.lines.len().checked_sub(1) {
            Some(last) => SourceRange::new(0, 0, last as u32, char_len(self.line(last))),
            None => SourceRange::default(),
        }
    }

    fn skip_blank_or_comment(&mut self) {
        while self.peek_kind() == Some(LineKind::BlankOrComment) {
            self.pos += 1;
        }
    }

    /// Index of the first line at or after the cursor that is not blank or
    /// a comment.
    fn next_meaningful(&self) -> Option<usize> {
        (self.pos..self.lines.len()).find(|&i| classify(self.line(i)) != LineKind::BlankOrComment)
    }

    #[inline]
    fn line(&self, index: usize) -> &'a str {
        self.lines.get(index).map_or("", |line| line.as_ref())
    }

    #[inline]
    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).map(|line| line.as_ref())
    }

    #[inline]
    fn peek_kind(&self) -> Option<LineKind> {
        self.peek().map(classify)
    }

    #[inline]
    fn advance(&mut self) -> &'a str {
        let line = self.line(self.pos);
        self.pos += 1;
        line
    }
}

#[cfg(test)]
mod tests;
