//! Scoping of captured variables.
//!
//! A variable captured in a response's `[Captures]` section can be used on
//! any line after that section ends.

use crate::Document;

/// The variables introduced by one `[Captures]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CaptureVars {
    /// Last line of the section; the variables are usable on later lines.
    pub use_after: u32,
    /// Variable names in declaration order.
    pub variables: Vec<String>,
}

/// Capture sections of a document, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Captures(Vec<CaptureVars>);

impl Captures {
    /// The captures whose variables are in scope on `line`.
    pub fn before(&self, line: u32) -> Captures {
        Captures(
            self.0
                .iter()
                .filter(|capture| capture.use_after < line)
                .cloned()
                .collect(),
        )
    }

    /// All variable names, flattened in order, each name once.
    pub fn variables(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for name in self.0.iter().flat_map(|capture| &capture.variables) {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CaptureVars> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Captures {
    type Item = &'a CaptureVars;
    type IntoIter = std::slice::Iter<'a, CaptureVars>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Document {
    /// Every `[Captures]` section of every response.
    pub fn captures(&self) -> Captures {
        Captures(
            self.responses()
                .flat_map(|response| &response.sections)
                .filter(|section| section.is_captures())
                .map(|section| CaptureVars {
                    use_after: section.range.end_line,
                    variables: section.key_values.keys().map(str::to_string).collect(),
                })
                .collect(),
        )
    }
}
