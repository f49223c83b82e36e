//! The catalog of Hurl filters offered in completions and signature help.

/// Value types a filter takes and returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterType {
    pub input: &'static str,
    pub output: &'static str,
}

impl std::fmt::Display for FilterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "in: {}, out {}", self.input, self.output)
    }
}

/// A named filter and its one-line documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filter {
    pub name: &'static str,
    pub description: &'static str,
    pub ty: FilterType,
}

const fn filter(
    name: &'static str,
    description: &'static str,
    input: &'static str,
    output: &'static str,
) -> Filter {
    Filter {
        name,
        description,
        ty: FilterType { input, output },
    }
}

/// All filters, sorted by name.
pub const FILTERS: &[Filter] = &[
    filter("base64Decode", "Decodes a Base64 encoded string into bytes.", "string", "bytes"),
    filter("base64Encode", "Encodes bytes into Base64 encoded string.", "bytes", "string"),
    filter(
        "base64UrlSafeDecode",
        "Decodes a Base64 encoded string into bytes (using Base64 URL safe encoding).",
        "string",
        "bytes",
    ),
    filter(
        "base64UrlSafeEncode",
        "Encodes bytes into Base64 encoded string (using Base64 URL safe encoding).",
        "bytes",
        "string",
    ),
    filter("count", "Counts the number of items in a collection.", "collection", "number"),
    filter(
        "daysAfterNow",
        "Returns the number of days between now and a date in the future.",
        "date",
        "number",
    ),
    filter(
        "daysBeforeNow",
        "Returns the number of days between now and a date in the past.",
        "date",
        "number",
    ),
    filter("decode", "Decodes bytes to string using encoding.", "bytes", "string"),
    filter("first", "Returns the first element from a collection.", "collection", "any"),
    filter(
        "format",
        "Formats a date to a string given a specification format.",
        "date",
        "string",
    ),
    filter(
        "htmlEscape",
        "Converts the characters &, < and > to HTML-safe sequence.",
        "string",
        "string",
    ),
    filter(
        "htmlUnescape",
        "Converts all named and numeric character references (e.g. &gt;, &#62;, &#x3e;) to the corresponding Unicode characters.",
        "string",
        "string",
    ),
    filter("jsonpath", "Evaluates a JSONPath expression.", "string", "any"),
    filter("last", "Returns the last element from a collection.", "collection", "any"),
    filter(
        "location",
        "Returns the target location URL of a redirection.",
        "response",
        "any",
    ),
    filter(
        "nth",
        "Returns the element from a collection at a zero-based index, accepts negative indices for indexing from the end of the collection.",
        "collection",
        "any",
    ),
    filter(
        "regex",
        "Extracts regex capture group. Pattern must have at least one capture group.",
        "string",
        "string",
    ),
    filter(
        "replace",
        "Replaces all occurrences of old string with new string.",
        "string",
        "string",
    ),
    filter(
        "replaceRegex",
        "Replaces all occurrences of a pattern with new string.",
        "string",
        "string",
    ),
    filter(
        "split",
        "Splits to a list of strings around occurrences of the specified delimiter.",
        "string",
        "string",
    ),
    filter(
        "toDate",
        "Converts a string to a date given a specification format.",
        "string",
        "date",
    ),
    filter("toFloat", "Converts value to float number.", "string|number", "number"),
    filter("toHex", "Converts bytes to hexadecimal string.", "bytes", "string"),
    filter("toInt", "Converts value to integer number.", "string|number", "number"),
    filter("toString", "Converts value to string.", "any", "string"),
    filter(
        "urlDecode",
        "Replaces %xx escapes with their single-character equivalent.",
        "string",
        "string",
    ),
    filter(
        "urlEncode",
        "Percent-encodes all the characters which are not included in unreserved chars (see RFC3986) with the exception of forward slash (/).",
        "string",
        "string",
    ),
    filter(
        "urlQueryParam",
        "Returns the value of a query parameter in a URL.",
        "string",
        "string",
    ),
    filter("xpath", "Evaluates a XPath expression.", "string", "string"),
];

/// Find a filter by exact name.
pub fn lookup(name: &str) -> Option<&'static Filter> {
    FILTERS
        .binary_search_by(|filter| filter.name.cmp(name))
        .ok()
        .map(|index| &FILTERS[index])
}
