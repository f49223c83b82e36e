//! Signature help for filters and documented requests.

use hurl_parse::Document;
use tower_lsp::lsp_types::{
    Documentation, ParameterInformation, ParameterLabel, SignatureHelp, SignatureInformation,
};

use crate::filters;
use crate::openapi::{ApiSpec, Operation};

/// The whitespace-separated token of `lines[line]` under `col`.
///
/// The line is split on every single whitespace character, so runs of
/// whitespace produce empty tokens that never match. A token starting at
/// `start` covers columns `start - 1 .. start + len - 1`, i.e. the cursor
/// counts as on a token when the character just before it is.
pub fn symbol_at<S: AsRef<str>>(lines: &[S], line: u32, col: u32) -> &str {
    let Some(text) = lines.get(line as usize) else {
        return "";
    };

    let col = i64::from(col);
    let mut start: i64 = 0;
    for token in text.as_ref().split(char::is_whitespace) {
        let len = token.chars().count() as i64;
        let offset = col - (start - 1);
        if (0..len).contains(&offset) {
            return token;
        }
        start += len + 1;
    }

    ""
}

/// Signature help at `(line, col)`.
///
/// A filter name under the cursor takes precedence; otherwise, on a
/// request's method or target, the matching API operation is described.
pub fn signature_help<S: AsRef<str>>(
    lines: &[S],
    doc: Option<&Document>,
    api: &ApiSpec,
    line: u32,
    col: u32,
) -> Option<SignatureHelp> {
    if let Some(filter) = filters::lookup(symbol_at(lines, line, col)) {
        return Some(single(SignatureInformation {
            label: filter.name.to_string(),
            documentation: Some(Documentation::String(filter.description.to_string())),
            parameters: Some(vec![ParameterInformation {
                label: ParameterLabel::Simple(filter.ty.input.to_string()),
                documentation: None,
            }]),
            active_parameter: None,
        }));
    }

    let doc = doc?;
    if !doc.on_request_method(line, col) && !doc.on_request_target(line, col) {
        return None;
    }

    let request = doc.request_at(line)?;
    let op = api.operation(&request.method.name, &request.target.value);
    Some(single(operation_signature(&op)))
}

fn operation_signature(op: &Operation) -> SignatureInformation {
    let parameters = op
        .detail
        .parameters
        .iter()
        .filter(|param| !param.name.is_empty() && !param.description.is_empty())
        .map(|param| ParameterInformation {
            label: ParameterLabel::Simple(param.name.clone()),
            documentation: Some(Documentation::String(param.description.clone())),
        })
        .collect();

    SignatureInformation {
        label: format!("{} {}", op.method, op.path),
        documentation: Some(Documentation::String(format!(
            "Summary: {}\nDescription: {}",
            op.detail.summary, op.detail.description
        ))),
        parameters: Some(parameters),
        active_parameter: None,
    }
}

fn single(signature: SignatureInformation) -> SignatureHelp {
    SignatureHelp {
        signatures: vec![signature],
        active_signature: None,
        active_parameter: None,
    }
}
