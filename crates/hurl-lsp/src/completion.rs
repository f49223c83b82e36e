//! Completion items for a cursor position.

use hurl_parse::{ASSERTS_SECTION, CAPTURES_SECTION, Document};
use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind, Documentation};

use crate::filters::FILTERS;
use crate::openapi::ApiSpec;

/// Methods offered at the start of a request line.
pub const METHODS: &[&str] = &[
    "GET", "POST", "PUT", "PATCH", "HEAD", "DELETE", "CONNECT", "TRACE", "OPTIONS",
];

/// Collect completions at `(line, col)`, where `col` is the column of the
/// character just before the cursor.
pub fn complete(doc: &Document, api: &ApiSpec, line: u32, col: u32) -> Vec<CompletionItem> {
    let mut items = Vec::new();

    if doc.on_request_method(line, col) {
        items.extend(METHODS.iter().map(|method| CompletionItem {
            label: method.to_string(),
            kind: Some(CompletionItemKind::METHOD),
            insert_text: Some(method.to_string()),
            ..Default::default()
        }));
    }

    if doc.on_response_section_name(line, col) {
        items.extend([CAPTURES_SECTION, ASSERTS_SECTION].map(|name| {
            let tag = format!("[{name}]");
            CompletionItem {
                label: tag.clone(),
                kind: Some(CompletionItemKind::ENUM_MEMBER),
                insert_text: Some(tag),
                ..Default::default()
            }
        }));
    }

    items.extend(
        doc.captures_available(line)
            .into_iter()
            .map(|name| CompletionItem {
                insert_text: Some(format!("{{{{{name}}}}}")),
                label: name,
                kind: Some(CompletionItemKind::VARIABLE),
                ..Default::default()
            }),
    );

    if doc.can_use_filter(line, col) {
        items.extend(FILTERS.iter().map(|filter| CompletionItem {
            label: filter.name.to_string(),
            kind: Some(CompletionItemKind::FUNCTION),
            detail: Some(filter.ty.to_string()),
            documentation: Some(Documentation::String(filter.description.to_string())),
            insert_text: Some(filter.name.to_string()),
            ..Default::default()
        }));
    }

    if doc.on_request_target(line, col) {
        items.extend(api.paths().map(|path| CompletionItem {
            label: path.to_string(),
            kind: Some(CompletionItemKind::VALUE),
            insert_text: Some(path.to_string()),
            ..Default::default()
        }));
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::SpecFormat;

    const FILE: &str = r#"POST {{url}}/people
Content-Type: application/json
{
  "name": "Ada"
}
HTTP/1.1 200
[Captures]
id: jsonpath "$.id"
[Asserts]
status == 200

GET {{url}}/people/{{id}}
"#;

    fn labels(items: &[CompletionItem]) -> Vec<&str> {
        items.iter().map(|item| item.label.as_str()).collect()
    }

    fn complete_at(line: u32, col: u32) -> Vec<CompletionItem> {
        let doc = hurl_parse::parse(FILE).unwrap();
        complete(&doc, &ApiSpec::default(), line, col)
    }

    #[test]
    fn test_methods_at_start_of_request() {
        let items = complete_at(0, 1);
        assert_eq!(labels(&items), METHODS);
        assert!(items.iter().all(|i| i.kind == Some(CompletionItemKind::METHOD)));

        let items = hurl_parse::parse("").map(|doc| complete(&doc, &ApiSpec::default(), 0, 0));
        assert_eq!(items.unwrap().len(), METHODS.len());
    }

    #[test]
    fn test_response_sections_after_status() {
        let items = complete_at(6, 0);
        assert_eq!(labels(&items), vec!["[Captures]", "[Asserts]"]);
        assert_eq!(items[0].insert_text.as_deref(), Some("[Captures]"));
        assert_eq!(items[1].kind, Some(CompletionItemKind::ENUM_MEMBER));
    }

    #[test]
    fn test_captured_variables_after_captures() {
        assert!(complete_at(7, 0).iter().all(|i| i.label != "id"));

        let items = complete_at(11, 0);
        let var = items.iter().find(|i| i.label == "id").unwrap();
        assert_eq!(var.kind, Some(CompletionItemKind::VARIABLE));
        assert_eq!(var.insert_text.as_deref(), Some("{{id}}"));
    }

    #[test]
    fn test_filters_in_sections() {
        let items = complete_at(7, 4);
        assert_eq!(items.len(), FILTERS.len());
        let jsonpath = items.iter().find(|i| i.label == "jsonpath").unwrap();
        assert_eq!(jsonpath.kind, Some(CompletionItemKind::FUNCTION));
        assert_eq!(jsonpath.detail.as_deref(), Some("in: string, out any"));
        assert_eq!(
            jsonpath.documentation,
            Some(Documentation::String("Evaluates a JSONPath expression.".into()))
        );

        // Inside the quoted path expression.
        assert!(complete_at(7, 16).is_empty());
        // Key region.
        assert!(complete_at(7, 1).is_empty());
    }

    #[test]
    fn test_paths_on_target() {
        let doc = hurl_parse::parse(FILE).unwrap();
        let api = ApiSpec::parse(
            SpecFormat::Json,
            r#"{"paths": {"/people": {}, "/people/{id}": {}}}"#,
        )
        .unwrap();

        let items = complete(&doc, &api, 0, 8);
        assert_eq!(labels(&items), vec!["/people", "/people/{id}"]);
        assert!(items.iter().all(|i| i.kind == Some(CompletionItemKind::VALUE)));

        // Variables captured earlier come along on later targets.
        let items = complete(&doc, &api, 11, 8);
        assert_eq!(labels(&items), vec!["id", "/people", "/people/{id}"]);
    }

    #[test]
    fn test_nothing_in_request_body() {
        assert!(complete_at(3, 2).is_empty());
    }
}
