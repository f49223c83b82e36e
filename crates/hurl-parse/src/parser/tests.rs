use super::*;

fn parse(source: &str) -> Document {
    crate::parse(source).expect("document should parse")
}

const CAPTURES_FILE: &str = r#"POST {{url}}/people
Content-Type: application/json

{
  "name": "Ada"
}

HTTP/1.1 200
[Captures]
id: jsonpath "$.id"
test: "hello"
[Asserts]
count "$.list" == 2"#;

const PARTIAL_FILE: &str = "# partial request
PATCH
Accept: */*
{
\t\"hello\": \"test\"
}
   GET {{url}}/health
HTTP/1.1 200
[As]";

#[test]
fn test_single_request_line() {
    let doc = parse("GET https://example.org");
    assert_eq!(doc.entries.len(), 1);

    let entry = &doc.entries[0];
    assert!(entry.response.is_none());
    assert_eq!(entry.request.method.name, "GET");
    assert_eq!(entry.request.target.value, "https://example.org");
    assert!(entry.request.headers.values.is_empty());
    assert!(entry.request.headers.range.is_none());
    assert!(entry.request.body.range.is_none());
    assert!(entry.request.sections.is_empty());
    assert_eq!(entry.range, SourceRange::new(0, 0, 0, 23));
}

#[test]
fn test_captures_file() {
    let doc = parse(CAPTURES_FILE);
    assert_eq!(doc.entries.len(), 1);
    assert_eq!(doc.range.start_line, 0);
    assert_eq!(doc.range.end_line, 12);

    let request = &doc.entries[0].request;
    assert_eq!(request.method.name, "POST");
    assert_eq!(request.method.range, SourceRange::on_line(0, 0, 4));
    assert_eq!(request.target.value, "{{url}}/people");
    assert_eq!(request.target.range, SourceRange::on_line(0, 5, 19));
    assert_eq!(
        request.headers.values.get("Content-Type"),
        Some("application/json")
    );
    assert_eq!(request.headers.range, Some(SourceRange::on_line(1, 0, 30)));
    assert_eq!(
        request.body.lines,
        vec!["{", "  \"name\": \"Ada\"", "}", ""]
    );
    assert_eq!(request.body.range.map(|r| (r.start_line, r.end_line)), Some((3, 6)));
    assert_eq!(request.range.start_line, 0);
    assert_eq!(request.range.end_line, 6);

    let response = doc.entries[0].response.as_ref().expect("response");
    assert_eq!(response.version, "HTTP/1.1");
    assert_eq!(response.status, 200);
    assert_eq!(response.range.start_line, 7);
    assert_eq!(response.range.end_line, 12);
    assert_eq!(response.sections.len(), 2);

    let captures = &response.sections[0];
    assert_eq!(captures.name.value, "Captures");
    assert_eq!(captures.name.range, SourceRange::on_line(8, 1, 9));
    assert_eq!(captures.range.start_line, 8);
    assert_eq!(captures.range.end_line, 10);
    assert_eq!(captures.key_values.keys().collect::<Vec<_>>(), vec!["id", "test"]);
    assert_eq!(captures.key_values.get("id"), Some("jsonpath \"$.id\""));
    assert!(captures.raw_lines.is_empty());

    let asserts = &response.sections[1];
    assert_eq!(asserts.name.value, "Asserts");
    assert_eq!(asserts.range.start_line, 11);
    assert_eq!(asserts.range.end_line, 12);
    assert!(asserts.key_values.is_empty());
    assert_eq!(asserts.raw_lines, vec!["count \"$.list\" == 2"]);

    assert_eq!(doc.entries[0].range.start_line, 0);
    assert_eq!(doc.entries[0].range.end_line, 12);
}

#[test]
fn test_partial_request() {
    let doc = parse(PARTIAL_FILE);
    assert_eq!(doc.entries.len(), 2);
    assert_eq!(doc.range.start_line, 0);
    assert_eq!(doc.range.end_line, 8);

    let first = &doc.entries[0];
    assert_eq!(first.request.method.name, "PATCH");
    assert_eq!(first.request.target.value, "");
    assert_eq!(first.request.body.lines, vec!["{", "\t\"hello\": \"test\"", "}"]);
    assert_eq!(first.request.range.start_line, 1);
    assert_eq!(first.request.range.end_line, 5);
    assert!(first.response.is_none());

    let body_range = first.request.body.range.expect("body range");
    assert_eq!(body_range.start_line, 3);
    assert_eq!(body_range.start_col, 0);
    assert_eq!(body_range.end_line, 5);

    let headers_range = first.request.headers.range.expect("headers range");
    assert_eq!(headers_range.start_line, 2);
    assert_eq!(headers_range.end_line, 2);

    let second = &doc.entries[1];
    assert_eq!(second.request.method.name, "GET");
    assert_eq!(second.request.method.range.start_col, 3);
    assert_eq!(second.request.method.range.end_col, 6);
    assert_eq!(second.range.start_line, 6);
    assert_eq!(second.range.end_line, 8);

    let response = second.response.as_ref().expect("response");
    assert_eq!(response.range.start_line, 7);
    assert_eq!(response.range.end_line, 8);

    let section = &response.sections[0];
    assert_eq!(section.range.start_line, 8);
    assert_eq!(section.range.end_line, 8);
    assert_eq!(section.name.range.start_line, 8);
    assert_eq!(section.name.range.start_col, 1);
    assert_eq!(section.name.range.end_col, 3);
}

#[test]
fn test_target_range_without_target() {
    let doc = parse("PATCH");
    let target = &doc.entries[0].request.target;
    assert_eq!(target.value, "");
    assert_eq!(target.range, SourceRange::on_line(0, 5, 5));
}

#[test]
fn test_non_numeric_status_degrades_to_zero() {
    let doc = parse("GET http://localhost\nHTTP/1.1 notanumber");
    let response = doc.entries[0].response.as_ref().expect("response");
    assert_eq!(response.version, "HTTP/1.1");
    assert_eq!(response.status, 0);
}

#[test]
fn test_any_integer_status_is_kept() {
    let status = |text: &str| parse(text).entries[0].response.as_ref().map(|r| r.status);
    assert_eq!(status("GET http://localhost\nHTTP/2 99999"), Some(99999));
    assert_eq!(status("GET http://localhost\nHTTP/2 -1"), Some(-1));
    assert_eq!(status("GET http://localhost\nHTTP/2 4.5"), Some(0));
}

#[test]
fn test_status_line_without_code_fails() {
    let err = crate::parse("GET http://localhost\n\nHTTP/1.1").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::MalformedStatusLine {
            line: "HTTP/1.1".to_string()
        }
    );
    assert_eq!(err.line, 2);
    assert!(err.to_string().contains("invalid response status line"));
}

#[test]
fn test_half_typed_status_line_fails_whole_document() {
    let text = "GET http://localhost/a\nHTTP/1.1 200\n\nGET http://localhost/b\nHTTP/1.1\n\nGET http://localhost/c\nHTTP/1.1 200";
    let err = crate::parse(text).unwrap_err();
    assert_eq!(err.line, 4);
}

#[test]
fn test_empty_method_line_fails() {
    let lines = ["   "];
    let err = Parser::new(&lines).parse_request().unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::EmptyMethodLine);
    assert_eq!(err.line, 0);
    assert!(
        err.to_string().contains("expected method line but got empty"),
        "message should name the cause: {err}"
    );
}

#[test]
fn test_stray_lines_are_skipped() {
    let doc = parse("some stray text\nHTTP/1.1 200\n\nGET /a\n");
    assert_eq!(doc.entries.len(), 1);
    assert_eq!(doc.entries[0].request.method.name, "GET");
    assert_eq!(doc.entries[0].range.start_line, 3);
}

#[test]
fn test_empty_document() {
    let doc = parse("");
    assert!(doc.entries.is_empty());
    assert_eq!(doc.range, SourceRange::default());

    let doc = parse("# only a comment\n\n");
    assert!(doc.entries.is_empty());
    assert_eq!(doc.range.end_line, 2);
}

#[test]
fn test_blank_then_header_continues_request() {
    let doc = parse("GET /a\nAccept: text/plain\n\n# still headers\nX-Trace: 1\n\nHTTP/1.1 204");
    let request = &doc.entries[0].request;
    assert_eq!(
        request.headers.values.keys().collect::<Vec<_>>(),
        vec!["Accept", "X-Trace"]
    );
    assert!(request.body.is_empty());
    assert_eq!(request.range.end_line, 5);
    assert_eq!(doc.entries[0].response.as_ref().map(|r| r.status), Some(204));
}

#[test]
fn test_body_after_blank_stops_at_status_line() {
    let doc = parse("POST /a\n\nplain text body\nsecond line\n\nHTTP/1.1 201\n");
    let request = &doc.entries[0].request;
    assert_eq!(request.body.lines, vec!["plain text body", "second line", ""]);
    assert_eq!(request.body.text(), "plain text body\nsecond line\n");
    assert_eq!(request.range.end_line, 4);

    let response = doc.entries[0].response.as_ref().expect("response");
    assert_eq!(response.status, 201);
    assert_eq!(response.range.start_line, 5);
}

#[test]
fn test_body_swallows_sections_until_next_entry() {
    let doc = parse("POST /a\n```\nraw\n```\n[Asserts]\nGET /b");
    assert_eq!(doc.entries.len(), 2);
    assert_eq!(
        doc.entries[0].request.body.lines,
        vec!["```", "raw", "```", "[Asserts]"]
    );
    assert!(doc.entries[0].request.sections.is_empty());
}

#[test]
fn test_request_sections() {
    let doc = parse(
        "GET /search\n[QueryStringParams]\nq: rust\nlimit: 10\n[Options]\nverbose: true\n\nHTTP/1.1 200",
    );
    let request = &doc.entries[0].request;
    assert_eq!(request.sections.len(), 2);
    assert_eq!(request.sections[0].name.value, "QueryStringParams");
    assert_eq!(
        request.sections[0].key_values.iter().collect::<Vec<_>>(),
        vec![("q", "rust"), ("limit", "10")]
    );
    assert_eq!(request.sections[0].range.end_line, 3);
    assert_eq!(request.sections[1].range.start_line, 4);
    // Trailing blank line belongs to the last section.
    assert_eq!(request.sections[1].range.end_line, 6);
    assert_eq!(doc.entries[0].response.as_ref().map(|r| r.status), Some(200));
}

#[test]
fn test_response_headers_and_body() {
    let doc = parse(
        "GET /a\nHTTP/1.1 200\nContent-Type: application/json\n\n{\"ok\": true}\n\nGET /b\nHTTP/1.1 404",
    );
    assert_eq!(doc.entries.len(), 2);

    let response = doc.entries[0].response.as_ref().expect("response");
    assert_eq!(
        response.headers.values.get("Content-Type"),
        Some("application/json")
    );
    // `{"ok": true}` looks like a key/value line, so it is not a body start
    // after a blank line; it is read as a header instead.
    assert_eq!(response.headers.values.get("{\"ok\""), Some("true}"));
    assert!(response.body.is_empty());

    let second = doc.entries[1].response.as_ref().expect("response");
    assert_eq!(second.status, 404);
}

#[test]
fn test_response_body_ends_only_at_method() {
    let doc = parse("GET /a\nHTTP/1.1 200\n\n<html>\n</html>\nHTTP/1.1 200\nDELETE /a");
    let response = doc.entries[0].response.as_ref().expect("response");
    assert_eq!(
        response.body.lines,
        vec!["<html>", "</html>", "HTTP/1.1 200"]
    );
    assert_eq!(doc.entries.len(), 2);
    assert_eq!(doc.entries[1].request.method.name, "DELETE");
}

#[test]
fn test_section_raw_lines_and_comments() {
    let doc = parse(
        "GET /a\nHTTP/1.1 200\n[Asserts]\n# a comment\nstatus == 200\njsonpath \"$.a\" count == 1\n",
    );
    let section = &doc.entries[0].response.as_ref().expect("response").sections[0];
    assert_eq!(
        section.raw_lines,
        vec!["status == 200", "jsonpath \"$.a\" count == 1"]
    );
    assert_eq!(section.lines.len(), 4);
    assert_eq!(section.line(3), Some("# a comment"));
    assert_eq!(section.range.end_line, 6);
}

#[test]
fn test_crlf_lines() {
    let doc = parse("GET /a\r\nHTTP/1.1 200\r\n[Captures]\r\nid: header \"X-Id\"\r\n");
    let response = doc.entries[0].response.as_ref().expect("response");
    assert_eq!(response.status, 200);
    assert_eq!(
        response.sections[0].key_values.get("id"),
        Some("header \"X-Id\"")
    );
}

#[test]
fn test_ranges_are_nested() {
    let doc = parse(CAPTURES_FILE);
    for entry in &doc.entries {
        assert!(doc.range.contains_range(&entry.range));
        assert!(entry.range.contains_range(&entry.request.range));
        assert!(entry.request.range.contains_range(&entry.request.method.range));
        assert!(entry.request.range.contains_range(&entry.request.target.range));
        if let Some(response) = &entry.response {
            assert!(entry.range.contains_range(&response.range));
            for section in &response.sections {
                assert!(response.range.contains_range(&section.range));
                assert!(section.range.contains_range(&section.name.range));
            }
        }
    }
}
