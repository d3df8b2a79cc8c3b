use crate::{Arena, Kind, Parser, Span};
use serde_json::json;

#[test]
fn kind_and_span() {
    assert_eq!(serde_json::to_value(Kind::LocalDateTime).unwrap(), json!("LocalDateTime"));
    assert_eq!(
        serde_json::to_value(Span::new(3, 9)).unwrap(),
        json!({"start": 3, "end": 9})
    );
}

#[test]
fn key_value_tree() {
    let arena = Arena::new();
    let mut parser = Parser::new(&arena);
    parser.reset("a.b = [1, \"x\\ty\"]");
    let expr = parser.next_expression().unwrap();
    let value = serde_json::to_value(expr.root()).unwrap();
    assert_eq!(
        value,
        json!({
            "kind": "KeyValue",
            "raw": {"start": 0, "end": 17},
            "data": "",
            "children": [
                {
                    "kind": "Array",
                    "raw": {"start": 6, "end": 17},
                    "data": "",
                    "children": [
                        {"kind": "Integer", "raw": {"start": 7, "end": 8}, "data": "1"},
                        {"kind": "String", "raw": {"start": 10, "end": 16}, "data": "x\ty"},
                    ]
                },
                {"kind": "Key", "raw": {"start": 0, "end": 1}, "data": "a"},
                {"kind": "Key", "raw": {"start": 2, "end": 3}, "data": "b"},
            ]
        })
    );
}

#[test]
fn lossless_expression_carries_trivia() {
    let arena = Arena::new();
    let mut parser = Parser::lossless(&arena);
    parser.reset("x = 1\r\n  [t] # c");
    parser.next_expression().unwrap();
    let expr = parser.next_expression().unwrap();
    let value = serde_json::to_value(expr).unwrap();
    assert_eq!(value["newline"], json!("\r\n"));
    assert_eq!(value["root"]["kind"], json!("Table"));
    assert_eq!(
        value["root"]["decoration"],
        json!({"before": "  ", "after": " ", "comment": "# c"})
    );
    assert_eq!(value["root"]["children"][0]["data"], json!("t"));
    assert!(value["root"]["children"][0].get("decoration").is_none());
}
