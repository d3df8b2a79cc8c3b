#![no_main]

use libfuzzer_sys::fuzz_target;
use toml_cst::{Arena, Kind, NodeRef, Parser};

fn render(out: &mut Vec<u8>, node: NodeRef<'_, '_>) {
    let decoration = node.decoration().copied().unwrap_or_default();
    out.extend_from_slice(decoration.before_bytes());
    match node.kind() {
        Kind::Table | Kind::ArrayTable => {
            let depth = if node.kind() == Kind::Table { 1 } else { 2 };
            out.extend(std::iter::repeat_n(b'[', depth));
            for key in node.children() {
                render(out, key);
            }
            out.extend(std::iter::repeat_n(b']', depth));
        }
        Kind::KeyValue => {
            let Some(value) = node.value() else { return };
            let mut part = value.next_sibling();
            while let Some(p) = part {
                render(out, p);
                part = p.next_sibling();
            }
            render(out, value);
        }
        Kind::Key => {
            if let Some(dot) = node.first_child() {
                render(out, dot);
            }
            out.extend_from_slice(node.text());
        }
        Kind::Array | Kind::InlineTable => {
            let (open, close) = if node.kind() == Kind::Array {
                (b'[', b']')
            } else {
                (b'{', b'}')
            };
            out.push(open);
            for child in node.children() {
                render(out, child);
            }
            out.push(close);
        }
        _ => out.extend_from_slice(node.text()),
    }
    out.extend_from_slice(decoration.after_bytes());
    out.extend_from_slice(decoration.comment_bytes());
}

fuzz_target!(|data: &[u8]| {
    let arena = Arena::new();
    let mut parser = Parser::lossless(&arena);
    parser.reset(data);
    let mut out = Vec::with_capacity(data.len());
    while let Some(expr) = parser.next_expression() {
        out.extend_from_slice(expr.newline());
        render(&mut out, expr.root());
    }
    if parser.error().is_none() {
        assert_eq!(out, data);
    }
});
