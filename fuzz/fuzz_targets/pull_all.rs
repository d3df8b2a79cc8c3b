#![no_main]

use libfuzzer_sys::fuzz_target;
use toml_cst::{Arena, Parser};

fuzz_target!(|data: &[u8]| {
    let arena = Arena::new();
    let mut parser = Parser::new(&arena);
    parser.reset(data);
    let mut prev_end = 0;
    while let Some(expr) = parser.next_expression() {
        let raw = expr.root().raw();
        assert!(prev_end <= raw.start && raw.end as usize <= data.len());
        prev_end = raw.end;
    }
    if let Some(error) = parser.error() {
        assert!(error.span.end as usize <= data.len());
        assert!(parser.next_expression().is_none());
    }
});
