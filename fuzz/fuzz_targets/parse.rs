#![no_main]

use dp::source::Position;
use dp::{lexer, parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Invalid UTF-8 must come back as an encoding error, never a panic
    if let Ok(tokens) = lexer::tokenize_bytes(Position::location("fuzz.dp"), data) {
        let _ = parser::parse(&tokens);
    }

    // The first byte picks a nesting depth for the rest, far past the parser's limit
    let Some((&depth, rest)) = data.split_first() else {
        return;
    };
    let Ok(inner) = std::str::from_utf8(rest) else {
        return;
    };
    let depth = usize::from(depth) * 32;
    let nested = format!("x = {}{inner}{}\n", "(".repeat(depth), ")".repeat(depth));
    if let Ok(tokens) = lexer::tokenize(Position::location("fuzz.dp"), &nested) {
        let _ = parser::parse(&tokens);
    }
});
