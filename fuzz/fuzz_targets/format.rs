#![no_main]

use dp::format::format_source;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(once) = format_source("fuzz.dp", text) else {
        return;
    };

    // Canonical output parses again and is its own canonical form
    let twice = format_source("fuzz.dp", &once).expect("formatted output must parse");
    assert_eq!(once, twice);
});
