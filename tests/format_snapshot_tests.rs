//! Snapshot tests for canonical formatting
//!
//! Each fixture in `tests/format_snapshots/` is formatted and compared against its stored
//! snapshot. Run `cargo insta review` to inspect changes.

use std::fs;
use std::path::Path;

use dp::format::format_source;

fn load_test_file(name: &str) -> String {
    let path = format!("tests/format_snapshots/{}.dp", name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read {}", path))
}

fn format_fixture(name: &str) -> String {
    let source = load_test_file(name);
    format_source(&format!("{name}.dp"), &source).unwrap_or_else(|err| panic!("{err}"))
}

#[test]
fn test_expressions_format() {
    let formatted = format_fixture("expressions");
    insta::assert_snapshot!("expressions", formatted);
}

#[test]
fn test_imports_format() {
    let formatted = format_fixture("imports");
    insta::assert_snapshot!("imports", formatted);
}

#[test]
fn test_types_format() {
    let formatted = format_fixture("types");
    insta::assert_snapshot!("types", formatted);
}

#[test]
fn test_statements_format() {
    let formatted = format_fixture("statements");
    insta::assert_snapshot!("statements", formatted);
}

/// Every fixture's canonical form is already canonical.
#[test]
fn test_fixtures_reach_fixpoint() {
    insta::glob!("format_snapshots/*.dp", |path: &Path| {
        let source = fs::read_to_string(path).expect("Failed to read fixture");
        let label = path.to_string_lossy();

        let once = format_source(&label, &source).expect("First format failed");
        let twice = format_source(&label, &once).expect("Second format failed");
        assert_eq!(once, twice, "{label} is not stable under formatting");
    });
}
