//! Property-based tests for the dp formatter
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use dp::format::format_source;
use dp::{lexer, parser, source::Position};
use dp_core::lang::{keywords, operators};
use proptest::prelude::*;

fn reparses(text: &str) -> bool {
    lexer::tokenize(Position::location("formatted.dp"), text)
        .and_then(|tokens| parser::parse(&tokens))
        .is_ok()
}

// =============================================================================
// Format Properties
// =============================================================================

#[cfg(test)]
mod format_tests {
    use super::*;
    use dp::ast::{FileItem, Node};

    fn dump(source: &str) -> Vec<String> {
        let tokens = lexer::tokenize(Position::location("t.dp"), source).expect("Lex failed");
        let items: Vec<FileItem> = parser::parse(&tokens).expect("Parse failed");
        items.iter().map(Node::dump).collect()
    }

    /// Property: Formatting is idempotent (format(format(x)) == format(x))
    #[test]
    fn format_is_idempotent_simple() {
        let source = r#"
import "fmt"

add(a, b int) int {
    return a + b
}

main() {
    result := add(1, 2)
    println(result)
}
"#;

        let formatted1 = format_source("simple.dp", source).expect("First format failed");
        let formatted2 = format_source("simple.dp", &formatted1).expect("Second format failed");

        assert_eq!(formatted1, formatted2, "Formatting should be idempotent");
    }

    /// Property: Formatting preserves the tree shape
    #[test]
    fn format_preserves_parseability() {
        let source = "pub T visible {\n\ta int\n\tb int\n}\n\nf(t T) int {\n\treturn t.a*2 + t.b\n}\n";
        let formatted = format_source("t.dp", source).expect("Format failed");

        assert_eq!(dump(source), dump(&formatted), "Formatting changed AST structure");
    }

    #[test]
    fn format_spaces_by_precedence() {
        assert_eq!(format_source("p.dp", "x = a+b * c\n").unwrap(), "x = a + b*c\n");
    }

    #[test]
    fn format_shares_parameter_types() {
        let formatted = format_source("p.dp", "f(a int, b int, c int) () {}\n").unwrap();
        assert_eq!(formatted, "f(a, b, c int) () {}\n");
        assert_eq!(dump(&formatted), dump("f(a int, b int, c int) () {}\n"));
    }

    #[test]
    fn format_merges_imports() {
        let source = "import \"b\"\n\nimport \"a\"\n";
        assert_eq!(
            format_source("p.dp", source).unwrap(),
            "import {\n\t\"a\"\n\t\"b\"\n}\n"
        );
    }

    #[test]
    fn format_drops_trailing_bare_return() {
        let source = "f() {\n\tg()\n\treturn\n}\n";
        assert_eq!(format_source("p.dp", source).unwrap(), "f() () {\n\tg()\n}\n");
    }

    /// Property: Empty or whitespace-only input formats to nothing
    #[test]
    fn format_handles_empty_input() {
        for source in ["", "   ", "\n\n\n", "\t\t", ";\n;"] {
            assert_eq!(format_source("empty.dp", source).unwrap(), "", "{source:?}");
        }
    }

    /// Property: Mixed-precedence chains are rejected, not reformatted
    #[test]
    fn format_rejects_mixed_precedence() {
        let err = format_source("mixed.dp", "x = a + b && c\n").unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("operators have different precedence"), "{rendered}");
    }
}

// =============================================================================
// Generated programs
// =============================================================================

#[cfg(test)]
mod proptest_strategies {
    use super::*;

    // Strategy for generating valid dp identifiers
    fn ident_strategy() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,5}".prop_filter("Not a keyword", |s| {
            keywords::from_str(s).is_none() && s != "pub"
        })
    }

    fn binary_operator() -> impl Strategy<Value = &'static str> {
        let symbols: Vec<&'static str> = operators::OPERATORS
            .iter()
            .filter(|info| info.precedence.is_some())
            .map(|info| info.canonical)
            .collect();
        prop::sample::select(symbols)
    }

    // Fully parenthesized expressions, so any operator mix is valid input
    fn expr_strategy() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![
            ident_strategy(),
            "[0-9]{1,3}",
            Just("nil".to_string()),
            Just("true".to_string()),
            Just("'c'".to_string()),
            Just("\"s\"".to_string()),
        ];

        leaf.prop_recursive(4, 24, 3, |inner| {
            prop_oneof![
                (inner.clone(), binary_operator(), inner.clone())
                    .prop_map(|(l, op, r)| format!("({l}) {op} ({r})")),
                (prop::sample::select(vec!["-", "!", "^", "+"]), inner.clone())
                    .prop_map(|(op, e)| format!("{op}({e})")),
                (ident_strategy(), prop::collection::vec(inner, 0..3))
                    .prop_map(|(name, args)| format!("{name}({})", args.join(", "))),
            ]
        })
    }

    fn comment_strategy() -> impl Strategy<Value = String> {
        prop_oneof![Just(String::new()), Just(" // note".to_string())]
    }

    fn statement_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            (ident_strategy(), expr_strategy(), comment_strategy())
                .prop_map(|(name, value, comment)| format!("{name} := {value}{comment}")),
            (ident_strategy(), expr_strategy()).prop_map(|(name, value)| format!("{name} = {value}")),
            (ident_strategy(), ident_strategy()).prop_map(|(a, ty)| format!("{a} : {ty}")),
            expr_strategy().prop_map(|value| format!("return {value}")),
            Just("return".to_string()),
            (expr_strategy(), ident_strategy())
                .prop_map(|(test, name)| format!("if {test} {{\n\t\t{name} = 1\n\t}}")),
            (expr_strategy(), ident_strategy())
                .prop_map(|(test, name)| format!("for {test} {{\n\t\t{name} = 2\n\t\tbreak\n\t}}")),
            Just("// remark".to_string()),
        ]
    }

    fn item_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            (ident_strategy(), expr_strategy(), comment_strategy())
                .prop_map(|(name, value, comment)| format!("{name} = {value}{comment}\n")),
            (
                ident_strategy(),
                prop::collection::vec(ident_strategy(), 0..3),
                prop::collection::vec(statement_strategy(), 0..5),
            )
                .prop_map(|(name, params, body)| {
                    let params: Vec<_> = params.iter().map(|p| format!("{p} int")).collect();
                    let body: String = body.iter().map(|s| format!("\t{s}\n")).collect();
                    format!("{name}({}) {{\n{body}}}\n", params.join(", "))
                }),
            (ident_strategy(), prop::collection::vec(ident_strategy(), 0..4)).prop_map(|(name, fields)| {
                let fields: String = fields.iter().map(|f| format!("\t{f} int\n")).collect();
                format!("{name} {{\n{fields}}}\n")
            }),
            prop::sample::select(vec!["\"b/c\"", "\"a\"", "\"x.org/y\"", "\"internal/z\""])
                .prop_map(|path| format!("import {path}\n")),
            Just("// file comment\n".to_string()),
        ]
    }

    fn program_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec((item_strategy(), prop::bool::ANY), 0..6).prop_map(|items| {
            items
                .into_iter()
                .map(|(item, gap)| if gap { format!("{item}\n") } else { item })
                .collect()
        })
    }

    proptest! {
        /// Property: Generated expressions format to text that formats to itself
        #[test]
        fn generated_expressions_are_idempotent(value in expr_strategy()) {
            let source = format!("x = {value}\n");
            let once = format_source("gen.dp", &source).expect("Format failed");
            prop_assert!(reparses(&once), "not re-parseable:\n{once}");
            let twice = format_source("gen.dp", &once).expect("Second format failed");
            prop_assert_eq!(once, twice);
        }

        /// Property: Generated programs format idempotently and stay parseable
        #[test]
        fn generated_programs_are_idempotent(program in program_strategy()) {
            let once = format_source("gen.dp", &program).expect("Format failed");
            prop_assert!(reparses(&once), "not re-parseable:\n{once}");
            let twice = format_source("gen.dp", &once).expect("Second format failed");
            prop_assert_eq!(once, twice);
        }

        /// Property: Identifiers remain valid after round-trip through lexer
        #[test]
        fn identifiers_survive_lexing(ident in ident_strategy()) {
            let source = format!("x = {}", ident);
            let tokens = lexer::tokenize(Position::location("gen.dp"), &source).expect("Lex failed");

            // Should have at least 3 tokens (ident, =, ident)
            prop_assert!(tokens.len() >= 3);
        }
    }
}
