//! Property-based fuzzing tests for the cminus scanner and parser
//!
//! These tests use proptest to generate random inputs and verify that:
//! 1. The scanner and parser never panic on arbitrary input
//! 2. Arithmetic folds left-associatively with the usual precedence
//! 3. Declaration and assignment rules hold for any identifier

use cminus::{run_source, ErrorKind, Parser, Scanner, Value};
use proptest::prelude::*;

// =============================================================================
// STRATEGY GENERATORS
// =============================================================================

/// Generate random strings that might break the scanner
fn arbitrary_source_string() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[\x00-\x7F]{0,500}").unwrap()
}

/// Generate sequences of plausible cminus tokens in random order
fn token_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(cminus_token(), 0..60).prop_map(|tokens| tokens.join(" "))
}

fn cminus_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Program".to_string()),
        Just("int".to_string()),
        Just("float".to_string()),
        Just("void".to_string()),
        Just("if".to_string()),
        Just("else".to_string()),
        Just("while".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just("[".to_string()),
        Just("]".to_string()),
        Just(";".to_string()),
        Just(",".to_string()),
        Just("=".to_string()),
        Just("==".to_string()),
        Just("!=".to_string()),
        Just("<".to_string()),
        Just("<=".to_string()),
        Just(">".to_string()),
        Just(">=".to_string()),
        Just("+".to_string()),
        Just("-".to_string()),
        Just("*".to_string()),
        Just("/".to_string()),
        (0u32..1000).prop_map(|n| n.to_string()),
        (0.0f64..100.0).prop_map(|f| format!("{:.2}", f)),
        identifier(),
    ]
}

/// Generate identifiers that are not keywords
fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_filter("keywords are not identifiers", |s| {
        !matches!(
            s.as_str(),
            "int" | "float" | "void" | "if" | "else" | "while"
        )
    })
}

fn int_result(source: &str) -> Option<Value> {
    run_source(source)
        .ok()
        .and_then(|p| p.symbols.lookup("a").and_then(|e| e.value))
}

// =============================================================================
// ROBUSTNESS
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn scanner_never_panics(source in arbitrary_source_string()) {
        let _ = Scanner::new(&source).scan_tokens();
    }

    #[test]
    fn parser_never_panics_on_token_soup(source in token_soup()) {
        if let Ok(tokens) = Scanner::new(&source).scan_tokens() {
            let _ = Parser::new(tokens).parse();
        }
    }

    #[test]
    fn parser_never_panics_inside_program(body in token_soup()) {
        let source = format!("Program F {{ int a; float b; {} }}", body);
        let _ = run_source(&source);
    }

    #[test]
    fn scanned_positions_are_one_indexed(source in token_soup()) {
        let tokens = Scanner::new(&source).scan_tokens().unwrap();
        for token in &tokens {
            prop_assert!(token.line >= 1);
            prop_assert!(token.column >= 1);
        }
    }
}

// =============================================================================
// EVALUATION PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn subtraction_folds_left(x in 0i64..10_000, y in 0i64..10_000, z in 0i64..10_000) {
        let source = format!("Program P {{ int a; a = {} - {} - {}; }}", x, y, z);
        prop_assert_eq!(int_result(&source), Some(Value::Int((x - y) - z)));
    }

    #[test]
    fn division_folds_left(x in 0i64..100_000, y in 1i64..100, z in 1i64..100) {
        let source = format!("Program P {{ int a; a = {} / {} / {}; }}", x, y, z);
        prop_assert_eq!(int_result(&source), Some(Value::Int((x / y) / z)));
    }

    #[test]
    fn multiplication_binds_tighter(x in 0i64..1000, y in 0i64..1000, z in 0i64..1000) {
        let source = format!("Program P {{ int a; a = {} + {} * {}; }}", x, y, z);
        prop_assert_eq!(int_result(&source), Some(Value::Int(x + y * z)));
    }

    #[test]
    fn integer_addition_saturates(x in 0i64..i64::MAX, y in 0i64..i64::MAX) {
        let source = format!("Program P {{ int a; a = {} + {}; }}", x, y);
        prop_assert_eq!(int_result(&source), Some(Value::Int(x.saturating_add(y))));
    }

    #[test]
    fn comparison_stores_one_or_zero(x in 0i64..100, y in 0i64..100) {
        let source = format!("Program P {{ int a; a = {} < {}; }}", x, y);
        let expected = if x < y { 1 } else { 0 };
        prop_assert_eq!(int_result(&source), Some(Value::Int(expected)));
    }

    #[test]
    fn division_by_zero_always_fails(x in 0i64..100_000) {
        let source = format!("Program P {{ int a; a = {} / 0; }}", x);
        let err = run_source(&source).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::DivisionByZero);
    }

    #[test]
    fn nested_parentheses_evaluate(depth in 1usize..100, n in 0i64..1000) {
        let source = format!(
            "Program P {{ int a; a = {}{}{}; }}",
            "(".repeat(depth),
            n,
            ")".repeat(depth)
        );
        prop_assert_eq!(int_result(&source), Some(Value::Int(n)));
    }

    #[test]
    fn redeclaration_always_fails(name in identifier()) {
        let source = format!("Program P {{ int {0}; float {0}; }}", name);
        let err = run_source(&source).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::DuplicateDeclaration);
    }

    #[test]
    fn undeclared_target_always_fails(name in identifier()) {
        prop_assume!(name != "a");
        let source = format!("Program P {{ int a; {} = 1; }}", name);
        let err = run_source(&source).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::UndeclaredVariable);
    }

    #[test]
    fn declaration_order_is_preserved(count in 1usize..20) {
        let decls: String = (0..count).map(|i| format!("int v{}; ", i)).collect();
        let source = format!("Program P {{ {}}}", decls);
        let program = run_source(&source).unwrap();

        let names: Vec<_> = program.symbols.iter().map(|e| e.name.clone()).collect();
        let expected: Vec<_> = (0..count).map(|i| format!("v{}", i)).collect();
        prop_assert_eq!(names, expected);
    }
}
