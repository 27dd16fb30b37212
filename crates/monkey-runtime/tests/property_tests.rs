//! Property-based tests for the lexer, parser and evaluator

mod common;

use common::{canonical, eval};
use monkey_runtime::{Lexer, Monkey, TokenKind, Value};
use proptest::prelude::*;

/// Arithmetic and comparison expressions over small integer literals
fn arb_expr() -> impl Strategy<Value = String> {
    let leaf = (0i64..1000).prop_map(|n| n.to_string());
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop::sample::select(vec!["+", "-", "*", "/", "<", ">", "==", "!="]),
                inner.clone()
            )
                .prop_map(|(l, op, r)| format!("{} {} {}", l, op, r)),
            inner.clone().prop_map(|e| format!("({})", e)),
            inner.clone().prop_map(|e| format!("-{}", e)),
            inner.prop_map(|e| format!("!{}", e)),
        ]
    })
}

proptest! {
    #[test]
    fn lexer_always_ends_with_eof(source in "\\PC*") {
        let tokens = Lexer::new(&source).tokenize();
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
        prop_assert_eq!(eofs, 1);
    }

    #[test]
    fn parser_never_panics(source in "\\PC{0,64}") {
        let _ = Monkey::parse(&source);
    }

    #[test]
    fn integer_literal_evaluates_to_itself(n in (i64::MIN + 1)..=i64::MAX) {
        prop_assert_eq!(eval(&n.to_string()), Value::Integer(n));
    }

    #[test]
    fn addition_commutes(a in any::<i64>().prop_filter("MIN has no literal", |n| *n != i64::MIN),
                         b in any::<i64>().prop_filter("MIN has no literal", |n| *n != i64::MIN)) {
        let ab = eval(&format!("{} + {}", a, b));
        let ba = eval(&format!("{} + {}", b, a));
        prop_assert_eq!(ab.clone(), ba);
        prop_assert_eq!(ab, Value::Integer(a.wrapping_add(b)));
    }

    #[test]
    fn canonical_form_is_stable(source in arb_expr()) {
        let once = canonical(&source);
        let twice = canonical(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn canonical_form_evaluates_the_same(source in arb_expr()) {
        let original = eval(&source);
        let reparsed = eval(&canonical(&source));
        prop_assert_eq!(original, reparsed);
    }

    #[test]
    fn string_length_counts_characters(s in "[a-zA-Z0-9 éü]{0,32}") {
        let source = format!("len(\"{}\")", s);
        prop_assert_eq!(eval(&source), Value::Integer(s.chars().count() as i64));
    }
}
