//! Property tests for the tokenize, parse and evaluate pipeline

use proptest::prelude::*;
use serde_json::{json, Value as JsonValue};

use crate::cache;
use crate::evaluator::eval;
use crate::lexer::tokenize;
use crate::parser::parse;
use crate::predicate::Predicate;

// ═══════════════════════════════════════════════════════════════════════════
// Target builders
// ═══════════════════════════════════════════════════════════════════════════

fn object(entries: &[(&str, JsonValue)]) -> JsonValue {
    let mut map = serde_json::Map::new();
    for (key, value) in entries {
        map.insert((*key).to_string(), value.clone());
    }
    JsonValue::Object(map)
}

// ═══════════════════════════════════════════════════════════════════════════
// Properties
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    /// Balanced generated expressions always tokenize.
    #[test]
    fn prop_balanced_expression_tokenizes(key in "[a-z]{1,8}", value in -100..=100i32) {
        let expression = format!("({}={})", key, value);
        prop_assert!(tokenize(&expression).is_ok());
    }

    /// Juxtaposed terms behave exactly like an explicit conjunction.
    #[test]
    fn prop_implicit_and_matches_explicit(
        key_a in "[a-z]{1,8}",
        key_b in "[a-z]{1,8}",
        want_a in -10..=10i32,
        want_b in -10..=10i32,
        have_a in -10..=10i32,
        have_b in -10..=10i32,
    ) {
        let target = object(&[
            (key_a.as_str(), json!(have_a)),
            (key_b.as_str(), json!(have_b)),
        ]);
        let implicit = Predicate::new(format!("({}={})({}={})", key_a, want_a, key_b, want_b));
        let explicit = Predicate::new(format!("&({}={})({}={})", key_a, want_a, key_b, want_b));
        prop_assert_eq!(
            implicit.matches(Some(&target)).unwrap(),
            explicit.matches(Some(&target)).unwrap()
        );
    }

    /// The wildcard tests presence, in either operand position.
    #[test]
    fn prop_wildcard_tests_presence(
        key in "[a-z]{1,8}",
        value in -100..=100i32,
        present in any::<bool>(),
    ) {
        let target = if present {
            object(&[(key.as_str(), json!(value))])
        } else {
            json!({})
        };
        let forward = Predicate::new(format!("({}=*)", key));
        let reversed = Predicate::new(format!("(*={})", key));
        prop_assert_eq!(forward.matches(Some(&target)).unwrap(), present);
        prop_assert_eq!(reversed.matches(Some(&target)).unwrap(), present);
    }

    /// Comparisons against integer fields agree with integer comparison.
    #[test]
    fn prop_comparisons_follow_integers(
        key in "[a-z]{1,8}",
        have in -100..=100i32,
        want in -100..=100i32,
    ) {
        let target = object(&[(key.as_str(), json!(have))]);
        let gt = Predicate::new(format!("({}>{})", key, want));
        let lt = Predicate::new(format!("({}<{})", key, want));
        let eq = Predicate::new(format!("({}={})", key, want));
        prop_assert_eq!(gt.matches(Some(&target)).unwrap(), have > want);
        prop_assert_eq!(lt.matches(Some(&target)).unwrap(), have < want);
        prop_assert_eq!(eq.matches(Some(&target)).unwrap(), have == want);
    }

    /// A memoized predicate returns the same outcome on every evaluation.
    #[test]
    fn prop_eval_is_deterministic(key in "[a-z]{1,8}", value in -100..=100i32) {
        let target = object(&[(key.as_str(), json!(value))]);
        let predicate = Predicate::new(format!("({}>0)", key));
        let first = predicate.matches(Some(&target)).unwrap();
        let second = predicate.matches(Some(&target)).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Unbalanced parentheses always fail to tokenize.
    #[test]
    fn prop_unbalanced_expressions_error(word in "[a-z]{1,8}") {
        prop_assert!(tokenize(&format!("({}", word)).is_err(), "unbalanced open paren should error");
        prop_assert!(tokenize(&format!("{})", word)).is_err(), "unbalanced close paren should error");
    }

    /// The global cache agrees with a fresh predicate.
    #[test]
    fn prop_cache_agrees_with_predicate(key in "[a-z]{1,8}", value in -100..=100i32) {
        let target = object(&[(key.as_str(), json!(value))]);
        let expression = format!("({}={})", key, value);
        let direct = Predicate::new(expression.clone()).matches(Some(&target)).unwrap();
        let cached = cache::check(&expression, Some(&target)).unwrap();
        prop_assert_eq!(direct, cached);
    }

    /// A dotted leaf resolves fully or falls back to its literal whole.
    #[test]
    fn prop_dotted_path_full_or_fallback(
        outer in "[a-z]{1,8}",
        inner in "[a-z]{1,8}",
        leaf in "[a-z]{1,8}",
        value in -100..=100i32,
    ) {
        let path = format!("{}.{}.{}", outer, inner, leaf);
        let tree = parse(tokenize(&path).unwrap());

        let full = object(&[(
            outer.as_str(),
            object(&[(inner.as_str(), object(&[(leaf.as_str(), json!(value))]))]),
        )]);
        prop_assert_eq!(eval(&tree, Some(&full)).to_value(), json!(value));

        let partial = object(&[(outer.as_str(), object(&[(inner.as_str(), json!({}))]))]);
        prop_assert_eq!(eval(&tree, Some(&partial)).to_value(), json!(path));
    }
}
