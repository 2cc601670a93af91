//! Property-based tests for schema reads
//!
//! These tests verify that schemas behave consistently across a wide range
//! of generated inputs and never panic on arbitrary values.

use proptest::prelude::*;
use warrant_schema::{
    array, boolean, dictionary, fields, integer, literal, number, string, structure, unknown,
    Value,
};

/// Strategy for generating arbitrary values with controlled complexity
fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::from),
        (-1.0e6..1.0e6f64).prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
    ];

    leaf.prop_recursive(
        3,  // max depth
        20, // max size
        5,  // items per collection
        |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
                proptest::collection::btree_map("[a-z]{1,8}", inner, 0..5)
                    .prop_map(|entries| entries.into_iter().collect::<Value>()),
            ]
        },
    )
}

proptest! {
    #[test]
    fn prop_unknown_is_identity(input in value_strategy()) {
        prop_assert_eq!(unknown().read(&input).unwrap(), input);
    }

    #[test]
    fn prop_integer_accepts_whole_numbers(n in any::<i32>()) {
        prop_assert_eq!(integer().read(&Value::from(n)).unwrap(), Value::from(n));
    }

    #[test]
    fn prop_integer_rejects_fractions(n in -1.0e6..1.0e6f64) {
        prop_assume!(n.fract() != 0.0);
        prop_assert!(!integer().is(&Value::from(n)));
        prop_assert!(number().is(&Value::from(n)));
    }

    #[test]
    fn prop_bounds_agree_with_comparison(x in -1.0e3..1.0e3f64, bound in -1.0e3..1.0e3f64) {
        prop_assert_eq!(number().greater_than(bound).is(&Value::from(x)), x > bound);
        prop_assert_eq!(number().less_than(bound).is(&Value::from(x)), x < bound);
    }

    #[test]
    fn prop_prefix_agrees_with_str(prefix in "[ab]{0,3}", s in "[ab]{0,6}") {
        prop_assert_eq!(
            string().starts_with(prefix.clone()).is(&Value::from(s.as_str())),
            s.starts_with(&prefix)
        );
        prop_assert_eq!(
            string().ends_with(prefix.clone()).is(&Value::from(s.as_str())),
            s.ends_with(&prefix)
        );
    }

    #[test]
    fn prop_array_preserves_elements(items in proptest::collection::vec(any::<i32>(), 0..20)) {
        let input = Value::array(items.iter().copied());
        prop_assert_eq!(array(integer()).read(&input).unwrap(), input);
    }

    #[test]
    fn prop_optional_always_accepts_undefined(input in value_strategy()) {
        let schema = structure(fields! { "x" => integer() }).unwrap();
        prop_assert!(schema.optional().is(&Value::Undefined));
        prop_assert_eq!(schema.optional().is(&input), input.is_undefined() || schema.is(&input));
    }

    #[test]
    fn prop_union_acceptance_is_symmetric(input in value_strategy()) {
        let left = string().or(boolean());
        let right = boolean().or(string());
        prop_assert_eq!(left.is(&input), right.is(&input));
        prop_assert_eq!(left.is(&input), string().is(&input) || boolean().is(&input));
    }

    #[test]
    fn prop_intersection_is_conjunction(input in value_strategy()) {
        let schema = number().greater_than(0).and(integer());
        let expected = integer().is(&input) && number().greater_than(0).is(&input);
        prop_assert_eq!(schema.is(&input), expected);
    }

    #[test]
    fn prop_default_substitutes_only_missing(n in any::<i32>()) {
        let schema = integer().default(n).unwrap();
        prop_assert_eq!(schema.read(&Value::Undefined).unwrap(), Value::from(n));
        prop_assert_eq!(schema.read(&Value::from(7)).unwrap(), Value::from(7));
    }

    #[test]
    fn prop_read_never_panics(input in value_strategy()) {
        let schema = structure(fields! {
            "kind" => literal("a").or(literal("b")),
            "count" => integer().greater_than(0).optional(),
            "tags" => dictionary(string().array()).nullable(),
            "nested" => structure(fields! { "flag" => boolean() }).unwrap().optional(),
        })
        .unwrap();
        let _ = schema.read(&input);
        let _ = schema.create(Some(&input));
    }

    #[test]
    fn prop_accepted_struct_output_reads_back(
        kind in prop_oneof![Just("a"), Just("b")],
        count in proptest::option::of(1..1000i32),
    ) {
        let schema = structure(fields! {
            "kind" => literal("a").or(literal("b")),
            "count" => integer().default(1).unwrap(),
        })
        .unwrap();

        let mut input = vec![("kind", Value::from(kind))];
        if let Some(count) = count {
            input.push(("count", Value::from(count)));
        }
        let output = schema.read(&Value::from_iter(input)).unwrap();
        prop_assert_eq!(schema.read(&output).unwrap(), output.clone());
        prop_assert_eq!(output.get("count"), &Value::from(count.unwrap_or(1)));
    }

    #[test]
    fn prop_rendering_is_stable(bound in -100..100i32, prefix in "[a-z]{0,5}") {
        let build = || string().starts_with(prefix.clone()).or(number().greater_than(bound));
        prop_assert_eq!(build().to_string(), build().to_string());
    }
}
