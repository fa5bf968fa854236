//! Property tests for the value matching engine.

use proptest::prelude::*;
use serde_json::{json, Value};
use vouch::{match_headers, match_value, ErrorKind, ExpectedValue, HeaderSet, MatchMode};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        max_global_rejects: 8192,
        ..ProptestConfig::default()
    }
}

/// Primitive JSON values of one of three kinds: 0 = string, 1 = number, 2 = bool.
fn arb_primitive() -> impl Strategy<Value = (u8, Value)> {
    prop_oneof![
        "[a-z]{0,8}".prop_map(|s| (0, Value::String(s))),
        any::<i32>().prop_map(|n| (1, json!(n))),
        (-1.0e6f64..1.0e6).prop_map(|n| (1, json!(n))),
        any::<bool>().prop_map(|b| (2, Value::Bool(b))),
    ]
}

fn arb_mode() -> impl Strategy<Value = MatchMode> {
    prop_oneof![Just(MatchMode::Exact), Just(MatchMode::Subset)]
}

/// Arbitrary JSON trees without nulls (null has no comparator).
fn arb_tree() -> impl Strategy<Value = Value> {
    let leaf = arb_primitive().prop_map(|(_, v)| v);
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn primitives_match_themselves((_, v) in arb_primitive()) {
        let errors = match_value("", &ExpectedValue::from(v.clone()), &v, MatchMode::Exact);
        prop_assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn trees_match_themselves_in_both_modes(tree in arb_tree(), mode in arb_mode()) {
        let errors = match_value("", &ExpectedValue::from(tree.clone()), &tree, mode);
        prop_assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn different_values_of_one_kind_give_one_wrong_value(
        (k1, v1) in arb_primitive(),
        (k2, v2) in arb_primitive(),
        mode in arb_mode(),
    ) {
        prop_assume!(k1 == k2);
        prop_assume!(v1.as_f64().zip(v2.as_f64()).map_or(v1 != v2, |(a, b)| a != b));

        let errors = match_value("", &ExpectedValue::from(v1), &v2, mode);
        prop_assert_eq!(errors.len(), 1);
        prop_assert_eq!(errors[0].kind, ErrorKind::WrongValue);
    }

    #[test]
    fn different_kinds_give_one_wrong_type(
        (k1, v1) in arb_primitive(),
        (k2, v2) in arb_primitive(),
        mode in arb_mode(),
    ) {
        prop_assume!(k1 != k2);

        let errors = match_value("", &ExpectedValue::from(v1), &v2, mode);
        prop_assert_eq!(errors.len(), 1);
        prop_assert_eq!(errors[0].kind, ErrorKind::WrongType);
    }

    #[test]
    fn integers_equal_their_float_form(n in -1_000_000i64..1_000_000) {
        let errors = match_value("", &ExpectedValue::from(n), &json!(n as f64), MatchMode::Exact);
        prop_assert!(errors.is_empty());
    }

    #[test]
    fn subset_accepts_any_extension(
        base in prop::collection::btree_map("[a-z]{1,4}", any::<i32>(), 0..5),
        extra in prop::collection::btree_map("[A-Z]{1,4}", any::<bool>(), 1..5),
        tail in prop::collection::vec(any::<i32>(), 1..4),
    ) {
        let expected = json!({"fields": base, "items": [1, 2]});
        let mut fields = serde_json::to_value(&base).unwrap();
        for (k, v) in &extra {
            fields[k] = json!(v);
        }
        let mut items = vec![json!(1), json!(2)];
        items.extend(tail.iter().map(|n| json!(n)));
        let actual = json!({"fields": fields, "items": items});

        let expected = ExpectedValue::from(expected);
        prop_assert!(match_value("", &expected, &actual, MatchMode::Subset).is_empty());

        let errors = match_value("", &expected, &actual, MatchMode::Exact);
        let kinds: Vec<ErrorKind> = errors.iter().map(|e| e.kind).collect();
        prop_assert_eq!(kinds, vec![ErrorKind::WrongFieldCount, ErrorKind::WrongElementCount]);
    }

    #[test]
    fn matching_never_mutates_inputs(tree in arb_tree(), other in arb_tree(), mode in arb_mode()) {
        let expected = ExpectedValue::from(tree.clone());
        let actual = other.clone();
        let _ = match_value("", &expected, &actual, mode);
        prop_assert_eq!(expected.to_json(), tree);
        prop_assert_eq!(actual, other);
    }

    #[test]
    fn headers_match_any_permutation(
        values in prop::collection::vec("[a-c]", 1..6),
        seed in any::<u64>(),
    ) {
        let mut shuffled = values.clone();
        let len = shuffled.len();
        shuffled.rotate_left((seed as usize) % len);

        let expected: HeaderSet = values.iter().map(|v| ("X-Tag", v.as_str())).collect();
        let actual: HeaderSet = shuffled.iter().map(|v| ("x-tag", v.as_str())).collect();
        prop_assert!(match_headers(&expected, &actual).is_empty());
    }
}
