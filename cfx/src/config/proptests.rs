//! Property-based tests for identifiers, expansion and merging.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use proptest::prelude::*;
use serde_yaml::{Mapping, Value};

use super::expand::expand_variables;
use super::merger::ConfigMerger;
use crate::identifier::{EnvId, EnvKeyPrefix};

// Exhaustive runs are opt-in via the `property-tests` feature
const CASES: u32 = if cfg!(feature = "property-tests") { 10_000 } else { 256 };

// Flat mappings of short keys to integer leaves
fn flat_mapping() -> impl Strategy<Value = BTreeMap<String, i64>> {
    prop::collection::btree_map("[a-e]{1,2}", any::<i64>(), 0..8)
}

// Mappings nested up to three levels, leaves are integers or strings
fn nested_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop::collection::btree_map("[a-d]", inner, 1..4).prop_map(|entries| {
            Value::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (Value::from(k), v))
                    .collect(),
            )
        })
    })
}

fn to_value(map: &BTreeMap<String, i64>) -> Value {
    Value::Mapping(
        map.iter()
            .map(|(k, v)| (Value::from(k.as_str()), Value::from(*v)))
            .collect::<Mapping>(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: CASES,
        .. ProptestConfig::default()
    })]

    // Every key of the later layer keeps the later value; other keys survive
    #[test]
    fn merge_later_layer_wins(low in flat_mapping(), high in flat_mapping()) {
        let merged = ConfigMerger::merge(vec![to_value(&low), to_value(&high)]).unwrap();
        let merged = merged.as_mapping().unwrap();

        for (key, value) in &high {
            prop_assert_eq!(merged.get(key.as_str()), Some(&Value::from(*value)));
        }
        for (key, value) in &low {
            if !high.contains_key(key) {
                prop_assert_eq!(merged.get(key.as_str()), Some(&Value::from(*value)));
            }
        }
        let distinct: BTreeSet<_> = low.keys().chain(high.keys()).collect();
        prop_assert_eq!(merged.len(), distinct.len());
    }

    // Merging a document with itself changes nothing
    #[test]
    fn merge_is_idempotent(doc in nested_value()) {
        let merged = ConfigMerger::merge(vec![doc.clone(), doc.clone()]).unwrap();
        prop_assert_eq!(merged, doc);
    }

    // An empty mapping is a neutral layer on either side
    #[test]
    fn merge_with_empty_mapping_is_identity(map in flat_mapping()) {
        let doc = to_value(&map);
        let empty = Value::Mapping(Mapping::new());

        prop_assert_eq!(ConfigMerger::merge(vec![empty.clone(), doc.clone()]).unwrap(), doc.clone());
        prop_assert_eq!(ConfigMerger::merge(vec![doc.clone(), empty]).unwrap(), doc);
    }

    // Text without `$` passes through expansion untouched
    #[test]
    fn expansion_without_references_is_identity(text in "[^$]{0,200}") {
        let vars: HashMap<String, String> = HashMap::new();
        prop_assert_eq!(expand_variables(&text, &vars).unwrap(), text);
    }

    // `${NAME:default}` always yields the default when NAME is unset
    #[test]
    fn expansion_falls_back_to_default(name in "[A-Z][A-Z0-9_]{0,15}", default in "[a-z0-9./-]{0,20}") {
        let vars: HashMap<String, String> = HashMap::new();
        let input = format!("value: ${{{name}:{default}}}");
        prop_assert_eq!(expand_variables(&input, &vars).unwrap(), format!("value: {default}"));
    }

    #[test]
    fn env_id_accepts_lowercase_alphanumerics(value in "[a-z0-9]{2,64}") {
        let id = EnvId::parse(&value).unwrap();
        prop_assert_eq!(id.as_str(), value.as_str());
    }

    #[test]
    fn env_id_rejects_uppercase(prefix in "[a-z0-9]{0,10}", upper in "[A-Z]", suffix in "[a-z0-9]{0,10}") {
        let value = format!("{prefix}{upper}{suffix}");
        prop_assert!(EnvId::parse(&value).is_err());
    }

    #[test]
    fn env_id_rejects_overlong(value in "[a-z0-9]{65,80}") {
        prop_assert!(EnvId::parse(&value).is_err());
    }

    #[test]
    fn prefix_accepts_valid_shapes(value in "[A-Z0-9][A-Z0-9_]{0,62}[A-Z0-9]") {
        let prefix = EnvKeyPrefix::parse(&value).unwrap();
        prop_assert_eq!(prefix.key("REGION"), format!("{value}_REGION"));
    }

    #[test]
    fn prefix_rejects_underscore_boundaries(body in "[A-Z0-9]{1,20}") {
        let leading = format!("_{body}");
        let trailing = format!("{body}_");
        prop_assert!(EnvKeyPrefix::parse(&leading).is_err());
        prop_assert!(EnvKeyPrefix::parse(&trailing).is_err());
    }
}
