//! `proptest` strategies for trees and JSON mappings.

use proptest::collection::btree_map;
use proptest::option;
use proptest::prelude::*;
use serde_json::{Map, Value};

use crate::tree::LEAF_KEY;

/// Path segment that never contains `.`, `_` or the leaf key.
pub fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,5}"
}

fn leaf_value() -> impl Strategy<Value = Value> {
    "[a-z0-9]{0,4}".prop_map(Value::String)
}

/// One rendered tree node: an optional leaf plus at least one child, or a
/// bare leaf.
fn node() -> impl Strategy<Value = Value> {
    let leaf = leaf_value().prop_map(|value| {
        let mut map = Map::new();
        map.insert(LEAF_KEY.to_owned(), value);
        Value::Object(map)
    });
    leaf.prop_recursive(3, 32, 4, |inner| {
        (option::of(leaf_value()), btree_map(segment(), inner, 1..4)).prop_map(
            |(value, children)| {
                let mut map = Map::new();
                if let Some(leaf) = value {
                    map.insert(LEAF_KEY.to_owned(), leaf);
                }
                map.extend(children);
                Value::Object(map)
            },
        )
    })
}

/// Rendered tree as produced by building a flat table with segments from
/// [`segment`].
///
/// The root carries no leaf and no branch is empty, so every generated tree
/// can be reproduced from its flattened form.
pub fn rendered_tree() -> impl Strategy<Value = Value> {
    btree_map(segment(), node(), 1..5)
        .prop_map(|children| Value::Object(children.into_iter().collect()))
}

/// Arbitrary JSON object nesting scalars and further objects.
pub fn json_object() -> impl Strategy<Value = Map<String, Value>> {
    let scalar = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::from),
        "[a-z]{0,3}".prop_map(Value::String),
    ];
    let value = scalar.prop_recursive(3, 24, 4, |inner| {
        btree_map("[a-c]", inner, 0..4)
            .prop_map(|entries| Value::Object(entries.into_iter().collect()))
    });
    btree_map("[a-c]", value, 0..4).prop_map(|entries| entries.into_iter().collect())
}
