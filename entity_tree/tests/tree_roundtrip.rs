//! Property tests for tree reconstruction and the distinct merge.

use anyhow::{Context, Result, ensure};
use entity_tree::{
    Precedence, TreeBuilder, build_tree, merge_distinct, merge_distinct_beneath,
    merge_distinct_into,
};
use proptest::prelude::*;
use serde_json::{Map, Value, json};
use test_helpers::strategies::{json_object, rendered_tree};
use test_helpers::tree::flatten;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    /// Flattening a tree and building it again yields the same tree.
    #[test]
    fn flattened_tree_rebuilds(rendered in rendered_tree()) {
        let table = flatten(&rendered, '.', Some("cfg"));
        let tree = build_tree(table, '.', Some("cfg"));
        prop_assert_eq!(tree.to_json(), rendered);
    }

    /// Without duplicate keys, precedence cannot change the outcome.
    #[test]
    fn precedence_is_irrelevant_for_unique_keys(rendered in rendered_tree()) {
        let table = flatten(&rendered, '/', None);
        let earliest = TreeBuilder::new('/').build(table.clone());
        let latest = TreeBuilder::new('/')
            .with_precedence(Precedence::Latest)
            .build(table);
        prop_assert_eq!(earliest, latest);
    }

    #[test]
    fn empty_overlay_is_identity(base in json_object()) {
        prop_assert_eq!(merge_distinct(&base, &Map::new()), base.clone());
        prop_assert_eq!(merge_distinct(&Map::new(), &base), base);
    }

    #[test]
    fn merge_with_self_is_identity(base in json_object()) {
        prop_assert_eq!(merge_distinct(&base, &base), base);
    }

    /// Laying a base beneath a target is the merge with the roles swapped.
    #[test]
    fn beneath_mirrors_merge(base in json_object(), overlay in json_object()) {
        let mut target = overlay.clone();
        merge_distinct_beneath(&mut target, base.clone());
        prop_assert_eq!(target, merge_distinct(&base, &overlay));
    }

    #[test]
    fn into_matches_merge(base in json_object(), overlay in json_object()) {
        let mut target = base.clone();
        merge_distinct_into(&mut target, overlay.clone());
        prop_assert_eq!(target, merge_distinct(&base, &overlay));
    }

    /// Every overlay key ends up in the result, never wrapped in a list.
    #[test]
    fn overlay_keys_survive(base in json_object(), overlay in json_object()) {
        let merged = merge_distinct(&base, &overlay);
        for (key, value) in &overlay {
            let found = merged.get(key);
            prop_assert!(found.is_some(), "missing key {}", key);
            if !value.is_object() {
                prop_assert_eq!(found, Some(value));
            }
        }
        prop_assert!(merged.values().all(|value| !value.is_array()));
    }
}

#[test]
fn object_overlay_replaces_scalar_base() -> Result<()> {
    let base = json!({"a": 1}).as_object().cloned().context("base")?;
    let overlay = json!({"a": {"b": 2}})
        .as_object()
        .cloned()
        .context("overlay")?;
    let merged = Value::Object(merge_distinct(&base, &overlay));
    ensure!(merged == json!({"a": {"b": 2}}), "unexpected merge {merged}");
    Ok(())
}
