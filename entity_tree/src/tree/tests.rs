//! Unit tests for tree construction and rendering.

use anyhow::{Context, Result, ensure};
use rstest::rstest;
use serde_json::{Value, json};

use super::{LEAF_KEY, Node, Precedence, Slot, Tree, TreeBuilder, build_tree};

#[test]
fn rebuilds_prefixed_table() {
    let tree = build_tree(
        [
            ("cfg.db.host", "localhost"),
            ("cfg.db.port", "5432"),
            ("cfg.cache", "redis"),
        ],
        '.',
        Some("cfg"),
    );
    assert_eq!(
        tree.to_json(),
        json!({
            "db": {"host": {"_value": "localhost"}, "port": {"_value": "5432"}},
            "cache": {"_value": "redis"},
        })
    );
    assert_eq!(tree.lookup(&["db", "port"]), Some(&json!("5432")));
}

#[test]
fn single_segment_holds_leaf_directly() {
    let tree = build_tree([("name", "x")], '.', None);
    assert_eq!(tree.to_json(), json!({"name": {"_value": "x"}}));
    assert_eq!(tree.child("name").and_then(Tree::value), Some(&json!("x")));
}

#[rstest]
#[case::bare("")]
#[case::only_separators("...")]
#[case::only_prefix("cfg")]
fn empty_key_yields_empty_segment(#[case] key: &str) {
    let tree = build_tree([(key, 1)], '.', Some("cfg"));
    assert_eq!(tree.lookup(&[""]), Some(&json!(1)));
    assert_eq!(tree.len(), 1);
}

#[test]
fn non_matching_prefix_keeps_key() {
    let tree = build_tree([("other.key", true)], '.', Some("cfg"));
    assert_eq!(tree.lookup(&["other", "key"]), Some(&json!(true)));
}

#[test]
fn leading_separators_are_stripped() {
    let builder = TreeBuilder::new('_').with_prefix("APP");
    assert_eq!(
        builder.segments("APP__DB_HOST").collect::<Vec<_>>(),
        ["DB", "HOST"]
    );
    assert_eq!(builder.segments("__X").collect::<Vec<_>>(), ["X"]);
}

#[rstest]
#[case::earliest(Precedence::Earliest, "first")]
#[case::latest(Precedence::Latest, "second")]
fn duplicate_leaves_follow_precedence(#[case] precedence: Precedence, #[case] expected: &str) {
    let tree = TreeBuilder::new('.')
        .with_precedence(precedence)
        .build([("a.b", "first"), (".a.b", "second")]);
    assert_eq!(tree.lookup(&["a", "b"]), Some(&json!(expected)));
}

#[test]
fn default_precedence_is_earliest() {
    assert_eq!(TreeBuilder::new('.').precedence(), Precedence::Earliest);
}

#[test]
fn leaf_and_branch_coexist() -> Result<()> {
    let tree = build_tree([("db", "primary"), ("db.host", "localhost")], '.', None);
    let db = tree.child("db").context("expected db branch")?;
    ensure!(db.value() == Some(&json!("primary")), "leaf lost: {db:?}");
    ensure!(
        db.lookup(&["host"]) == Some(&json!("localhost")),
        "child lost: {db:?}"
    );
    ensure!(
        tree.to_json() == json!({"db": {"_value": "primary", "host": {"_value": "localhost"}}}),
        "unexpected rendering: {}",
        tree.to_json()
    );
    Ok(())
}

#[test]
fn segment_named_like_leaf_key_stays_distinct() -> Result<()> {
    let tree = build_tree([("a", 1), ("a._value", 2)], '.', None);
    let a = tree.child("a").context("expected a branch")?;
    assert_eq!(a.value(), Some(&json!(1)));
    assert_eq!(a.lookup(&[LEAF_KEY]), Some(&json!(2)));
    let slots: Vec<&Slot> = a.iter().map(|(slot, _)| slot).collect();
    assert_eq!(slots, [&Slot::Value, &Slot::Segment(LEAF_KEY.to_owned())]);
    Ok(())
}

#[test]
fn from_path_nests_segments() {
    let tree = Tree::from_path(["x", "y"], 3);
    let Some(Node::Branch(x)) = tree.iter().map(|(_, node)| node).next() else {
        panic!("expected a branch under x");
    };
    assert_eq!(x.lookup(&["y"]), Some(&json!(3)));
    assert_eq!(Tree::from_path(Vec::<String>::new(), 3), Tree::leaf(3));
}

#[test]
fn serialize_matches_to_json() -> Result<()> {
    let tree = build_tree([("a.b", "1"), ("a", "root"), ("c", "2")], '.', None);
    let serialised = serde_json::to_value(&tree).context("serialise tree")?;
    ensure!(serialised == tree.to_json(), "serialised form drifted");
    ensure!(
        Value::from(tree.clone()) == tree.to_json(),
        "owned conversion drifted"
    );
    Ok(())
}

#[test]
fn children_skip_the_leaf() -> Result<()> {
    let tree = build_tree([("a", 1), ("a.b", 2), ("a.c", 3)], '.', None);
    let a = tree.child("a").context("expected a branch")?;
    let names: Vec<&str> = a.children().map(|(name, _)| name).collect();
    assert_eq!(names, ["b", "c"]);
    assert_eq!(a.len(), 3);
    assert!(!a.is_empty());
    assert!(Tree::new().is_empty());
    Ok(())
}
