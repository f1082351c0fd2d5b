//! Tree data structure produced by [`super::TreeBuilder`].

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::distinct::Mapping;

/// Key under which a node's terminal value is rendered in JSON.
pub const LEAF_KEY: &str = "_value";

/// Position inside a [`Tree`].
///
/// The terminal value of a path lives under [`Slot::Value`], which sorts
/// before every segment. A child segment that happens to be spelt `_value`
/// is a distinct [`Slot::Segment`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    /// The terminal value of the enclosing path.
    Value,
    /// A named child.
    Segment(String),
}

impl Slot {
    /// Key used for this slot in JSON renderings.
    #[must_use]
    pub fn as_key(&self) -> &str {
        match self {
            Self::Value => LEAF_KEY,
            Self::Segment(name) => name,
        }
    }
}

/// Content of a [`Slot`].
///
/// [`Node::Leaf`] only ever appears under [`Slot::Value`] and
/// [`Node::Branch`] only under [`Slot::Segment`].
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// A terminal value.
    Leaf(Value),
    /// A nested subtree.
    Branch(Tree),
}

impl Node {
    fn to_json(&self) -> Value {
        match self {
            Self::Leaf(value) => value.clone(),
            Self::Branch(tree) => tree.to_json(),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(value) => value.serialize(serializer),
            Self::Branch(tree) => tree.serialize(serializer),
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Leaf(value) => value,
            Node::Branch(tree) => tree.into(),
        }
    }
}

/// Nested mapping rebuilt from a flat table.
///
/// Children iterate in lexicographic segment order.
///
/// # Examples
///
/// ```rust
/// use entity_tree::Tree;
/// use serde_json::json;
///
/// let tree = Tree::from_path(["db", "host"], json!("localhost"));
/// assert_eq!(tree.lookup(&["db", "host"]), Some(&json!("localhost")));
/// assert_eq!(tree.to_json(), json!({"db": {"host": {"_value": "localhost"}}}));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tree {
    nodes: BTreeMap<Slot, Node>,
}

impl Tree {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
        }
    }

    /// Create a tree holding only a terminal value.
    #[must_use]
    pub fn leaf(value: impl Into<Value>) -> Self {
        let mut tree = Self::new();
        tree.set_value(value);
        tree
    }

    /// Create a single-branch tree with `value` at the end of `segments`.
    ///
    /// Each segment wraps the next; an empty path yields [`Tree::leaf`].
    #[must_use]
    pub fn from_path<I, S>(segments: I, value: impl Into<Value>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        segments
            .into_iter()
            .rev()
            .fold(Self::leaf(value), |inner, segment| {
                let mut outer = Self::new();
                outer.insert_child(segment, inner);
                outer
            })
    }

    /// Terminal value stored at this level.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self.nodes.get(&Slot::Value) {
            Some(Node::Leaf(value)) => Some(value),
            _ => None,
        }
    }

    /// Replace the terminal value, returning the previous one.
    pub fn set_value(&mut self, value: impl Into<Value>) -> Option<Value> {
        match self.nodes.insert(Slot::Value, Node::Leaf(value.into())) {
            Some(Node::Leaf(previous)) => Some(previous),
            _ => None,
        }
    }

    /// Child subtree named `segment`.
    #[must_use]
    pub fn child(&self, segment: &str) -> Option<&Self> {
        match self.nodes.get(&Slot::Segment(segment.to_owned())) {
            Some(Node::Branch(tree)) => Some(tree),
            _ => None,
        }
    }

    /// Insert `child` under `segment`, returning the subtree it replaced.
    pub fn insert_child(&mut self, segment: impl Into<String>, child: Self) -> Option<Self> {
        match self
            .nodes
            .insert(Slot::Segment(segment.into()), Node::Branch(child))
        {
            Some(Node::Branch(previous)) => Some(previous),
            _ => None,
        }
    }

    /// Subtree reached by following `segments` from this level.
    #[must_use]
    pub fn path(&self, segments: &[&str]) -> Option<&Self> {
        segments
            .iter()
            .try_fold(self, |tree, segment| tree.child(segment))
    }

    /// Terminal value at the end of `segments`.
    #[must_use]
    pub fn lookup(&self, segments: &[&str]) -> Option<&Value> {
        self.path(segments).and_then(Self::value)
    }

    /// Iterate over every slot and its node.
    pub fn iter(&self) -> impl Iterator<Item = (&Slot, &Node)> {
        self.nodes.iter()
    }

    /// Iterate over named children.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Self)> {
        self.nodes.iter().filter_map(|(slot, node)| match (slot, node) {
            (Slot::Segment(name), Node::Branch(tree)) => Some((name.as_str(), tree)),
            _ => None,
        })
    }

    /// Number of occupied slots, counting the terminal value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds neither a value nor children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Render the tree as JSON, writing terminal values under [`LEAF_KEY`].
    ///
    /// A child segment literally named `_value` shares that key with the
    /// terminal value in this rendering; the child is written last and wins.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .nodes
            .iter()
            .map(|(slot, node)| (slot.as_key().to_owned(), node.to_json()))
            .collect();
        Value::Object(map)
    }
}

impl From<Tree> for Value {
    fn from(tree: Tree) -> Self {
        let map: Map<String, Self> = tree
            .nodes
            .into_iter()
            .map(|(slot, node)| {
                let key = match slot {
                    Slot::Value => LEAF_KEY.to_owned(),
                    Slot::Segment(name) => name,
                };
                (key, node.into())
            })
            .collect();
        Self::Object(map)
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.nodes.len()))?;
        for (slot, node) in &self.nodes {
            map.serialize_entry(slot.as_key(), node)?;
        }
        map.end()
    }
}

impl Mapping for Tree {
    type Key = Slot;
    type Node = Node;

    fn node_mut(&mut self, key: &Self::Key) -> Option<&mut Self::Node> {
        self.nodes.get_mut(key)
    }

    fn insert_node(&mut self, key: Self::Key, node: Self::Node) {
        self.nodes.insert(key, node);
    }

    fn into_nodes(self) -> impl Iterator<Item = (Self::Key, Self::Node)> {
        self.nodes.into_iter()
    }

    fn as_mapping_mut(node: &mut Self::Node) -> Option<&mut Self> {
        match node {
            Node::Branch(tree) => Some(tree),
            Node::Leaf(_) => None,
        }
    }

    fn from_node(node: Self::Node) -> Result<Self, Self::Node> {
        match node {
            Node::Branch(tree) => Ok(tree),
            leaf @ Node::Leaf(_) => Err(leaf),
        }
    }

    fn into_node(self) -> Self::Node {
        Node::Branch(self)
    }
}
