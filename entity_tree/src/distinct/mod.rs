//! Distinct recursive merging of nested mappings.
//!
//! A naive deep merge that concatenates on conflict will, given `{a: {x: 1}}`
//! and `{a: 5}`, produce something like `{a: [{x: 1}, 5]}`. The distinct merge
//! never does that: when both sides of a key hold mappings it recurses,
//! otherwise the overlay's node replaces whatever the base held.
//!
//! The algorithm is written once over the [`Mapping`] trait and used for both
//! JSON objects and [`crate::Tree`].
//!
//! # Examples
//!
//! ```rust
//! use entity_tree::merge_distinct;
//! use serde_json::{json, Map, Value};
//!
//! let as_map = |v: Value| -> Map<String, Value> {
//!     v.as_object().cloned().unwrap_or_default()
//! };
//! let base = as_map(json!({"a": {"x": 1}, "b": {"y": 2}}));
//! let overlay = as_map(json!({"a": 5, "b": {"z": 3}}));
//!
//! let merged = merge_distinct(&base, &overlay);
//! assert_eq!(Value::Object(merged), json!({"a": 5, "b": {"y": 2, "z": 3}}));
//! ```

use serde_json::{Map, Value};

/// A mapping whose nodes may themselves be mappings of the same type.
///
/// Implementors describe how to reach nested mappings inside their nodes so
/// the distinct merge can recurse without knowing the concrete node type.
pub trait Mapping: Sized {
    /// Key type of the mapping.
    type Key;
    /// Node stored under each key; may or may not hold a nested mapping.
    type Node;

    /// Mutable access to the node stored under `key`.
    fn node_mut(&mut self, key: &Self::Key) -> Option<&mut Self::Node>;

    /// Store `node` under `key`, replacing any previous node.
    fn insert_node(&mut self, key: Self::Key, node: Self::Node);

    /// Consume the mapping, yielding its entries.
    fn into_nodes(self) -> impl Iterator<Item = (Self::Key, Self::Node)>;

    /// Borrow the nested mapping held by `node`, if any.
    fn as_mapping_mut(node: &mut Self::Node) -> Option<&mut Self>;

    /// Take the nested mapping out of `node`, handing the node back otherwise.
    ///
    /// # Errors
    ///
    /// Returns the untouched node when it does not hold a mapping.
    fn from_node(node: Self::Node) -> Result<Self, Self::Node>;

    /// Wrap the mapping as a node.
    fn into_node(self) -> Self::Node;
}

/// Merge `overlay` over `base`, returning a new mapping.
///
/// Neither input is modified. Keys present in both are merged recursively when
/// both nodes hold mappings; otherwise the overlay's node wins, including when
/// it replaces a mapping with a scalar or the other way round.
#[must_use]
pub fn merge_distinct<M>(base: &M, overlay: &M) -> M
where
    M: Mapping + Clone,
{
    let mut merged = base.clone();
    merge_distinct_into(&mut merged, overlay.clone());
    merged
}

/// Merge `overlay` over `target` in place.
///
/// After the call `target` equals `merge_distinct(&old_target, &overlay)`.
pub fn merge_distinct_into<M: Mapping>(target: &mut M, overlay: M) {
    for (key, incoming) in overlay.into_nodes() {
        match target.node_mut(&key) {
            Some(existing) => overlay_node::<M>(existing, incoming),
            None => target.insert_node(key, incoming),
        }
    }
}

/// Merge `base` underneath `target` in place.
///
/// After the call `target` equals `merge_distinct(&base, &old_target)`: the
/// existing contents of `target` take precedence and `base` only fills in
/// what is missing. This avoids cloning a large accumulated `target` when
/// folding many small mappings into it. Insertion order of keys may differ
/// from the cloning variant; the contents do not.
pub fn merge_distinct_beneath<M: Mapping>(target: &mut M, base: M) {
    for (key, underneath) in base.into_nodes() {
        match target.node_mut(&key) {
            Some(existing) => {
                if let Some(existing_map) = M::as_mapping_mut(existing)
                    && let Ok(base_map) = M::from_node(underneath)
                {
                    merge_distinct_beneath(existing_map, base_map);
                }
            }
            None => target.insert_node(key, underneath),
        }
    }
}

/// Merge two JSON values with distinct semantics.
///
/// Two objects merge recursively; any other combination yields a copy of
/// `overlay`.
///
/// # Examples
///
/// ```rust
/// use entity_tree::merge_distinct_values;
/// use serde_json::json;
///
/// let merged = merge_distinct_values(&json!({"a": {"x": 1}}), &json!({"a": 5}));
/// assert_eq!(merged, json!({"a": 5}));
/// ```
#[must_use]
pub fn merge_distinct_values(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            Value::Object(merge_distinct(base_map, overlay_map))
        }
        _ => overlay.clone(),
    }
}

fn overlay_node<M: Mapping>(existing: &mut M::Node, incoming: M::Node) {
    let replacement = match M::from_node(incoming) {
        Ok(incoming_map) => {
            if let Some(existing_map) = M::as_mapping_mut(existing) {
                merge_distinct_into(existing_map, incoming_map);
                return;
            }
            incoming_map.into_node()
        }
        Err(node) => node,
    };
    *existing = replacement;
}

impl Mapping for Map<String, Value> {
    type Key = String;
    type Node = Value;

    fn node_mut(&mut self, key: &Self::Key) -> Option<&mut Self::Node> {
        self.get_mut(key)
    }

    fn insert_node(&mut self, key: Self::Key, node: Self::Node) {
        self.insert(key, node);
    }

    fn into_nodes(self) -> impl Iterator<Item = (Self::Key, Self::Node)> {
        self.into_iter()
    }

    fn as_mapping_mut(node: &mut Self::Node) -> Option<&mut Self> {
        node.as_object_mut()
    }

    fn from_node(node: Self::Node) -> Result<Self, Self::Node> {
        match node {
            Value::Object(map) => Ok(map),
            other => Err(other),
        }
    }

    fn into_node(self) -> Self::Node {
        Value::Object(self)
    }
}
