//! Flattening rendered trees back into flat tables.
//!
//! Works on the JSON rendering of a tree, where terminal values sit under
//! [`LEAF_KEY`], so the helpers stay independent of the tree type itself.
//!
//! # Examples
//!
//! ```
//! use entity_tree_test_helpers::tree::flatten;
//! use serde_json::json;
//!
//! let rendered = json!({"db": {"host": {"_value": "localhost"}}});
//! assert_eq!(
//!     flatten(&rendered, '.', Some("cfg")),
//!     vec![("cfg.db.host".to_owned(), json!("localhost"))],
//! );
//! ```

use serde_json::Value;

/// Key marking a terminal value in rendered trees.
pub const LEAF_KEY: &str = "_value";

/// Flatten `rendered` into `(key, value)` pairs.
///
/// Keys join the path segments with `separator`, preceded by `prefix` and a
/// separator when a prefix is given. Entries appear in depth-first order.
/// Values that are neither objects nor under [`LEAF_KEY`] are ignored.
#[must_use]
pub fn flatten(rendered: &Value, separator: char, prefix: Option<&str>) -> Vec<(String, Value)> {
    let glue = separator.to_string();
    let mut table = Vec::new();
    let mut path = Vec::new();
    walk(rendered, &mut path, &mut |segments, value| {
        let joined = segments.join(glue.as_str());
        let key = match prefix {
            Some(head) => format!("{head}{separator}{joined}"),
            None => joined,
        };
        table.push((key, value.clone()));
    });
    table
}

fn walk<'v, F>(node: &'v Value, path: &mut Vec<&'v str>, emit: &mut F)
where
    F: FnMut(&[&str], &Value),
{
    let Value::Object(map) = node else {
        return;
    };
    for (key, child) in map {
        if key == LEAF_KEY {
            emit(path, child);
        } else {
            path.push(key);
            walk(child, path, emit);
            path.pop();
        }
    }
}
