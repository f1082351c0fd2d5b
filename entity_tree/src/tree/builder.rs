//! Folding flat tables into [`Tree`]s.

use serde_json::Value;
use tracing::trace;

use super::Tree;
use crate::distinct::{merge_distinct_beneath, merge_distinct_into};

/// Which entry wins when two table keys resolve to the same leaf.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Precedence {
    /// The first entry in table order keeps its value.
    ///
    /// Each new single-path tree is merged underneath the accumulated result,
    /// so already-placed leaves survive later duplicates.
    #[default]
    Earliest,
    /// Later entries overwrite earlier ones.
    Latest,
}

/// Builds [`Tree`]s from flat tables whose keys encode paths.
///
/// # Examples
///
/// ```rust
/// use entity_tree::TreeBuilder;
/// use serde_json::json;
///
/// let tree = TreeBuilder::new('.').with_prefix("cfg").build([
///     ("cfg.db.host", "localhost"),
///     ("cfg.db.port", "5432"),
///     ("cfg.cache", "redis"),
/// ]);
/// assert_eq!(
///     tree.to_json(),
///     json!({
///         "db": {"host": {"_value": "localhost"}, "port": {"_value": "5432"}},
///         "cache": {"_value": "redis"},
///     }),
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeBuilder {
    separator: char,
    prefix: Option<String>,
    precedence: Precedence,
}

impl TreeBuilder {
    /// Create a builder splitting keys on `separator`, without a prefix.
    #[must_use]
    pub const fn new(separator: char) -> Self {
        Self {
            separator,
            prefix: None,
            precedence: Precedence::Earliest,
        }
    }

    /// Strip `prefix` from keys that start with it.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Choose which of several colliding entries survives.
    #[must_use]
    pub const fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }

    /// Separator between path segments.
    #[must_use]
    pub const fn separator(&self) -> char {
        self.separator
    }

    /// Prefix stripped from matching keys.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Configured collision precedence.
    #[must_use]
    pub const fn precedence(&self) -> Precedence {
        self.precedence
    }

    /// Split `key` into path segments.
    ///
    /// The prefix is removed when `key` starts with it, then any leading
    /// separators. A key that is empty after stripping yields one empty
    /// segment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entity_tree::TreeBuilder;
    ///
    /// let builder = TreeBuilder::new('_').with_prefix("APP");
    /// assert_eq!(builder.segments("APP_DB_HOST").collect::<Vec<_>>(), ["DB", "HOST"]);
    /// assert_eq!(builder.segments("OTHER").collect::<Vec<_>>(), ["OTHER"]);
    /// ```
    pub fn segments<'k>(&self, key: &'k str) -> std::str::Split<'k, char> {
        let unprefixed = self
            .prefix
            .as_deref()
            .and_then(|prefix| key.strip_prefix(prefix))
            .unwrap_or(key);
        unprefixed
            .trim_start_matches(self.separator)
            .split(self.separator)
    }

    /// Fold `table` into a tree, visiting entries in iteration order.
    pub fn build<I, K, V>(&self, table: I) -> Tree
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut tree = Tree::new();
        for (entry_key, value) in table {
            let key = entry_key.as_ref();
            let branch = Tree::from_path(self.segments(key), value);
            trace!(key, precedence = ?self.precedence, "folding flat table entry");
            match self.precedence {
                Precedence::Earliest => merge_distinct_beneath(&mut tree, branch),
                Precedence::Latest => merge_distinct_into(&mut tree, branch),
            }
        }
        tree
    }
}

/// Build a tree from `table` with default precedence.
///
/// Shorthand for `TreeBuilder::new(separator)` with an optional prefix.
pub fn build_tree<I, K, V>(table: I, separator: char, prefix: Option<&str>) -> Tree
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<Value>,
{
    let plain = TreeBuilder::new(separator);
    let builder = match prefix {
        Some(stripped) => plain.with_prefix(stripped),
        None => plain,
    };
    builder.build(table)
}
