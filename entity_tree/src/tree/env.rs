//! Process environment as a flat table.
//!
//! Wraps `figment::providers::Env` so a set of prefixed variables such as
//! `APP_DB_HOST` and `APP_DB_PORT` can be fed to [`TreeBuilder`] and rebuilt
//! into `{db: {host, port}}`.

use figment::providers::Env;
use serde_json::Value;
use uncased::UncasedStr;

use super::{Tree, TreeBuilder};

/// Flat table sourced from environment variables sharing a prefix.
///
/// # Examples
///
/// ```rust
/// use entity_tree::EnvTable;
/// use serde_json::json;
///
/// figment::Jail::expect_with(|jail| {
///     jail.set_env("APP_DB_HOST", "localhost");
///     let tree = EnvTable::new("APP_").tree('_');
///     assert_eq!(tree.lookup(&["DB", "HOST"]), Some(&json!("localhost")));
///     Ok(())
/// });
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvTable {
    prefix: String,
    lowercase: bool,
}

impl EnvTable {
    /// Select variables whose names start with `prefix`, case-sensitively.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            lowercase: false,
        }
    }

    /// Whether to lowercase variable names before emitting them.
    #[must_use]
    pub const fn lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Prefix selecting the variables.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn provider(&self) -> Env {
        let prefix = self.prefix.clone();
        Env::raw()
            .filter(move |key: &UncasedStr| key.as_str().starts_with(prefix.as_str()))
            .lowercase(self.lowercase)
    }

    /// Matching variables as `(name, value)` pairs sorted by name.
    ///
    /// Names keep their prefix; values are strings.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, Value)> {
        let mut entries: Vec<(String, Value)> = self
            .provider()
            .iter()
            .map(|(key, value)| (key.as_str().to_owned(), Value::String(value)))
            .collect();
        entries.sort_by(|(left, _), (right, _)| left.cmp(right));
        entries
    }

    /// Rebuild the matching variables into a tree split on `separator`.
    ///
    /// The prefix is stripped from every name before splitting.
    #[must_use]
    pub fn tree(&self, separator: char) -> Tree {
        let prefix = if self.lowercase {
            self.prefix.to_lowercase()
        } else {
            self.prefix.clone()
        };
        TreeBuilder::new(separator)
            .with_prefix(prefix)
            .build(self.entries())
    }
}
