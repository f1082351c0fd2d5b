//! Field failures collected by a merge that does not stop at the first one.

use std::fmt;
use std::sync::Arc;

use super::ModelError;

/// Failures gathered from one merge, in the order the fields were visited.
///
/// # Examples
///
/// ```
/// use entity_tree::ModelError;
/// let e = ModelError::try_aggregate(vec![
///     ModelError::missing_writer("Account", "name"),
///     ModelError::missing_reader("Account", "tags"),
/// ]);
/// if let Some(ModelError::Aggregate(agg)) = e {
///     assert_eq!(agg.fields().collect::<Vec<_>>(), ["name", "tags"]);
///     assert!(agg.for_field("tags").is_some());
/// }
/// ```
#[derive(Debug, Default)]
pub struct AggregatedErrors(Vec<Arc<ModelError>>);

impl AggregatedErrors {
    /// Wrap the failures of one merge.
    #[must_use]
    pub const fn new(errors: Vec<Arc<ModelError>>) -> Self {
        Self(errors)
    }

    /// Failures in visiting order.
    pub fn iter(&self) -> impl Iterator<Item = &ModelError> {
        self.0.iter().map(Arc::as_ref)
    }

    /// Number of failures.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing failed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names of the failing fields, skipping failures without a field.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.iter().filter_map(ModelError::field)
    }

    /// First failure recorded against `field`.
    #[must_use]
    pub fn for_field(&self, field: &str) -> Option<&ModelError> {
        self.iter().find(|err| err.field() == Some(field))
    }

    /// Take the failures out.
    #[must_use]
    pub fn into_errors(self) -> Vec<Arc<ModelError>> {
        self.0
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for err in self.iter() {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "- {err}")?;
        }
        Ok(())
    }
}
