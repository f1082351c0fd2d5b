//! Constructors and aggregation helpers for `ModelError`.

use std::sync::Arc;

use super::{Accessor, AggregatedErrors, ModelError};
use crate::entity::FieldShape;

impl ModelError {
    /// Build a [`ModelError::MissingAccessor`] for a field without a reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use entity_tree::{Accessor, ModelError};
    /// let err = ModelError::missing_reader("Account", "name");
    /// assert!(matches!(err, ModelError::MissingAccessor { accessor: Accessor::Reader, .. }));
    /// ```
    #[must_use]
    pub fn missing_reader(entity: &'static str, field: impl Into<String>) -> Self {
        Self::MissingAccessor {
            entity,
            field: field.into(),
            accessor: Accessor::Reader,
        }
    }

    /// Build a [`ModelError::MissingAccessor`] for a field without a writer.
    #[must_use]
    pub fn missing_writer(entity: &'static str, field: impl Into<String>) -> Self {
        Self::MissingAccessor {
            entity,
            field: field.into(),
            accessor: Accessor::Writer,
        }
    }

    /// Build a [`ModelError::ShapeMismatch`].
    ///
    /// # Examples
    ///
    /// ```
    /// use entity_tree::{FieldShape, ModelError};
    /// let err = ModelError::shape_mismatch("Account", "address", FieldShape::Entity, "string");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "cannot merge field `address` of `Account`: expected entity, found string",
    /// );
    /// ```
    #[must_use]
    pub fn shape_mismatch(
        entity: &'static str,
        field: impl Into<String>,
        expected: FieldShape,
        found: &'static str,
    ) -> Self {
        Self::ShapeMismatch {
            entity,
            field: field.into(),
            expected,
            found,
        }
    }

    /// Build a [`ModelError::InvalidValue`] from a serialisation failure.
    #[must_use]
    pub fn invalid_value(
        entity: &'static str,
        field: impl Into<String>,
        source: serde_json::Error,
    ) -> Self {
        Self::InvalidValue {
            entity,
            field: field.into(),
            source,
        }
    }

    /// Tries to build a [`ModelError`] from an iterator of errors.
    ///
    /// The iterator is consumed eagerly. It returns:
    /// * `None` when no errors are supplied;
    /// * the inner error when a single [`Arc`] is uniquely owned;
    /// * [`Self::Aggregate`] containing that single [`Arc`] when the error is
    ///   already shared; and
    /// * [`Self::Aggregate`] combining every error for two or more inputs.
    #[must_use]
    pub fn try_aggregate<I, E>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let mut arcs: Vec<Arc<Self>> = errors.into_iter().map(Into::into).collect();
        if arcs.len() > 1 {
            return Some(Self::Aggregate(Box::new(AggregatedErrors::new(arcs))));
        }
        let last = arcs.pop()?;
        Some(match Arc::try_unwrap(last) {
            Ok(err) => err,
            Err(shared) => Self::Aggregate(Box::new(AggregatedErrors::new(vec![shared]))),
        })
    }

    /// Returns the field name this error refers to, when it has one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingAccessor { field, .. }
            | Self::ShapeMismatch { field, .. }
            | Self::InvalidValue { field, .. } => Some(field),
            Self::Serialization(_) | Self::Aggregate(_) => None,
        }
    }
}
