//! Primary error enum for projection and merge flows.

use std::fmt;

use thiserror::Error;

use super::AggregatedErrors;
use crate::entity::FieldShape;

/// Which half of a field's accessor pair is involved in a failure.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Accessor {
    /// The field cannot be read.
    Reader,
    /// The field cannot be written.
    Writer,
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Reader => "reader",
            Self::Writer => "writer",
        })
    }
}

/// Errors that can occur while projecting or merging entities.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// A field taking part in a merge has no matching accessor on the entity.
    #[error("`{entity}` has no {accessor} for field `{field}`")]
    MissingAccessor {
        /// Name of the entity missing the accessor.
        entity: &'static str,
        /// Field the accessor was requested for.
        field: String,
        /// Which accessor is missing.
        accessor: Accessor,
    },

    /// The source cannot be merged into the target's field because their
    /// shapes disagree.
    #[error("cannot merge field `{field}` of `{entity}`: expected {expected}, found {found}")]
    ShapeMismatch {
        /// Name of the target entity.
        entity: &'static str,
        /// Field whose shapes disagree.
        field: String,
        /// Shape the target field requires.
        expected: FieldShape,
        /// Description of what the source supplied.
        found: &'static str,
    },

    /// A field value could not be encoded by its reader or decoded by its
    /// writer.
    #[error("invalid value for field `{field}` of `{entity}`: {source}")]
    InvalidValue {
        /// Name of the entity owning the field.
        entity: &'static str,
        /// Field whose value failed to convert.
        field: String,
        /// Underlying serialisation error.
        #[source]
        source: serde_json::Error,
    },

    /// Serialising a value without field context failed.
    #[error("failed to serialise value: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Several fields failed during a merge that kept going past errors.
    #[error("multiple merge errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}
