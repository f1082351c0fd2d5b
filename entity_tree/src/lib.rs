//! Core crate for the `entity_tree` data-modelling toolkit.
//!
//! Two reconciliation problems live here:
//!
//! - rebuilding nested [`Tree`]s out of flat key/value tables whose keys
//!   encode a path (`cfg.db.host = localhost`), see [`TreeBuilder`]; and
//! - merging a partial [`Entity`] into a live one, field by field, with the
//!   strategy picked from each field's shape, see [`EntityMerger`].
//!
//! Both rely on the same primitive, the distinct merge in [`distinct`], which
//! combines two nested mappings without ever coercing a scalar/mapping clash
//! into a list.
//!
//! The [`Entity`](derive@Entity) derive generates the field contract for plain
//! structs:
//!
//! ```rust
//! use entity_tree::{Entity, EntityMerger};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Deserialize, Serialize, Entity)]
//! struct Account {
//!     #[entity(protected)]
//!     id: u64,
//!     name: String,
//!     tags: Vec<String>,
//! }
//!
//! let mut stored = Account { id: 1, name: "old".into(), tags: vec!["a".into()] };
//! let incoming = Account { id: 99, name: "new".into(), tags: vec!["a".into(), "b".into()] };
//!
//! EntityMerger::default().merge(&mut stored, &incoming)?;
//! assert_eq!(stored.id, 1);
//! assert_eq!(stored.name, "new");
//! assert_eq!(stored.tags, ["a", "b"]);
//! # Ok::<_, std::sync::Arc<entity_tree::ModelError>>(())
//! ```

use std::sync::Arc;

pub use entity_tree_macros::Entity;
#[doc(hidden)]
pub use serde_json;

pub mod distinct;
pub mod entity;
mod error;
mod result_ext;
pub mod transform;
pub mod tree;

pub use distinct::{
    Mapping, merge_distinct, merge_distinct_beneath, merge_distinct_into, merge_distinct_values,
};
pub use entity::{
    Entity, EntityMerger, FieldShape, FieldSpec, FieldValue, MergePolicy, MergeStrategy,
    merge_entity, project,
};
pub use error::{Accessor, AggregatedErrors, ModelError};
pub use result_ext::{FieldResultExt, ModelResultExt};
pub use tree::{EnvTable, LEAF_KEY, Node, Precedence, Slot, Tree, TreeBuilder, build_tree};

/// Result alias used throughout the crate.
///
/// Errors are shared behind an [`Arc`] so several field failures can be
/// collected into one [`ModelError::Aggregate`] without cloning.
pub type ModelResult<T> = Result<T, Arc<ModelError>>;
