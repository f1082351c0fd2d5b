//! The entity contract: declared fields with typed readers and writers.
//!
//! An [`Entity`] lists its fields as [`FieldSpec`]s, exposes a reader and an
//! optional writer per field, and states which fields a merge must leave
//! alone. [`project`] snapshots an entity into a JSON object and
//! [`EntityMerger`] folds one entity into another using those accessors.
//!
//! Implementations are normally generated with
//! [`#[derive(Entity)]`](derive@crate::Entity); hand-written ones can lean on
//! [`encode_field`] and [`decode_field`] for the value conversions.

mod merge;
mod project;
mod strategy;

use std::any::type_name;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{FieldResultExt, ModelResult};

pub use merge::{EntityMerger, MergePolicy, merge_entity};
pub use project::project;
pub use strategy::{MergeStrategy, is_truthy};

/// Static shape of a field, used to pick its merge strategy.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FieldShape {
    /// A single value replaced wholesale on merge.
    Scalar,
    /// An ordered collection merged by set union.
    Sequence,
    /// A keyed collection merged with the distinct merge.
    Mapping,
    /// A nested entity merged recursively.
    Entity,
    /// A value always replaced wholesale, even when it serialises as a
    /// sequence, such as a fixed-size array or a tuple.
    Fixed,
}

impl fmt::Display for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scalar => "scalar",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
            Self::Entity => "entity",
            Self::Fixed => "fixed",
        })
    }
}

/// Declaration of one entity field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldSpec {
    /// Field name as it appears in projections.
    pub name: &'static str,
    /// Declared shape.
    pub shape: FieldShape,
    /// Whether [`Entity::read`] serves this field.
    pub readable: bool,
    /// Whether [`Entity::write`] accepts this field.
    pub writable: bool,
}

impl FieldSpec {
    /// Declare a readable and writable field.
    #[must_use]
    pub const fn new(name: &'static str, shape: FieldShape) -> Self {
        Self {
            name,
            shape,
            readable: true,
            writable: true,
        }
    }

    /// Drop the writer from this declaration.
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Drop the reader from this declaration.
    #[must_use]
    pub const fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }
}

/// Value handed out by [`Entity::read`].
pub enum FieldValue<'a> {
    /// Plain data: a scalar, a sequence or a mapping.
    Data(Value),
    /// A nested entity, borrowed from its parent.
    Entity(&'a dyn Entity),
}

impl FieldValue<'_> {
    /// Whether the field currently holds no value.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Data(Value::Null))
    }

    /// Take the plain data out, if this is not a nested entity.
    #[must_use]
    pub fn into_data(self) -> Option<Value> {
        match self {
            Self::Data(value) => Some(value),
            Self::Entity(_) => None,
        }
    }

    /// Short name of the value's kind, used in error messages.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Data(value) => describe_value(value),
            Self::Entity(_) => "entity",
        }
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data(value) => f.debug_tuple("Data").field(value).finish(),
            Self::Entity(entity) => f.debug_tuple("Entity").field(&entity.entity_name()).finish(),
        }
    }
}

pub(crate) const fn describe_value(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// A value modelled as a declared set of readable and writable fields.
///
/// # Examples
///
/// A hand-written implementation:
///
/// ```rust
/// use entity_tree::entity::{decode_field, encode_field};
/// use entity_tree::{Entity, FieldShape, FieldSpec, FieldValue, ModelError, ModelResult};
/// use serde_json::Value;
///
/// struct Counter {
///     id: u32,
///     hits: u64,
/// }
///
/// impl Entity for Counter {
///     fn fields(&self) -> &'static [FieldSpec] {
///         const FIELDS: &[FieldSpec] = &[
///             FieldSpec::new("id", FieldShape::Scalar).read_only(),
///             FieldSpec::new("hits", FieldShape::Scalar),
///         ];
///         FIELDS
///     }
///
///     fn protected_fields(&self) -> &'static [&'static str] {
///         &["id"]
///     }
///
///     fn read(&self, field: &str) -> ModelResult<FieldValue<'_>> {
///         match field {
///             "id" => encode_field(self, field, &self.id),
///             "hits" => encode_field(self, field, &self.hits),
///             _ => Err(ModelError::missing_reader(self.entity_name(), field).into()),
///         }
///     }
///
///     fn write(&mut self, field: &str, value: Value) -> ModelResult<()> {
///         match field {
///             "hits" => self.hits = decode_field(&*self, field, value)?,
///             _ => return Err(ModelError::missing_writer(self.entity_name(), field).into()),
///         }
///         Ok(())
///     }
///
///     fn entity_mut(&mut self, _field: &str) -> Option<&mut dyn Entity> {
///         None
///     }
/// }
///
/// let mut counter = Counter { id: 1, hits: 3 };
/// counter.merge(&Counter { id: 2, hits: 7 })?;
/// assert_eq!((counter.id, counter.hits), (1, 7));
/// # Ok::<_, std::sync::Arc<ModelError>>(())
/// ```
pub trait Entity {
    /// Declared fields in projection order.
    fn fields(&self) -> &'static [FieldSpec];

    /// Fields a merge must never write.
    fn protected_fields(&self) -> &'static [&'static str];

    /// Read the current value of `field`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ModelError::MissingAccessor`] when `field` has no
    /// reader and [`crate::ModelError::InvalidValue`] when its value cannot be
    /// serialised.
    fn read(&self, field: &str) -> ModelResult<FieldValue<'_>>;

    /// Replace the value of `field`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ModelError::MissingAccessor`] when `field` has no
    /// writer and [`crate::ModelError::InvalidValue`] when `value` does not
    /// decode into the field's type.
    fn write(&mut self, field: &str, value: Value) -> ModelResult<()>;

    /// Mutable access to the nested entity stored in `field`, if any.
    fn entity_mut(&mut self, field: &str) -> Option<&mut dyn Entity>;

    /// Name used in error messages and logs.
    fn entity_name(&self) -> &'static str {
        type_name::<Self>()
    }

    /// Value identifying this entity among others of its kind.
    ///
    /// # Errors
    ///
    /// Returns any failure raised while reading the identifying field.
    fn identifier(&self) -> ModelResult<Option<Value>> {
        Ok(None)
    }

    /// Look up the declaration of `name`.
    fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|spec| spec.name == name)
    }

    /// Whether merges must leave `name` untouched.
    fn is_protected(&self, name: &str) -> bool {
        self.protected_fields().contains(&name)
    }

    /// Project the entity's readable fields into a JSON object.
    ///
    /// # Errors
    ///
    /// Propagates reader failures.
    fn data(&self, include_nulls: bool) -> ModelResult<Map<String, Value>> {
        project(self, include_nulls)
    }

    /// Merge `source` into this entity with the default [`MergePolicy`].
    ///
    /// # Errors
    ///
    /// See [`EntityMerger::merge`].
    fn merge(&mut self, source: &dyn Entity) -> ModelResult<&mut Self>
    where
        Self: Sized,
    {
        EntityMerger::default().merge(self, source)
    }
}

/// Serialise `value` as the content of `entity.field`.
///
/// # Errors
///
/// Returns [`crate::ModelError::InvalidValue`] when serialisation fails.
pub fn encode_field<'a, E, T>(entity: &E, field: &str, value: &T) -> ModelResult<FieldValue<'a>>
where
    E: Entity + ?Sized,
    T: Serialize + ?Sized,
{
    serde_json::to_value(value)
        .map(FieldValue::Data)
        .for_field(entity.entity_name(), field)
}

/// Decode `value` into the type of `entity.field`.
///
/// # Errors
///
/// Returns [`crate::ModelError::InvalidValue`] when `value` does not fit.
pub fn decode_field<E, T>(entity: &E, field: &str, value: Value) -> ModelResult<T>
where
    E: Entity + ?Sized,
    T: DeserializeOwned,
{
    serde_json::from_value(value).for_field(entity.entity_name(), field)
}
