//! Field-by-field merging of one entity into another.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};

use super::strategy::union_into;
use super::{Entity, FieldShape, FieldSpec, FieldValue, MergeStrategy, describe_value, is_truthy, project};
use crate::distinct::merge_distinct_into;
use crate::{ModelError, ModelResult};

/// Knobs controlling [`EntityMerger`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MergePolicy {
    skip_falsy: bool,
    fail_fast: bool,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            skip_falsy: true,
            fail_fast: true,
        }
    }
}

impl MergePolicy {
    /// Whether falsy source values are ignored.
    ///
    /// Enabled by default: a source `0`, `false` or `""` then never replaces
    /// a target value. See [`super::is_truthy`].
    #[must_use]
    pub const fn skip_falsy(mut self, skip: bool) -> Self {
        self.skip_falsy = skip;
        self
    }

    /// Whether the merge stops at the first failing field.
    ///
    /// When disabled, every remaining field is still merged and all failures
    /// are reported together as [`ModelError::Aggregate`].
    #[must_use]
    pub const fn fail_fast(mut self, stop: bool) -> Self {
        self.fail_fast = stop;
        self
    }

    /// Current falsy handling.
    #[must_use]
    pub const fn skips_falsy(&self) -> bool {
        self.skip_falsy
    }

    /// Current error handling.
    #[must_use]
    pub const fn stops_on_error(&self) -> bool {
        self.fail_fast
    }
}

/// Merges a source entity's projection into a target entity in place.
///
/// For every field the source projects (nulls omitted):
///
/// - protected fields of the target are skipped;
/// - falsy values are skipped unless the policy says otherwise;
/// - the target field must be declared writable;
/// - the [`MergeStrategy`] is resolved from the target's declared shape and
///   current value, then applied.
///
/// Each field is checked before it is written, but fields merged before a
/// failure stay merged.
#[derive(Clone, Copy, Debug, Default)]
pub struct EntityMerger {
    policy: MergePolicy,
}

impl EntityMerger {
    /// Create a merger using `policy`.
    #[must_use]
    pub const fn new(policy: MergePolicy) -> Self {
        Self { policy }
    }

    /// Policy in effect.
    #[must_use]
    pub const fn policy(&self) -> MergePolicy {
        self.policy
    }

    /// Merge `source` into `target`, returning `target`.
    ///
    /// # Errors
    ///
    /// - [`ModelError::MissingAccessor`] when a projected field has no
    ///   writer on the target.
    /// - [`ModelError::ShapeMismatch`] when the source value cannot be merged
    ///   with the target's sequence, mapping or nested entity.
    /// - [`ModelError::InvalidValue`] when a value fails to convert.
    /// - [`ModelError::Aggregate`] carrying all of the above when the policy
    ///   does not fail fast and several fields fail.
    pub fn merge<'t, T>(&self, target: &'t mut T, source: &dyn Entity) -> ModelResult<&'t mut T>
    where
        T: Entity + ?Sized,
    {
        let data = project(source, false)?;
        let mut errors: Vec<Arc<ModelError>> = Vec::new();
        for (field, value) in data {
            if target.is_protected(&field) {
                debug!(entity = target.entity_name(), field = %field, "skipping protected field");
                continue;
            }
            if self.policy.skip_falsy && !is_truthy(&value) {
                debug!(entity = target.entity_name(), field = %field, "skipping falsy value");
                continue;
            }
            if let Err(err) = self.merge_field(target, source, &field, value) {
                if self.policy.fail_fast {
                    return Err(err);
                }
                debug!(
                    entity = target.entity_name(),
                    field = %field,
                    error = %err,
                    "field merge failed"
                );
                errors.push(err);
            }
        }
        match ModelError::try_aggregate(errors) {
            Some(err) => Err(Arc::new(err)),
            None => Ok(target),
        }
    }

    fn merge_field<T>(
        &self,
        target: &mut T,
        source: &dyn Entity,
        field: &str,
        value: Value,
    ) -> ModelResult<()>
    where
        T: Entity + ?Sized,
    {
        let spec = writable_spec(&*target, field)?;
        let current = target.read(field)?;
        let strategy = MergeStrategy::resolve(spec.shape, &current);
        trace!(entity = target.entity_name(), field, ?strategy, "merging field");
        match strategy {
            MergeStrategy::Overwrite => {
                drop(current);
                target.write(field, value)
            }
            MergeStrategy::Union => {
                let Value::Array(incoming) = value else {
                    return Err(mismatch(
                        &*target,
                        field,
                        FieldShape::Sequence,
                        describe_value(&value),
                    ));
                };
                let Some(Value::Array(mut items)) = current.into_data() else {
                    return Err(mismatch(
                        &*target,
                        field,
                        FieldShape::Sequence,
                        "entity",
                    ));
                };
                union_into(&mut items, incoming);
                target.write(field, Value::Array(items))
            }
            MergeStrategy::Combine => {
                let Value::Object(incoming) = value else {
                    return Err(mismatch(
                        &*target,
                        field,
                        FieldShape::Mapping,
                        describe_value(&value),
                    ));
                };
                let Some(Value::Object(mut map)) = current.into_data() else {
                    return Err(mismatch(
                        &*target,
                        field,
                        FieldShape::Mapping,
                        "entity",
                    ));
                };
                merge_distinct_into(&mut map, incoming);
                target.write(field, Value::Object(map))
            }
            MergeStrategy::Recurse => {
                drop(current);
                let nested_source = match source.read(field)? {
                    FieldValue::Entity(nested) => nested,
                    other => {
                        return Err(mismatch(
                            &*target,
                            field,
                            FieldShape::Entity,
                            other.describe(),
                        ));
                    }
                };
                let entity = target.entity_name();
                let nested_target = target
                    .entity_mut(field)
                    .ok_or_else(|| Arc::new(ModelError::missing_writer(entity, field)))?;
                self.merge(nested_target, nested_source).map(|_| ())
            }
        }
    }
}

fn writable_spec<T>(target: &T, field: &str) -> ModelResult<&'static FieldSpec>
where
    T: Entity + ?Sized,
{
    target
        .field(field)
        .filter(|spec| spec.writable)
        .ok_or_else(|| Arc::new(ModelError::missing_writer(target.entity_name(), field)))
}

fn mismatch<T>(
    target: &T,
    field: &str,
    expected: FieldShape,
    found: &'static str,
) -> Arc<ModelError>
where
    T: Entity + ?Sized,
{
    Arc::new(ModelError::shape_mismatch(
        target.entity_name(),
        field,
        expected,
        found,
    ))
}

/// Merge `source` into `target` with the default [`MergePolicy`].
///
/// # Errors
///
/// See [`EntityMerger::merge`].
pub fn merge_entity<'t, T>(target: &'t mut T, source: &dyn Entity) -> ModelResult<&'t mut T>
where
    T: Entity + ?Sized,
{
    EntityMerger::default().merge(target, source)
}
