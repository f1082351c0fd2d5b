//! Per-field merge strategies.

use serde_json::Value;

use super::{FieldShape, FieldValue};

/// How a source value is combined with a target field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MergeStrategy {
    /// Replace the target value.
    Overwrite,
    /// Append source items the target sequence does not already hold.
    Union,
    /// Distinct-merge the source mapping over the target mapping.
    Combine,
    /// Merge the nested source entity into the nested target entity.
    Recurse,
}

impl MergeStrategy {
    /// Pick the strategy for a field declared as `shape` whose current value
    /// is `current`.
    ///
    /// A nested entity always recurses and a [`FieldShape::Fixed`] field is
    /// always overwritten. Otherwise the current value decides: a sequence is
    /// unioned whatever the declared shape, a mapping is combined when the
    /// field is declared as one, and anything else (null included) is
    /// overwritten.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use entity_tree::{FieldShape, FieldValue, MergeStrategy};
    /// use serde_json::{Value, json};
    ///
    /// let tags = FieldValue::Data(json!(["a"]));
    /// assert_eq!(MergeStrategy::resolve(FieldShape::Sequence, &tags), MergeStrategy::Union);
    /// let unset = FieldValue::Data(Value::Null);
    /// assert_eq!(MergeStrategy::resolve(FieldShape::Sequence, &unset), MergeStrategy::Overwrite);
    /// // Shape inference missed an aliased `Vec`; the value still unions.
    /// assert_eq!(MergeStrategy::resolve(FieldShape::Scalar, &tags), MergeStrategy::Union);
    /// assert_eq!(MergeStrategy::resolve(FieldShape::Fixed, &tags), MergeStrategy::Overwrite);
    /// ```
    #[must_use]
    pub const fn resolve(shape: FieldShape, current: &FieldValue<'_>) -> Self {
        match (shape, current) {
            (_, FieldValue::Entity(_)) => Self::Recurse,
            (FieldShape::Fixed, _) => Self::Overwrite,
            (_, FieldValue::Data(Value::Array(_))) => Self::Union,
            (FieldShape::Mapping, FieldValue::Data(Value::Object(_))) => Self::Combine,
            _ => Self::Overwrite,
        }
    }
}

/// Whether `value` counts as "something to merge".
///
/// Null, `false`, zero, the empty string, the string `"0"`, and empty
/// sequences or mappings are all falsy.
///
/// # Examples
///
/// ```rust
/// use entity_tree::entity::is_truthy;
/// use serde_json::json;
///
/// assert!(is_truthy(&json!("x")));
/// assert!(!is_truthy(&json!(0)));
/// assert!(!is_truthy(&json!("0")));
/// assert!(!is_truthy(&json!([])));
/// ```
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !(text.is_empty() || text == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Append the items of `incoming` that `target` does not already hold.
///
/// Target order is kept and duplicates inside `incoming` are only appended
/// once.
pub(crate) fn union_into(target: &mut Vec<Value>, incoming: Vec<Value>) {
    for item in incoming {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}
