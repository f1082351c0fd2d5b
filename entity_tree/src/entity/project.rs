//! Projection of entities into JSON objects.

use serde_json::{Map, Value};

use super::{Entity, FieldValue};
use crate::ModelResult;

/// Snapshot the readable fields of `entity` in declaration order.
///
/// Nested entities are projected recursively with the same `include_nulls`
/// flag. Null values appear only when `include_nulls` is set.
///
/// # Errors
///
/// Propagates the first reader failure.
///
/// # Examples
///
/// ```rust
/// use entity_tree::{Entity, project};
/// use serde::{Deserialize, Serialize};
/// use serde_json::json;
///
/// #[derive(Deserialize, Serialize, Entity)]
/// struct Person {
///     name: String,
///     age: Option<u32>,
/// }
///
/// let person = Person { name: "a".into(), age: None };
/// assert_eq!(serde_json::Value::Object(project(&person, false)?), json!({"name": "a"}));
/// assert_eq!(
///     serde_json::Value::Object(project(&person, true)?),
///     json!({"name": "a", "age": null}),
/// );
/// # Ok::<_, std::sync::Arc<entity_tree::ModelError>>(())
/// ```
pub fn project<E>(entity: &E, include_nulls: bool) -> ModelResult<Map<String, Value>>
where
    E: Entity + ?Sized,
{
    let mut projection = Map::new();
    for spec in entity.fields().iter().filter(|spec| spec.readable) {
        let value = match entity.read(spec.name)? {
            FieldValue::Entity(nested) => Value::Object(project(nested, include_nulls)?),
            FieldValue::Data(Value::Null) if !include_nulls => continue,
            FieldValue::Data(data) => data,
        };
        projection.insert(spec.name.to_owned(), value);
    }
    Ok(projection)
}
