//! Small reshaping helpers for JSON tables and entity lists.
//!
//! These work on plain [`serde_json::Value`]s and never fail except where a
//! value has to be serialised or read through an entity.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::entity::{Entity, FieldValue, project};
use crate::{ModelResult, ModelResultExt};

/// Replace every row of `rows` with its `column` entry.
///
/// Keys are kept; rows that are not objects or lack `column` become null.
///
/// # Examples
///
/// ```rust
/// use entity_tree::transform::select_column;
/// use serde_json::{Value, json};
///
/// let rows = json!({"u1": {"name": "ann", "age": 3}, "u2": {"age": 4}});
/// let Value::Object(rows) = rows else { unreachable!() };
/// assert_eq!(
///     Value::Object(select_column(&rows, "name")),
///     json!({"u1": "ann", "u2": null}),
/// );
/// ```
#[must_use]
pub fn select_column(rows: &Map<String, Value>, column: &str) -> Map<String, Value> {
    rows.iter()
        .map(|(key, row)| {
            let cell = row.get(column).cloned().unwrap_or(Value::Null);
            (key.clone(), cell)
        })
        .collect()
}

/// Walk nested mappings keeping only the scalars stored under `column`.
///
/// At each level a scalar found under `column` replaces the whole level.
/// Other keys holding mappings or sequences are walked recursively; other
/// scalars are dropped.
///
/// # Examples
///
/// ```rust
/// use entity_tree::transform::select_column_nested;
/// use serde_json::{Value, json};
///
/// let data = json!({
///     "eu": {"de": {"id": 1, "name": "Berlin"}, "fr": {"id": 2}},
///     "total": 2,
/// });
/// let Value::Object(data) = data else { unreachable!() };
/// assert_eq!(
///     select_column_nested(&data, "id"),
///     json!({"eu": {"de": 1, "fr": 2}}),
/// );
/// ```
#[must_use]
pub fn select_column_nested(data: &Map<String, Value>, column: &str) -> Value {
    let mut selected = Map::new();
    for (key, value) in data {
        if key == column {
            if is_scalar(value) {
                return value.clone();
            }
            continue;
        }
        if let Some(nested) = select_nested_value(value, column) {
            selected.insert(key.clone(), nested);
        }
    }
    Value::Object(selected)
}

fn select_nested_value(value: &Value, column: &str) -> Option<Value> {
    match value {
        Value::Object(map) => Some(select_column_nested(map, column)),
        Value::Array(items) => Some(Value::Array(
            items
                .iter()
                .filter_map(|item| select_nested_value(item, column))
                .collect(),
        )),
        _ => None,
    }
}

const fn is_scalar(value: &Value) -> bool {
    matches!(
        value,
        Value::Bool(_) | Value::Number(_) | Value::String(_)
    )
}

/// Serialise `value` and rename every key it contains.
///
/// Each `(from, to)` pair replaces every occurrence of `from` inside a key,
/// applied in order; pairs with an empty `from` are ignored. Keys of nested
/// mappings, including those inside sequences, are renamed too. Values are
/// never touched.
///
/// # Errors
///
/// Returns [`crate::ModelError::Serialization`] when `value` cannot be
/// serialised.
///
/// # Examples
///
/// ```rust
/// use entity_tree::transform::to_mapping;
/// use serde_json::json;
///
/// let mapped = to_mapping(&json!({"user_id": 1, "user_meta": {"user_x": 2}}), &[("user_", "")])?;
/// assert_eq!(mapped, json!({"id": 1, "meta": {"x": 2}}));
/// # Ok::<_, std::sync::Arc<entity_tree::ModelError>>(())
/// ```
pub fn to_mapping<T>(value: &T, renames: &[(&str, &str)]) -> ModelResult<Value>
where
    T: Serialize + ?Sized,
{
    let serialised = serde_json::to_value(value).into_model()?;
    Ok(rename_keys(serialised, renames))
}

fn rename_keys(value: Value, renames: &[(&str, &str)]) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, entry)| (rename_key(key, renames), rename_keys(entry, renames)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| rename_keys(item, renames))
                .collect(),
        ),
        scalar => scalar,
    }
}

fn rename_key(key: String, renames: &[(&str, &str)]) -> String {
    renames
        .iter()
        .filter(|(from, _)| !from.is_empty())
        .fold(key, |renamed, (from, to)| renamed.replace(from, to))
}

/// Read `field` from every entity in turn.
///
/// Nested entities are projected with their nulls.
///
/// # Errors
///
/// Propagates the first reader failure.
pub fn pluck<'e, I, E>(entities: I, field: &str) -> ModelResult<Vec<Value>>
where
    I: IntoIterator<Item = &'e E>,
    E: Entity + ?Sized + 'e,
{
    entities
        .into_iter()
        .map(|entity| match entity.read(field)? {
            FieldValue::Data(value) => Ok(value),
            FieldValue::Entity(nested) => project(nested, true).map(Value::Object),
        })
        .collect()
}

/// Whether `map` holds every key in `required`.
///
/// Present keys count even when their value is null.
#[must_use]
pub fn has_all_keys(map: &Map<String, Value>, required: &[&str]) -> bool {
    required.iter().all(|key| map.contains_key(*key))
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, ensure};
    use rstest::rstest;
    use serde::{Deserialize, Serialize};
    use serde_json::{Map, Value, json};

    use super::{has_all_keys, pluck, select_column, select_column_nested, to_mapping};
    use crate::Entity;

    #[derive(Debug, Default, Deserialize, Serialize, Entity)]
    #[entity(crate = "crate")]
    struct Point {
        x: i64,
        label: Option<String>,
    }

    #[derive(Debug, Default, Deserialize, Serialize, Entity)]
    #[entity(crate = "crate")]
    struct Shape {
        name: String,
        #[entity(nested)]
        origin: Point,
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn select_column_nulls_missing_cells() {
        let rows = object(json!({"a": {"v": 1}, "b": {"w": 2}, "c": 3}));
        assert_eq!(
            Value::Object(select_column(&rows, "v")),
            json!({"a": 1, "b": null, "c": null})
        );
    }

    #[rstest]
    #[case::scalar_wins_level(json!({"id": 7, "child": {"id": 8}}), json!(7))]
    #[case::walks_sequences(
        json!({"list": [{"id": 1}, {"id": 2}, 5]}),
        json!({"list": [1, 2]})
    )]
    #[case::drops_other_scalars(json!({"name": "x", "n": {"id": true}}), json!({"n": true}))]
    #[case::skips_non_scalar_column(json!({"id": {"deep": 1}}), json!({}))]
    fn select_column_nested_cases(#[case] data: Value, #[case] expected: Value) {
        assert_eq!(select_column_nested(&object(data), "id"), expected);
    }

    #[test]
    fn to_mapping_renames_flat_keys() -> Result<()> {
        let mapped = to_mapping(
            &Point {
                x: 1,
                label: Some("p".to_owned()),
            },
            &[("", "ignored"), ("label", "title"), ("x", "left")],
        )?;
        ensure!(
            mapped == json!({"left": 1, "title": "p"}),
            "unexpected mapping: {mapped}"
        );
        ensure!(to_mapping(&5, &[("a", "b")])? == json!(5), "scalar changed");
        Ok(())
    }

    #[test]
    fn to_mapping_renames_nested_keys_but_not_values() -> Result<()> {
        let mapped = to_mapping(
            &Shape {
                name: "x_axis".to_owned(),
                origin: Point {
                    x: 2,
                    label: None,
                },
            },
            &[("x", "col")],
        )?;
        ensure!(
            mapped == json!({"name": "x_axis", "origin": {"col": 2, "label": null}}),
            "unexpected mapping: {mapped}"
        );
        let rows = to_mapping(&json!([{"ax": 1}, [{"xb": 2}]]), &[("x", "_")])?;
        ensure!(
            rows == json!([{"a_": 1}, [{"_b": 2}]]),
            "sequence items not renamed: {rows}"
        );
        Ok(())
    }

    #[test]
    fn pluck_reads_data_and_projects_entities() -> Result<()> {
        let shapes = [
            Shape {
                name: "a".to_owned(),
                origin: Point { x: 1, label: None },
            },
            Shape {
                name: "b".to_owned(),
                origin: Point {
                    x: 2,
                    label: Some("o".to_owned()),
                },
            },
        ];
        let names = pluck(&shapes, "name")?;
        ensure!(names == [json!("a"), json!("b")], "names: {names:?}");
        let origins = pluck(&shapes, "origin")?;
        ensure!(
            origins
                == [
                    json!({"x": 1, "label": null}),
                    json!({"x": 2, "label": "o"})
                ],
            "origins: {origins:?}"
        );
        ensure!(pluck(&shapes, "missing").is_err(), "unknown field read");
        Ok(())
    }

    #[rstest]
    #[case::all_present(&["a", "b"], true)]
    #[case::null_counts(&["n"], true)]
    #[case::missing(&["a", "z"], false)]
    #[case::none_required(&[], true)]
    fn has_all_keys_cases(#[case] required: &[&str], #[case] expected: bool) {
        let map = object(json!({"a": 1, "b": 2, "n": null}));
        assert_eq!(has_all_keys(&map, required), expected);
    }
}
