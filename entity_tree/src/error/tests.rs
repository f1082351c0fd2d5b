//! Unit tests for error rendering and aggregation behaviour.

use rstest::rstest;
use std::sync::Arc;

use super::{Accessor, ModelError};
use crate::entity::FieldShape;

#[rstest]
#[case::reader(
    ModelError::missing_reader("Account", "name"),
    "`Account` has no reader for field `name`"
)]
#[case::writer(
    ModelError::missing_writer("Account", "name"),
    "`Account` has no writer for field `name`"
)]
#[case::shape(
    ModelError::shape_mismatch("Account", "tags", FieldShape::Sequence, "string"),
    "cannot merge field `tags` of `Account`: expected sequence, found string"
)]
fn renders_field_errors(#[case] err: ModelError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
    assert!(err.field().is_some());
}

#[test]
fn missing_accessor_records_which_half() {
    let err = ModelError::missing_writer("Account", "id");
    assert!(matches!(
        err,
        ModelError::MissingAccessor {
            accessor: Accessor::Writer,
            ..
        }
    ));
}

#[test]
fn try_aggregate_none_on_empty() {
    assert!(ModelError::try_aggregate(Vec::<Arc<ModelError>>::new()).is_none());
}

#[test]
fn try_aggregate_unwraps_single_owned_error() {
    let err = Arc::new(ModelError::missing_reader("Account", "name"));
    let outcome = ModelError::try_aggregate(vec![err]);
    assert!(
        matches!(outcome, Some(ModelError::MissingAccessor { .. })),
        "expected MissingAccessor, got {outcome:?}"
    );
}

#[test]
fn try_aggregate_wraps_single_shared_error() {
    let shared = Arc::new(ModelError::missing_reader("Account", "name"));
    let outcome = ModelError::try_aggregate(vec![Arc::clone(&shared)]);
    match outcome {
        Some(ModelError::Aggregate(aggregate)) => assert_eq!(aggregate.len(), 1),
        other => panic!("expected Aggregate, got {other:?}"),
    }
}

#[test]
fn try_aggregate_combines_multiple_errors() {
    let outcome = ModelError::try_aggregate(vec![
        ModelError::missing_writer("Account", "name"),
        ModelError::shape_mismatch("Account", "address", FieldShape::Entity, "number"),
    ]);
    let Some(ModelError::Aggregate(aggregate)) = outcome else {
        panic!("expected Aggregate");
    };
    assert_eq!(aggregate.len(), 2);
    assert_eq!(aggregate.fields().collect::<Vec<_>>(), ["name", "address"]);
    assert!(
        matches!(
            aggregate.for_field("address"),
            Some(ModelError::ShapeMismatch { .. })
        ),
        "address failure missing"
    );
    assert!(aggregate.for_field("tags").is_none());
    let display = aggregate.to_string();
    assert_eq!(display.lines().count(), 2);
    assert!(display.lines().all(|line| line.starts_with("- ")));
    assert_eq!(aggregate.into_errors().len(), 2);
}
