use crate::engine::errors::{FrameError, QueryError};
use crate::engine::frame::{DataFrame, Field, QueryResponse, TIME_FIELD};
use crate::test_helpers::factories::FrameFactory;

#[test]
fn new_rejects_fields_with_mismatched_lengths() {
    let result = DataFrame::new(vec![
        Field::time(TIME_FIELD, vec![0, 1_000, 2_000]),
        Field::number("error", vec![Some(1.0), None]),
    ]);

    assert_eq!(
        result.unwrap_err(),
        FrameError::InconsistentFieldLength {
            field: "error".into(),
            expected: 3,
            got: 2,
        }
    );
}

#[test]
fn new_rejects_duplicate_time_fields() {
    let result = DataFrame::new(vec![
        Field::time(TIME_FIELD, vec![0]),
        Field::time(TIME_FIELD, vec![0]),
    ]);
    assert_eq!(result.unwrap_err(), FrameError::DuplicateTimeField);
}

#[test]
fn empty_frame_has_no_rows_and_no_time_field() {
    let frame = DataFrame::new(vec![]).expect("empty frame is valid");
    assert!(frame.is_empty());
    assert!(frame.time_field().is_none());
    assert_eq!(frame.value_fields().count(), 0);
}

#[test]
fn value_fields_skip_time_and_keep_declaration_order() {
    let frame = FrameFactory::new()
        .with_times(&[0, 60_000])
        .with_counts("warn", &[1.0, 0.0])
        .with_counts("error", &[0.0, 2.0])
        .with_counts("info", &[3.0, 3.0])
        .create();

    let names: Vec<&str> = frame.value_fields().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["warn", "error", "info"]);
    assert_eq!(frame.len(), 2);
    assert_eq!(
        frame.time_field().and_then(|f| f.as_times()),
        Some(&[0, 60_000][..])
    );
}

#[test]
fn time_typed_field_with_other_name_is_not_the_time_column() {
    let frame = DataFrame::new(vec![
        Field::time("ingested_at", vec![5]),
        Field::number("info", vec![Some(1.0)]),
    ])
    .expect("frame");

    assert!(frame.time_field().is_none());
    let names: Vec<&str> = frame.value_fields().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["info"]);
}

#[test]
fn field_lookup_reports_missing_names() {
    let frame = FrameFactory::new().with_times(&[0]).create();
    assert!(frame.field(TIME_FIELD).is_ok());
    assert_eq!(
        frame.field("warn").unwrap_err(),
        FrameError::FieldNotFound("warn".into())
    );
}

#[test]
fn deserialization_enforces_equal_lengths() {
    let ok = r#"{
        "name": "volume",
        "fields": [
            {"name": "time", "values": {"time": [0, 60000]}},
            {"name": "warn", "values": {"number": [1, null]}}
        ]
    }"#;
    let frame: DataFrame = serde_json::from_str(ok).expect("valid frame");
    assert_eq!(frame.name(), Some("volume"));
    assert_eq!(
        frame.field("warn").unwrap().as_numbers(),
        Some(&[Some(1.0), None][..])
    );

    let bad = r#"{
        "fields": [
            {"name": "time", "values": {"time": [0, 60000]}},
            {"name": "warn", "values": {"number": [1]}}
        ]
    }"#;
    let err = serde_json::from_str::<DataFrame>(bad).unwrap_err();
    assert!(err.to_string().contains("warn"));
}

#[test]
fn failed_response_carries_error_without_frames() {
    let response = QueryResponse::failed(QueryError::new("boom").with_ref_id("A"));
    assert_eq!(response.frame_count(), 0);
    assert_eq!(response.error.as_ref().map(|e| e.message.as_str()), Some("boom"));
    assert_eq!(response.error.unwrap().ref_id.as_deref(), Some("A"));
}
