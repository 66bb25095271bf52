use chrono::{TimeZone, Utc};

use super::time_range::{AbsoluteRange, TimeRange};
use crate::engine::errors::TimeRangeError;

#[test]
fn absolute_range_is_in_milliseconds() {
    let from = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2024, 1, 15, 1, 0, 0).unwrap();
    let range = TimeRange::new(from, to).expect("range");

    assert_eq!(
        range.absolute(),
        AbsoluteRange {
            from: 1_705_276_800_000,
            to: 1_705_280_400_000,
        }
    );
    assert_eq!(range.span_ms(), 3_600_000);
}

#[test]
fn from_millis_round_trips_bounds() {
    let range = TimeRange::from_millis(1_000, 61_000).expect("range");
    assert_eq!(range.absolute().from, 1_000);
    assert_eq!(range.absolute().to, 61_000);
    assert!(range.contains_millis(1_000));
    assert!(!range.contains_millis(61_000));
}

#[test]
fn inverted_ranges_are_rejected() {
    assert_eq!(
        TimeRange::from_millis(5_000, 1_000).unwrap_err(),
        TimeRangeError::Inverted {
            from: 5_000,
            to: 1_000,
        }
    );
}

#[test]
fn empty_range_has_zero_span() {
    let range = TimeRange::from_millis(42, 42).expect("range");
    assert_eq!(range.span_ms(), 0);
    assert!(!range.contains_millis(42));
}

#[test]
fn deserialization_goes_through_validation() {
    let ok: TimeRange = serde_json::from_str(
        r#"{"from": "2024-01-15T00:00:00Z", "to": "2024-01-15T00:01:00Z"}"#,
    )
    .expect("ordered range");
    assert_eq!(ok.span_ms(), 60_000);
    assert_eq!(ok.from().timestamp_millis(), 1_705_276_800_000);

    let err = serde_json::from_str::<TimeRange>(
        r#"{"from": "2024-01-15T01:00:00Z", "to": "2024-01-15T00:00:00Z"}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("inverted"), "{err}");
}

#[test]
fn serialized_range_reads_back_unchanged() {
    let range = TimeRange::from_millis(1_000, 61_000).expect("range");
    let json = serde_json::to_string(&range).expect("serialize");
    let back: TimeRange = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, range);
    assert_eq!(back.to(), range.to());
}
