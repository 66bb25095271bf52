use crate::engine::frame::TIME_FIELD;
use crate::test_helpers::factories::FrameFactory;

#[test]
fn builds_named_frame_with_time_and_level_columns() {
    let frame = FrameFactory::new()
        .with_name("volume")
        .with_times(&[0, 1_000])
        .with_counts("info", &[2.0, 0.0])
        .with_values("debug", &[None, Some(1.0)])
        .create();

    assert_eq!(frame.name(), Some("volume"));
    assert_eq!(frame.len(), 2);
    assert_eq!(frame.fields()[0].name, TIME_FIELD);
    assert_eq!(
        frame.field("info").unwrap().as_numbers(),
        Some(&[Some(2.0), Some(0.0)][..])
    );
    assert_eq!(
        frame.field("debug").unwrap().as_numbers(),
        Some(&[None, Some(1.0)][..])
    );
}
