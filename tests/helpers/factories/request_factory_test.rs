use crate::test_helpers::factories::RequestFactory;

#[test]
fn builds_request_with_default_and_extra_targets() {
    let request = RequestFactory::new()
        .with_target("B", "SELECT 1")
        .with_range_millis(1_000, 5_000)
        .create();

    let ref_ids: Vec<&str> = request.targets.iter().map(|t| t.ref_id.as_str()).collect();
    assert_eq!(ref_ids, vec!["A", "B"]);
    assert_eq!(request.range.span_ms(), 4_000);
}
