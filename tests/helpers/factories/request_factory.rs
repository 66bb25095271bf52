use crate::engine::volume::{LogsVolumeRequest, QueryTarget};
use crate::shared::datetime::TimeRange;

pub struct RequestFactory {
    targets: Vec<QueryTarget>,
    from_ms: i64,
    to_ms: i64,
}

impl RequestFactory {
    pub fn new() -> Self {
        Self {
            targets: vec![QueryTarget::new("A", "SELECT level, count() FROM logs")],
            from_ms: 1_700_000_000_000,
            to_ms: 1_700_003_600_000,
        }
    }

    pub fn with_target(mut self, ref_id: &str, query: &str) -> Self {
        self.targets.push(QueryTarget::new(ref_id, query));
        self
    }

    pub fn with_range_millis(mut self, from_ms: i64, to_ms: i64) -> Self {
        self.from_ms = from_ms;
        self.to_ms = to_ms;
        self
    }

    pub fn create(self) -> LogsVolumeRequest {
        let range = TimeRange::from_millis(self.from_ms, self.to_ms).expect("valid range");
        LogsVolumeRequest::new(self.targets, range)
    }
}
