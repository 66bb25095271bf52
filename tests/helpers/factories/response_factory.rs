use crate::engine::errors::QueryError;
use crate::engine::frame::{DataFrame, QueryResponse};
use crate::test_helpers::factories::FrameFactory;

pub struct ResponseFactory {
    frames: Vec<DataFrame>,
    error: Option<QueryError>,
}

impl ResponseFactory {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            error: None,
        }
    }

    /// A response holding one small `warn`/`error` volume frame.
    pub fn single_frame() -> QueryResponse {
        Self::new()
            .with_frame(
                FrameFactory::new()
                    .with_times(&[0, 60_000])
                    .with_counts("warn", &[1.0, 2.0])
                    .with_counts("error", &[0.0, 1.0])
                    .create(),
            )
            .create()
    }

    pub fn with_frame(mut self, frame: DataFrame) -> Self {
        self.frames.push(frame);
        self
    }

    pub fn with_error(mut self, message: &str) -> Self {
        self.error = Some(QueryError::new(message));
        self
    }

    pub fn create(self) -> QueryResponse {
        QueryResponse {
            frames: self.frames,
            error: self.error,
        }
    }
}
