use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

/// Error payload reported by the upstream query layer, either as the terminal
/// failure of the channel or embedded in an otherwise delivered response.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct QueryError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl QueryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ref_id: None,
            status: None,
        }
    }

    pub fn with_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = Some(ref_id.into());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// Hard failures of a logs volume run. Both variants terminate the stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogsVolumeError {
    #[error("Upstream query channel failed: {0}")]
    Upstream(QueryError),

    #[error("Query response carried an error: {0}")]
    EmbeddedBatch(QueryError),
}

impl LogsVolumeError {
    pub fn query_error(&self) -> &QueryError {
        match self {
            LogsVolumeError::Upstream(e) | LogsVolumeError::EmbeddedBatch(e) => e,
        }
    }

    pub fn log_error(&self) {
        match self {
            LogsVolumeError::Upstream(e) => {
                error!("Upstream query channel failed: {}", e);
                debug!("Upstream error details: {:?}", e);
            }
            LogsVolumeError::EmbeddedBatch(e) => {
                error!("Query response carried an error: {}", e);
                debug!("Embedded error details: {:?}", e);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("Field '{field}' has {got} values, expected {expected}")]
    InconsistentFieldLength {
        field: String,
        expected: usize,
        got: usize,
    },

    #[error("Frame declares more than one time field")]
    DuplicateTimeField,

    #[error("Field not found: {0}")]
    FieldNotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeRangeError {
    #[error("Time range is inverted: from {from} is after to {to}")]
    Inverted { from: i64, to: i64 },

    #[error("Timestamp {0} ms is outside the representable range")]
    OutOfRange(i64),
}

/// Raised when the database side would need sub-second truncation, which has
/// no rounding function. Callers log it and fall back to second-level rounding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Millisecond rounding is not supported for column '{column}'")]
pub struct UnsupportedResolution {
    pub column: String,
}
