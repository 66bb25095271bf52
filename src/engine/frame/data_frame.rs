use serde::{Deserialize, Serialize};

use crate::engine::errors::{FrameError, QueryError};

use super::field::{Field, TIME_FIELD};

/// A wide result table: one time column plus any number of value columns.
/// Every field holds the same number of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FrameParts")]
pub struct DataFrame {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    fields: Vec<Field>,
    #[serde(skip)]
    len: usize,
}

#[derive(Deserialize)]
struct FrameParts {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    fields: Vec<Field>,
}

impl TryFrom<FrameParts> for DataFrame {
    type Error = FrameError;

    fn try_from(parts: FrameParts) -> Result<Self, Self::Error> {
        let frame = DataFrame::new(parts.fields)?;
        Ok(match parts.name {
            Some(name) => frame.with_name(name),
            None => frame,
        })
    }
}

impl DataFrame {
    pub fn new(fields: Vec<Field>) -> Result<Self, FrameError> {
        let len = fields.first().map(Field::len).unwrap_or(0);

        for field in &fields {
            if field.len() != len {
                return Err(FrameError::InconsistentFieldLength {
                    field: field.name.clone(),
                    expected: len,
                    got: field.len(),
                });
            }
        }

        let time_fields = fields
            .iter()
            .filter(|f| f.is_time() && f.name == TIME_FIELD)
            .count();
        if time_fields > 1 {
            return Err(FrameError::DuplicateTimeField);
        }

        Ok(Self {
            name: None,
            fields,
            len,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Row count shared by all fields.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Result<&Field, FrameError> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| FrameError::FieldNotFound(name.to_string()))
    }

    pub fn time_field(&self) -> Option<&Field> {
        self.fields
            .iter()
            .find(|f| f.is_time() && f.name == TIME_FIELD)
    }

    /// Numeric fields other than the time column, in declaration order.
    pub fn value_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .filter(|f| !(f.is_time() && f.name == TIME_FIELD))
            .filter(|f| f.as_numbers().is_some())
    }
}

/// One delivery from the upstream query channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub frames: Vec<DataFrame>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<QueryError>,
}

impl QueryResponse {
    pub fn new(frames: Vec<DataFrame>) -> Self {
        Self {
            frames,
            error: None,
        }
    }

    pub fn failed(error: QueryError) -> Self {
        Self {
            frames: Vec::new(),
            error: Some(error),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}
