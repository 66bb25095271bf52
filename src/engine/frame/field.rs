use serde::{Deserialize, Serialize};

/// Canonical name of the time column in every logs volume frame.
pub const TIME_FIELD: &str = "time";

/// Name used by sources that count logs without splitting them by level.
pub const LOGS_FIELD: &str = "logs";

/// Column storage. Time values are epoch milliseconds; numbers are
/// three-valued (value, zero or null).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldValues {
    Time(Vec<i64>),
    Number(Vec<Option<f64>>),
}

impl FieldValues {
    pub fn len(&self) -> usize {
        match self {
            FieldValues::Time(v) => v.len(),
            FieldValues::Number(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub values: FieldValues,
}

impl Field {
    pub fn time(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            values: FieldValues::Time(values),
        }
    }

    pub fn number(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values: FieldValues::Number(values),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_time(&self) -> bool {
        matches!(self.values, FieldValues::Time(_))
    }

    pub fn as_numbers(&self) -> Option<&[Option<f64>]> {
        match &self.values {
            FieldValues::Number(v) => Some(v.as_slice()),
            FieldValues::Time(_) => None,
        }
    }

    pub fn as_times(&self) -> Option<&[i64]> {
        match &self.values {
            FieldValues::Time(v) => Some(v.as_slice()),
            FieldValues::Number(_) => None,
        }
    }
}
