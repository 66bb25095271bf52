use crate::engine::frame::{DataFrame, Field, TIME_FIELD};

pub struct FrameFactory {
    name: Option<String>,
    fields: Vec<Field>,
}

impl FrameFactory {
    pub fn new() -> Self {
        Self {
            name: None,
            fields: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_times(mut self, times: &[i64]) -> Self {
        self.fields.push(Field::time(TIME_FIELD, times.to_vec()));
        self
    }

    pub fn with_counts(mut self, level: &str, counts: &[f64]) -> Self {
        self.fields.push(Field::number(
            level,
            counts.iter().copied().map(Some).collect(),
        ));
        self
    }

    pub fn with_values(mut self, level: &str, values: &[Option<f64>]) -> Self {
        self.fields.push(Field::number(level, values.to_vec()));
        self
    }

    pub fn create(self) -> DataFrame {
        let frame = DataFrame::new(self.fields).expect("factory frame is consistent");
        match self.name {
            Some(name) => frame.with_name(name),
            None => frame,
        }
    }
}
