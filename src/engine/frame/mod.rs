mod data_frame;
mod field;

pub use data_frame::{DataFrame, QueryResponse};
pub use field::{Field, FieldValues, LOGS_FIELD, TIME_FIELD};

#[cfg(test)]
mod data_frame_test;
