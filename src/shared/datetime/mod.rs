pub mod interval;
pub mod time_range;

pub use interval::{
    BucketWidth, IntervalInfo, RoundingClause, resolve_interval, time_rounding_clause,
};
pub use time_range::{AbsoluteRange, TimeRange};

#[cfg(test)]
mod time_range_test;
