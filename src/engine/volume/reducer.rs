use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::engine::frame::{DataFrame, Field, LOGS_FIELD};

use super::level::CanonicalLevel;
use super::series::{LevelSeries, SeriesDisplay};

/// Point-wise fold of two three-valued counts: null only when both are null,
/// otherwise nulls count as zero.
pub fn fold_value(acc: Option<f64>, incoming: Option<f64>) -> Option<f64> {
    match (acc, incoming) {
        (None, None) => None,
        (a, b) => Some(a.unwrap_or(0.0) + b.unwrap_or(0.0)),
    }
}

/// Running per-level sum over the rows of the time column.
#[derive(Debug, Clone)]
struct LevelAccumulator {
    values: Vec<Option<f64>>,
}

impl LevelAccumulator {
    fn new(rows: usize) -> Self {
        Self {
            values: vec![None; rows],
        }
    }

    fn fold(&mut self, incoming: &[Option<f64>]) {
        for (acc, value) in self.values.iter_mut().zip(incoming) {
            *acc = fold_value(*acc, *value);
        }
    }
}

/// Reduces the raw frames of one logs volume query into one series per
/// canonical level, in first-seen order.
///
/// Only a single wide frame is accepted. Anything else, or a frame without a
/// time column, yields no series. Levels whose folded values are all null or
/// zero are dropped.
pub fn aggregate_raw_logs_volume(frames: &[DataFrame]) -> Vec<LevelSeries> {
    let [frame] = frames else {
        warn!(
            target: "logs_volume::reducer",
            frames = frames.len(),
            "expected exactly one raw frame, producing no series"
        );
        return Vec::new();
    };

    let Some(times) = frame.time_field().and_then(Field::as_times) else {
        warn!(target: "logs_volume::reducer", "raw frame has no time column, producing no series");
        return Vec::new();
    };

    let value_fields: Vec<&Field> = frame.value_fields().collect();
    let lone_logs_column = matches!(value_fields.as_slice(), [only] if only.name == LOGS_FIELD);

    let mut levels: IndexMap<CanonicalLevel, LevelAccumulator> = IndexMap::new();
    for field in &value_fields {
        let Some(values) = field.as_numbers() else {
            continue;
        };
        let level = CanonicalLevel::classify(&field.name);
        debug!(
            target: "logs_volume::reducer",
            raw = %field.name,
            level = %level,
            "folding column"
        );
        levels
            .entry(level)
            .or_insert_with(|| LevelAccumulator::new(times.len()))
            .fold(values);
    }

    levels
        .into_iter()
        .map(|(level, acc)| {
            let display_name = if lone_logs_column && level == CanonicalLevel::Unknown {
                LOGS_FIELD
            } else {
                level.as_str()
            };
            LevelSeries {
                level,
                times: times.to_vec(),
                values: acc.values,
                display: SeriesDisplay::stacked_bars(display_name, level),
            }
        })
        .filter(LevelSeries::has_non_zero_value)
        .collect()
}
