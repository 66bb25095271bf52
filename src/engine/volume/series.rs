use serde::{Deserialize, Serialize};

use crate::engine::errors::FrameError;
use crate::engine::frame::{DataFrame, Field, TIME_FIELD};
use crate::shared::datetime::AbsoluteRange;

use super::level::CanonicalLevel;

/// Name of the value column when a series is promoted to a frame.
pub const VALUE_FIELD: &str = "Value";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawStyle {
    Bars,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarAlignment {
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackingMode {
    Normal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stacking {
    pub mode: StackingMode,
    pub group: String,
}

/// Render hints passed through to the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesDisplay {
    pub display_name: String,
    pub color: String,
    pub draw_style: DrawStyle,
    pub bar_alignment: BarAlignment,
    pub fill_opacity: u8,
    pub line_width: u8,
    pub stacking: Stacking,
}

impl SeriesDisplay {
    /// Stacked, centered bars in the level's palette color.
    pub fn stacked_bars(display_name: impl Into<String>, level: CanonicalLevel) -> Self {
        Self {
            display_name: display_name.into(),
            color: level.color().to_string(),
            draw_style: DrawStyle::Bars,
            bar_alignment: BarAlignment::Center,
            fill_opacity: 100,
            line_width: 1,
            stacking: Stacking {
                mode: StackingMode::Normal,
                group: "A".to_string(),
            },
        }
    }
}

/// Histogram series for one canonical level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSeries {
    pub level: CanonicalLevel,
    pub times: Vec<i64>,
    pub values: Vec<Option<f64>>,
    pub display: SeriesDisplay,
}

impl LevelSeries {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn has_non_zero_value(&self) -> bool {
        self.values.iter().flatten().any(|v| *v > 0.0)
    }

    /// Sum of present values.
    pub fn total(&self) -> f64 {
        self.values.iter().flatten().sum()
    }

    pub fn to_frame(&self) -> Result<DataFrame, FrameError> {
        Ok(DataFrame::new(vec![
            Field::time(TIME_FIELD, self.times.clone()),
            Field::number(VALUE_FIELD, self.values.clone()),
        ])?
        .with_name(self.display.display_name.clone()))
    }
}

/// Echo of what was asked for, for display and debugging downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub targets: Vec<QueryTarget>,
    pub absolute_range: AbsoluteRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTarget {
    pub ref_id: String,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasource: Option<String>,
}

impl QueryTarget {
    pub fn new(ref_id: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            ref_id: ref_id.into(),
            query: query.into(),
            datasource: None,
        }
    }
}

/// Final output of a logs volume run. `provenance` is set only when at least
/// one series was produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub series: Vec<LevelSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
}

impl AggregationResult {
    pub fn new(series: Vec<LevelSeries>, provenance: Provenance) -> Self {
        let provenance = if series.is_empty() {
            None
        } else {
            Some(provenance)
        };
        Self { series, provenance }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn levels(&self) -> Vec<CanonicalLevel> {
        self.series.iter().map(|s| s.level).collect()
    }

    pub fn series_for(&self, level: CanonicalLevel) -> Option<&LevelSeries> {
        self.series.iter().find(|s| s.level == level)
    }
}
