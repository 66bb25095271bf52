use tracing::warn;

use crate::engine::errors::UnsupportedResolution;

pub const SECOND_MS: u64 = 1_000;
pub const MINUTE_MS: u64 = 60 * SECOND_MS;
pub const HOUR_MS: u64 = 60 * MINUTE_MS;
pub const DAY_MS: u64 = 24 * HOUR_MS;

/// Spans shorter than this force millisecond buckets: the smallest interval a
/// caller hints (10ms) is too coarse for them.
pub const MIN_HINTED_SPAN_MS: u64 = 5_000;

/// Label handed to query construction when no explicit width is chosen.
pub const DEFAULT_INTERVAL_LABEL: &str = "$__interval";

/// Fixed bucket widths a logs volume histogram can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BucketWidth {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
}

impl BucketWidth {
    /// Snaps a hinted interval upward to the next fixed width.
    pub fn snap(hint_ms: u64) -> Self {
        if hint_ms > HOUR_MS {
            BucketWidth::Day
        } else if hint_ms > MINUTE_MS {
            BucketWidth::Hour
        } else if hint_ms > SECOND_MS {
            BucketWidth::Minute
        } else {
            BucketWidth::Second
        }
    }

    pub fn as_millis(&self) -> u64 {
        match self {
            BucketWidth::Millisecond => 1,
            BucketWidth::Second => SECOND_MS,
            BucketWidth::Minute => MINUTE_MS,
            BucketWidth::Hour => HOUR_MS,
            BucketWidth::Day => DAY_MS,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BucketWidth::Millisecond => "1ms",
            BucketWidth::Second => "1s",
            BucketWidth::Minute => "1m",
            BucketWidth::Hour => "1h",
            BucketWidth::Day => "1d",
        }
    }

    /// Database interval unit, `None` where no truncation function exists.
    pub fn sql_unit(&self) -> Option<&'static str> {
        match self {
            BucketWidth::Millisecond => None,
            BucketWidth::Second => Some("SECOND"),
            BucketWidth::Minute => Some("MINUTE"),
            BucketWidth::Hour => Some("HOUR"),
            BucketWidth::Day => Some("DAY"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalInfo {
    /// Let the downstream system pick its default interval.
    Default,
    Fixed(BucketWidth),
}

impl IntervalInfo {
    pub fn label(&self) -> &'static str {
        match self {
            IntervalInfo::Default => DEFAULT_INTERVAL_LABEL,
            IntervalInfo::Fixed(width) => width.label(),
        }
    }

    pub fn interval_ms(&self) -> Option<u64> {
        match self {
            IntervalInfo::Default => None,
            IntervalInfo::Fixed(width) => Some(width.as_millis()),
        }
    }

    pub fn width(&self) -> Option<BucketWidth> {
        match self {
            IntervalInfo::Default => None,
            IntervalInfo::Fixed(width) => Some(*width),
        }
    }
}

/// Resolves the histogram bucket for a query spanning `time_span_ms`.
pub fn resolve_interval(requested_ms: Option<u64>, time_span_ms: u64) -> IntervalInfo {
    let Some(hint) = requested_ms else {
        return IntervalInfo::Default;
    };

    if time_span_ms < MIN_HINTED_SPAN_MS {
        return IntervalInfo::Fixed(BucketWidth::Millisecond);
    }

    IntervalInfo::Fixed(BucketWidth::snap(hint))
}

/// Time truncation expression for `column`, aligned with `resolve_interval`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundingClause {
    pub expression: String,
    pub width: BucketWidth,
    pub diagnostic: Option<UnsupportedResolution>,
}

pub fn time_rounding_clause(
    requested_ms: Option<u64>,
    time_span_ms: u64,
    column: &str,
) -> RoundingClause {
    let (width, diagnostic) = match resolve_interval(requested_ms, time_span_ms) {
        IntervalInfo::Default => (BucketWidth::Day, None),
        IntervalInfo::Fixed(BucketWidth::Millisecond) => {
            let diagnostic = UnsupportedResolution {
                column: column.to_string(),
            };
            warn!(target: "logs_volume::interval", "{}, rounding to seconds", diagnostic);
            (BucketWidth::Second, Some(diagnostic))
        }
        IntervalInfo::Fixed(width) => (width, None),
    };

    // Every width reaching this point has a unit.
    let unit = width.sql_unit().unwrap_or("SECOND");
    RoundingClause {
        expression: format!(
            "toStartOfInterval({}, INTERVAL 1 {})",
            quote_identifier(column),
            unit
        ),
        width,
        diagnostic,
    }
}

fn quote_identifier(column: &str) -> String {
    format!("\"{}\"", column.replace('"', "\"\""))
}
