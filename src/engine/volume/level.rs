use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Normalized log severity. Raw level names from the source fold onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalLevel {
    Critical,
    Error,
    Warning,
    Info,
    Debug,
    Trace,
    Unknown,
}

impl CanonicalLevel {
    pub const ALL: [CanonicalLevel; 7] = [
        CanonicalLevel::Critical,
        CanonicalLevel::Error,
        CanonicalLevel::Warning,
        CanonicalLevel::Info,
        CanonicalLevel::Debug,
        CanonicalLevel::Trace,
        CanonicalLevel::Unknown,
    ];

    /// Maps any raw level name to a canonical level, `Unknown` when no
    /// synonym matches. Case-insensitive.
    pub fn classify(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "emerg" | "fatal" | "alert" | "crit" | "critical" => CanonicalLevel::Critical,
            "err" | "eror" | "error" => CanonicalLevel::Error,
            "warn" | "warning" => CanonicalLevel::Warning,
            "info" | "information" | "informational" | "notice" => CanonicalLevel::Info,
            "dbug" | "debug" => CanonicalLevel::Debug,
            "trace" => CanonicalLevel::Trace,
            _ => CanonicalLevel::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalLevel::Critical => "critical",
            CanonicalLevel::Error => "error",
            CanonicalLevel::Warning => "warning",
            CanonicalLevel::Info => "info",
            CanonicalLevel::Debug => "debug",
            CanonicalLevel::Trace => "trace",
            CanonicalLevel::Unknown => "unknown",
        }
    }

    /// Fixed chart color for the level.
    pub fn color(&self) -> &'static str {
        match self {
            CanonicalLevel::Critical => "#705da0",
            CanonicalLevel::Error => "#e24d42",
            CanonicalLevel::Warning => "#eab839",
            CanonicalLevel::Info => "#7eb26d",
            CanonicalLevel::Debug => "#1f78c1",
            CanonicalLevel::Trace => "#6ed0e0",
            CanonicalLevel::Unknown => "#8e8e8e",
        }
    }
}

impl fmt::Display for CanonicalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalLevel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::classify(s))
    }
}
