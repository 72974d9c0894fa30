//! Harvest countdown estimator.
//!
//! Pure date arithmetic: vegetable name + planted date + today →
//! a harvest window and a discrete countdown bucket. No hidden state;
//! re-running with the same inputs always classifies the same way.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Reference table
// ---------------------------------------------------------------------------

/// Days-to-harvest used when a vegetable is absent from the table and no
/// substring key matches.
pub const FALLBACK_DAYS: (i64, i64) = (60, 90);

/// (name, min days, max days), in definition order. Order is significant:
/// substring resolution returns the first matching row, so ties resolve
/// reproducibly. English names first, then common Filipino names.
const BUILTIN_TABLE: &[(&str, i64, i64)] = &[
    ("tomato", 60, 85),
    ("eggplant", 70, 90),
    ("okra", 50, 65),
    ("spinach", 40, 50),
    ("lettuce", 45, 60),
    ("carrot", 70, 80),
    ("radish", 25, 35),
    ("cucumber", 50, 70),
    ("pepper", 60, 90),
    ("onion", 90, 120),
    ("garlic", 90, 120),
    ("ginger", 210, 240),
    ("corn", 60, 100),
    ("squash", 80, 100),
    ("string beans", 50, 70),
    ("bitter gourd", 55, 70),
    ("sweet potato", 90, 120),
    ("kangkong", 30, 45),
    ("pechay", 30, 45),
    ("kamatis", 60, 85),
    ("talong", 70, 90),
    ("ampalaya", 55, 70),
    ("sitaw", 50, 70),
    ("kalabasa", 80, 100),
    ("sibuyas", 90, 120),
    ("bawang", 90, 120),
    ("luya", 210, 240),
    ("mais", 60, 100),
    ("sili", 60, 90),
    ("pipino", 50, 70),
    ("labanos", 25, 35),
    ("kamote", 90, 120),
];

/// Reference table of (min, max) days-to-harvest per vegetable.
#[derive(Debug, Clone)]
pub struct HarvestTable {
    rows: Vec<(String, i64, i64)>,
}

impl HarvestTable {
    pub fn new(rows: Vec<(String, i64, i64)>) -> Self {
        Self { rows }
    }

    /// The built-in table of common Philippine garden vegetables.
    pub fn builtin() -> Self {
        Self {
            rows: BUILTIN_TABLE
                .iter()
                .map(|&(n, lo, hi)| (n.to_string(), lo, hi))
                .collect(),
        }
    }

    /// Resolve a vegetable name to its (min, max) days-to-harvest.
    ///
    /// Exact case-insensitive match first; then a substring match in either
    /// direction against every key, first row wins; else [`FALLBACK_DAYS`].
    pub fn resolve(&self, name: &str) -> (i64, i64) {
        let needle = name.trim().to_lowercase();

        for (key, lo, hi) in &self.rows {
            if *key == needle {
                return (*lo, *hi);
            }
        }
        for (key, lo, hi) in &self.rows {
            if needle.contains(key.as_str()) || key.contains(&needle) {
                return (*lo, *hi);
            }
        }

        tracing::debug!(vegetable = %name, "no days-to-harvest entry, using fallback");
        FALLBACK_DAYS
    }
}

// ---------------------------------------------------------------------------
// Bucket
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Ready,
    Past,
    Soon,
    Later,
}

impl Bucket {
    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Ready => "ready",
            Bucket::Past => "past",
            Bucket::Soon => "soon",
            Bucket::Later => "later",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Estimate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarvestEstimate {
    pub range_start: NaiveDate,
    pub range_end: NaiveDate,
    pub bucket: Bucket,
    /// Days until the window opens; negative once it has.
    pub days_left: i64,
}

/// Classify the harvest countdown for one vegetable.
pub fn estimate(
    table: &HarvestTable,
    vegetable: &str,
    planted: NaiveDate,
    today: NaiveDate,
) -> HarvestEstimate {
    let (min_days, max_days) = table.resolve(vegetable);
    let range_start = planted + Duration::days(min_days);
    let range_end = planted + Duration::days(max_days);
    let days_left = (range_start - today).num_days();

    // Precedence order matters at the boundaries: first match wins.
    let bucket = if days_left <= 0 && today <= range_end {
        Bucket::Ready
    } else if today > range_end {
        Bucket::Past
    } else if days_left <= 14 {
        Bucket::Soon
    } else {
        Bucket::Later
    };

    HarvestEstimate {
        range_start,
        range_end,
        bucket,
        days_left,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
