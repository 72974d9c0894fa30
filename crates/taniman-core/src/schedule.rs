use crate::error::{Result, TanimanError};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Month helpers
// ---------------------------------------------------------------------------

pub const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn month_abbrev(month: u32) -> &'static str {
    MONTH_ABBREV
        .get((month as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("?")
}

/// Months covered by a window, inclusive. A window whose end precedes its
/// start wraps across year-end: (11, 2) covers Nov, Dec, Jan, Feb. It is
/// never empty.
pub fn window_months(start: u32, end: u32) -> Vec<u32> {
    if start <= end {
        (start..=end).collect()
    } else {
        (start..=12).chain(1..=end).collect()
    }
}

// ---------------------------------------------------------------------------
// VegetableSchedule
// ---------------------------------------------------------------------------

/// One vegetable's planting and harvesting windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VegetableSchedule {
    pub vegetable: String,
    pub plant_start_month: u32,
    pub plant_end_month: u32,
    pub harvest_start_month: u32,
    pub harvest_end_month: u32,
    /// Companion plant, with the reason it helps.
    #[serde(default)]
    pub companion_plant: String,
}

impl VegetableSchedule {
    pub fn validate(&self) -> Result<()> {
        for m in [
            self.plant_start_month,
            self.plant_end_month,
            self.harvest_start_month,
            self.harvest_end_month,
        ] {
            if !(1..=12).contains(&m) {
                return Err(TanimanError::InvalidMonth(m));
            }
        }
        Ok(())
    }

    pub fn plant_months(&self) -> Vec<u32> {
        window_months(self.plant_start_month, self.plant_end_month)
    }

    pub fn harvest_months(&self) -> Vec<u32> {
        window_months(self.harvest_start_month, self.harvest_end_month)
    }

    pub fn is_plant_month(&self, month: u32) -> bool {
        self.plant_months().contains(&month)
    }

    /// "Nov → Feb" style label for tables.
    pub fn plant_window_label(&self) -> String {
        format!(
            "{} → {}",
            month_abbrev(self.plant_start_month),
            month_abbrev(self.plant_end_month)
        )
    }

    pub fn harvest_window_label(&self) -> String {
        format!(
            "{} → {}",
            month_abbrev(self.harvest_start_month),
            month_abbrev(self.harvest_end_month)
        )
    }
}

// ---------------------------------------------------------------------------
// ScheduleResult
// ---------------------------------------------------------------------------

/// The stored output of a schedule-generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub entries: Vec<VegetableSchedule>,
    #[serde(default)]
    pub notes: String,
}

impl ScheduleResult {
    pub fn validate(&self) -> Result<()> {
        for entry in &self.entries {
            entry.validate()?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ps: u32, pe: u32, hs: u32, he: u32) -> VegetableSchedule {
        VegetableSchedule {
            vegetable: "tomato".to_string(),
            plant_start_month: ps,
            plant_end_month: pe,
            harvest_start_month: hs,
            harvest_end_month: he,
            companion_plant: "basil — repels pests".to_string(),
        }
    }

    #[test]
    fn plain_window() {
        let e = entry(3, 6, 6, 8);
        assert_eq!(e.plant_months(), vec![3, 4, 5, 6]);
        assert!(e.is_plant_month(4));
        assert!(!e.is_plant_month(7));
    }

    #[test]
    fn wraparound_window() {
        let e = entry(11, 2, 1, 4);
        assert_eq!(e.plant_months(), vec![11, 12, 1, 2]);
        for m in [11, 12, 1, 2] {
            assert!(e.is_plant_month(m), "month {m} should be active");
        }
        for m in 3..=10 {
            assert!(!e.is_plant_month(m), "month {m} should be inactive");
        }
    }

    #[test]
    fn single_month_window() {
        assert_eq!(window_months(5, 5), vec![5]);
    }

    #[test]
    fn validate_rejects_bad_month() {
        assert!(entry(0, 2, 3, 4).validate().is_err());
        assert!(entry(1, 13, 3, 4).validate().is_err());
        assert!(entry(11, 2, 1, 4).validate().is_ok());
    }

    #[test]
    fn window_labels() {
        let e = entry(11, 2, 1, 4);
        assert_eq!(e.plant_window_label(), "Nov → Feb");
        assert_eq!(e.harvest_window_label(), "Jan → Apr");
    }

    #[test]
    fn schedule_result_yaml_roundtrip() {
        let result = ScheduleResult {
            entries: vec![entry(11, 2, 1, 4)],
            notes: "Cool dry season favors leafy greens.".to_string(),
        };
        let yaml = serde_yaml::to_string(&result).unwrap();
        let parsed: ScheduleResult = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, result);
    }
}
