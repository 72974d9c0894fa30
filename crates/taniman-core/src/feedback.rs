//! User feedback capture.
//!
//! Ratings and free-text survey answers are appended to a local YAML file
//! so a hosted deployment can collect them from any store it likes; the
//! core only guarantees an atomic, append-only record.

use crate::error::Result;
use crate::io;
use crate::types::Mode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Overall usefulness, a five-step scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    NotUseful,
    SomewhatUseful,
    Useful,
    VeryUseful,
    Excellent,
}

impl Rating {
    pub fn as_str(self) -> &'static str {
        match self {
            Rating::NotUseful => "not_useful",
            Rating::SomewhatUseful => "somewhat_useful",
            Rating::Useful => "useful",
            Rating::VeryUseful => "very_useful",
            Rating::Excellent => "excellent",
        }
    }
}

impl std::str::FromStr for Rating {
    type Err = crate::error::TanimanError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "not_useful" => Ok(Rating::NotUseful),
            "somewhat_useful" => Ok(Rating::SomewhatUseful),
            "useful" => Ok(Rating::Useful),
            "very_useful" => Ok(Rating::VeryUseful),
            "excellent" => Ok(Rating::Excellent),
            other => Err(crate::error::TanimanError::UnknownValue(other.to_string())),
        }
    }
}

/// Would the user recommend the assistant to other gardeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommend {
    Yes,
    Maybe,
    No,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub timestamp: DateTime<Utc>,
    pub rating: Rating,
    #[serde(default)]
    pub what_worked: String,
    #[serde(default)]
    pub what_to_improve: String,
    pub recommend: Recommend,
    /// Optional contact email for follow-up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// Session context captured alongside the survey, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

fn load_all(path: &Path) -> Result<Vec<FeedbackEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_yaml::from_str(&content)?)
}

fn save_all(path: &Path, entries: &[FeedbackEntry]) -> Result<()> {
    let content = serde_yaml::to_string(entries)?;
    io::atomic_write(path, content.as_bytes())
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Append one feedback entry. Existing entries are never rewritten.
pub fn record(path: &Path, entry: FeedbackEntry) -> Result<()> {
    let mut entries = load_all(path)?;
    entries.push(entry);
    save_all(path, &entries)
}

/// List all recorded feedback (oldest first).
pub fn list(path: &Path) -> Result<Vec<FeedbackEntry>> {
    load_all(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(rating: Rating) -> FeedbackEntry {
        FeedbackEntry {
            timestamp: Utc::now(),
            rating,
            what_worked: "The harvest tracker".to_string(),
            what_to_improve: String::new(),
            recommend: Recommend::Yes,
            contact: None,
            location: Some("Cebu".to_string()),
            mode: Some(Mode::Planted),
        }
    }

    #[test]
    fn record_and_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feedback.yaml");
        record(&path, entry(Rating::Useful)).unwrap();
        record(&path, entry(Rating::Excellent)).unwrap();

        let entries = list(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].rating, Rating::Useful);
        assert_eq!(entries[1].rating, Rating::Excellent);
    }

    #[test]
    fn list_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let entries = list(&dir.path().join("feedback.yaml")).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn yaml_round_trips_optional_fields() {
        let e = FeedbackEntry {
            contact: Some("you@example.com".to_string()),
            ..entry(Rating::VeryUseful)
        };
        let yaml = serde_yaml::to_string(&[e]).unwrap();
        assert!(yaml.contains("very_useful"));
        let parsed: Vec<FeedbackEntry> = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed[0].contact.as_deref(), Some("you@example.com"));
    }

    #[test]
    fn rating_parses_from_str() {
        let rating: Rating = "excellent".parse().unwrap();
        assert_eq!(rating, Rating::Excellent);
        assert!("amazing".parse::<Rating>().is_err());
    }
}
