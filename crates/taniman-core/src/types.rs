use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    English,
    Tagalog,
}

impl Language {
    /// Pick the string matching the user's language. Mirrors the bilingual
    /// prompt pairs used throughout the conversation.
    pub fn pick<'a>(self, english: &'a str, tagalog: &'a str) -> &'a str {
        match self {
            Language::English => english,
            Language::Tagalog => tagalog,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Tagalog => "tagalog",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = crate::error::TanimanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "tagalog" | "tl" | "filipino" => Ok(Language::Tagalog),
            _ => Err(crate::error::TanimanError::UnknownValue(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Which branch of the workflow the user is in: still planning a garden, or
/// tending one that is already in the ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Planning,
    Planted,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Planning => "planning",
            Mode::Planted => "planted",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = crate::error::TanimanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "planning" => Ok(Mode::Planning),
            "planted" => Ok(Mode::Planted),
            _ => Err(crate::error::TanimanError::UnknownValue(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// PlantingMedium
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlantingMedium {
    InGround,
    Pots,
}

impl PlantingMedium {
    pub fn as_str(self) -> &'static str {
        match self {
            PlantingMedium::InGround => "in-ground",
            PlantingMedium::Pots => "pots",
        }
    }
}

impl fmt::Display for PlantingMedium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PlantingMedium {
    type Err = crate::error::TanimanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "in-ground" | "ground" | "in_ground" => Ok(PlantingMedium::InGround),
            "pots" | "pot" => Ok(PlantingMedium::Pots),
            _ => Err(crate::error::TanimanError::UnknownValue(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// PlantedChoice
// ---------------------------------------------------------------------------

/// The three paths offered at the top of the already-planted branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantedChoice {
    HarvestSchedule,
    Replanting,
    QuestionsOnly,
}

impl PlantedChoice {
    pub fn as_str(self) -> &'static str {
        match self {
            PlantedChoice::HarvestSchedule => "harvest_schedule",
            PlantedChoice::Replanting => "replanting",
            PlantedChoice::QuestionsOnly => "questions_only",
        }
    }
}

impl fmt::Display for PlantedChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn language_pick() {
        assert_eq!(Language::English.pick("hello", "kumusta"), "hello");
        assert_eq!(Language::Tagalog.pick("hello", "kumusta"), "kumusta");
    }

    #[test]
    fn language_roundtrip() {
        for lang in [Language::English, Language::Tagalog] {
            assert_eq!(Language::from_str(lang.as_str()).unwrap(), lang);
        }
        assert_eq!(Language::from_str("tl").unwrap(), Language::Tagalog);
    }

    #[test]
    fn mode_roundtrip() {
        assert_eq!(Mode::from_str("planning").unwrap(), Mode::Planning);
        assert_eq!(Mode::from_str("planted").unwrap(), Mode::Planted);
        assert!(Mode::from_str("harvesting").is_err());
    }

    #[test]
    fn medium_accepts_aliases() {
        assert_eq!(
            PlantingMedium::from_str("ground").unwrap(),
            PlantingMedium::InGround
        );
        assert_eq!(PlantingMedium::from_str("pots").unwrap(), PlantingMedium::Pots);
        assert_eq!(PlantingMedium::InGround.to_string(), "in-ground");
    }
}
