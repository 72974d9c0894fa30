use crate::advisor::{AdvisorContext, PreparationResult, ReplantingResult, ResearchResult};
use crate::schedule::ScheduleResult;
use crate::stage::Stage;
use crate::types::{Language, Mode, PlantingMedium};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// All state that survives between interactions of one conversation.
///
/// The hosting environment re-evaluates the whole control flow on every
/// interaction; everything needed to resume lives here. One per
/// conversation, ephemeral, no cross-restart persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub stage: Stage,

    // Context — each set once, early in the dialogue, then immutable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planting_medium: Option<PlantingMedium>,

    /// Recommended + user-added vegetable names, append-only in order.
    #[serde(default)]
    pub vegetables: Vec<String>,
    /// The subset of `vegetables` the user added explicitly during the
    /// feedback loop, kept separately for display attribution.
    #[serde(default)]
    pub extra_vegetables: Vec<String>,

    // Collaborator outputs — each set once per round by the matching call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_output: Option<ResearchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_output: Option<ScheduleResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation_output: Option<PreparationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replanting_output: Option<ReplantingResult>,

    /// Planting dates entered in one batch form, read by the estimator.
    #[serde(default)]
    pub planted_dates: BTreeMap<String, NaiveDate>,

    /// Sparse plot map from the optional design sub-flow: "row_col" → name.
    #[serde(default)]
    pub garden_grid: BTreeMap<String, String>,

    /// Set when a replanting round begins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harvested_vegetable: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            stage: Stage::NeedLocation,
            location: None,
            language: None,
            mode: None,
            planting_medium: None,
            vegetables: Vec::new(),
            extra_vegetables: Vec::new(),
            research_output: None,
            schedule_output: None,
            preparation_output: None,
            replanting_output: None,
            planted_dates: BTreeMap::new(),
            garden_grid: BTreeMap::new(),
            harvested_vegetable: None,
        }
    }

    /// Explicit restart: the only way any accumulated state is cleared.
    pub fn restart(&mut self) {
        *self = Self::new();
    }

    /// English until the user picks a language.
    pub fn language_or_default(&self) -> Language {
        self.language.unwrap_or(Language::English)
    }

    /// Append a vegetable. The lists are append-only: every add lands, in
    /// order, so `extra_vegetables` records exactly what the user typed.
    pub fn add_vegetable(&mut self, name: &str, user_added: bool) {
        let name = name.trim();
        self.vegetables.push(name.to_string());
        if user_added {
            self.extra_vegetables.push(name.to_string());
        }
    }

    /// True if the vegetable is already listed, case-insensitively.
    pub fn has_vegetable(&self, name: &str) -> bool {
        self.vegetables.iter().any(|v| v.eq_ignore_ascii_case(name))
    }

    /// Comma-joined vegetable list, the shape collaborators take.
    pub fn vegetables_joined(&self) -> String {
        self.vegetables.join(", ")
    }

    /// The context bundle for collaborator calls. `previous_year_label` is
    /// two years back, matching the historical-weather reference window.
    pub fn advisor_context(&self, today: NaiveDate) -> AdvisorContext {
        AdvisorContext {
            location: self.location.clone().unwrap_or_default(),
            language: self.language_or_default(),
            planting_medium: self.planting_medium,
            previous_year_label: (today.year() - 2).to_string(),
        }
    }
}

/// Key for one plot in the garden grid.
pub fn grid_key(row: u32, col: u32) -> String {
    format!("{row}_{col}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_at_location() {
        let state = SessionState::new();
        assert_eq!(state.stage, Stage::NeedLocation);
        assert!(state.vegetables.is_empty());
        assert!(!state.stage.is_qa_open());
    }

    #[test]
    fn add_vegetable_trims_and_appends() {
        let mut state = SessionState::new();
        state.add_vegetable("  Tomato ", false);
        assert_eq!(state.vegetables, vec!["Tomato"]);
        assert!(state.extra_vegetables.is_empty());
        assert!(state.has_vegetable("tomato"));
        assert!(!state.has_vegetable("okra"));
    }

    #[test]
    fn user_added_vegetables_attributed() {
        let mut state = SessionState::new();
        state.add_vegetable("okra", false);
        state.add_vegetable("sitaw", true);
        state.add_vegetable("pechay", true);
        assert_eq!(state.vegetables, vec!["okra", "sitaw", "pechay"]);
        assert_eq!(state.extra_vegetables, vec!["sitaw", "pechay"]);
    }

    #[test]
    fn advisor_context_previous_year() {
        let mut state = SessionState::new();
        state.location = Some("Cebu".to_string());
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let ctx = state.advisor_context(today);
        assert_eq!(ctx.previous_year_label, "2024");
        assert_eq!(ctx.location, "Cebu");
        assert_eq!(ctx.language, Language::English);
    }

    #[test]
    fn restart_clears_everything() {
        let mut state = SessionState::new();
        state.location = Some("Davao".to_string());
        state.language = Some(Language::Tagalog);
        state.stage = Stage::OpenQa;
        state.add_vegetable("talong", true);

        state.restart();
        assert_eq!(state.stage, Stage::NeedLocation);
        assert!(state.location.is_none());
        assert!(state.vegetables.is_empty());
        assert!(state.extra_vegetables.is_empty());
    }

    #[test]
    fn session_yaml_roundtrip() {
        let mut state = SessionState::new();
        state.location = Some("Iloilo".to_string());
        state.stage = Stage::AwaitingFeedback;
        state.add_vegetable("kangkong", false);
        state
            .planted_dates
            .insert("okra".to_string(), NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());

        let yaml = serde_yaml::to_string(&state).unwrap();
        let parsed: SessionState = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.stage, Stage::AwaitingFeedback);
        assert_eq!(parsed.vegetables, vec!["kangkong"]);
        assert_eq!(parsed.planted_dates.len(), 1);
    }

    #[test]
    fn grid_key_format() {
        assert_eq!(grid_key(2, 3), "2_3");
    }
}
