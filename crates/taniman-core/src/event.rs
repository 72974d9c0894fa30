use crate::types::{Language, Mode, PlantedChoice, PlantingMedium};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A user action raised from a rendered stage. Each variant is only valid
/// in specific stages; the controller rejects the rest, so a stale button
/// from a prior render can never mutate state out of turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    SubmitLocation { location: String },
    ChooseLanguage { language: Language },
    ChooseMode { mode: Mode },
    ChooseMedium { medium: PlantingMedium },

    /// Add one vegetable during the feedback loop or the planted-vegetable
    /// collection.
    AddVegetable { name: String },
    /// Close the feedback loop.
    FeedbackDone,

    /// Garden-design sub-flow, optional and side-effect-free for the
    /// main machine.
    PlaceVegetable { row: u32, col: u32, name: String },
    ClearPlot { row: u32, col: u32 },
    DesignDone,
    SkipDesign,

    ConfirmSchedule { accepted: bool },
    AcceptPreparation { accepted: bool },

    ChoosePath { choice: PlantedChoice },
    /// Close the planted-vegetable collection.
    PlantedListDone,
    /// The single batch form of planting dates.
    SubmitPlantingDates { dates: BTreeMap<String, NaiveDate> },

    AcceptReplanting,
    SkipReplanting,
    SubmitHarvestedVegetable { name: String },

    AskQuestion { question: String },
    Restart,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::SubmitLocation { .. } => "submit_location",
            Event::ChooseLanguage { .. } => "choose_language",
            Event::ChooseMode { .. } => "choose_mode",
            Event::ChooseMedium { .. } => "choose_medium",
            Event::AddVegetable { .. } => "add_vegetable",
            Event::FeedbackDone => "feedback_done",
            Event::PlaceVegetable { .. } => "place_vegetable",
            Event::ClearPlot { .. } => "clear_plot",
            Event::DesignDone => "design_done",
            Event::SkipDesign => "skip_design",
            Event::ConfirmSchedule { .. } => "confirm_schedule",
            Event::AcceptPreparation { .. } => "accept_preparation",
            Event::ChoosePath { .. } => "choose_path",
            Event::PlantedListDone => "planted_list_done",
            Event::SubmitPlantingDates { .. } => "submit_planting_dates",
            Event::AcceptReplanting => "accept_replanting",
            Event::SkipReplanting => "skip_replanting",
            Event::SubmitHarvestedVegetable { .. } => "submit_harvested_vegetable",
            Event::AskQuestion { .. } => "ask_question",
            Event::Restart => "restart",
        }
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// The external call a transition requires before re-rendering. At most
/// one per transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    Research,
    Schedule,
    Preparation,
    Replanting { vegetable: String },
    Answer { question: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_json_tagged() {
        let e = Event::ConfirmSchedule { accepted: true };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"event\":\"confirm_schedule\""));
        assert!(json.contains("\"accepted\":true"));
    }

    #[test]
    fn event_names() {
        assert_eq!(Event::FeedbackDone.name(), "feedback_done");
        assert_eq!(
            Event::AddVegetable {
                name: "okra".to_string()
            }
            .name(),
            "add_vegetable"
        );
    }
}
