use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// Position in the dialogue workflow.
///
/// The position is a single tagged variant rather than a set of boolean
/// flags, so invalid combinations (two prompts awaiting input at once, a
/// tracker without a schedule) cannot be represented at all. Any
/// "is this stage active" check is derived from the tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum Stage {
    // Shared intake
    NeedLocation,
    NeedLanguage,
    NeedMode,

    // Planning branch
    NeedMedium,
    Researching,
    AwaitingFeedback,
    AwaitingGardenDesign,
    AwaitingScheduleConfirm,
    Scheduling,
    AwaitingPreparation,
    Preparing,

    // Planted branch
    AwaitingChoice,
    CollectingPlantedVegetables,
    AwaitingPlantingDates,
    TrackerShown,
    AwaitingReplantingPrompt,
    /// `return_to_prompt` is true when this round was reached from the
    /// harvest tracker, so finishing loops back to the replanting prompt
    /// instead of dropping into open Q&A.
    CollectingHarvestedVegetable {
        return_to_prompt: bool,
    },
    Replanting {
        return_to_prompt: bool,
    },

    /// Terminal, absorbing: free-form questions only.
    OpenQa,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::NeedLocation => "need_location",
            Stage::NeedLanguage => "need_language",
            Stage::NeedMode => "need_mode",
            Stage::NeedMedium => "need_medium",
            Stage::Researching => "researching",
            Stage::AwaitingFeedback => "awaiting_feedback",
            Stage::AwaitingGardenDesign => "awaiting_garden_design",
            Stage::AwaitingScheduleConfirm => "awaiting_schedule_confirm",
            Stage::Scheduling => "scheduling",
            Stage::AwaitingPreparation => "awaiting_preparation",
            Stage::Preparing => "preparing",
            Stage::AwaitingChoice => "awaiting_choice",
            Stage::CollectingPlantedVegetables => "collecting_planted_vegetables",
            Stage::AwaitingPlantingDates => "awaiting_planting_dates",
            Stage::TrackerShown => "tracker_shown",
            Stage::AwaitingReplantingPrompt => "awaiting_replanting_prompt",
            Stage::CollectingHarvestedVegetable { .. } => "collecting_harvested_vegetable",
            Stage::Replanting { .. } => "replanting",
            Stage::OpenQa => "open_qa",
        }
    }

    /// True while a collaborator call is in flight for this stage. Hosts
    /// render these as a busy indicator, never as a prompt.
    pub fn is_working(&self) -> bool {
        matches!(
            self,
            Stage::Researching | Stage::Scheduling | Stage::Preparing | Stage::Replanting { .. }
        )
    }

    /// True once the free-form Q&A input is open. Computed from the tag,
    /// never cached.
    pub fn is_qa_open(&self) -> bool {
        matches!(self, Stage::OpenQa)
    }

    /// True while the replanting prompt is on offer (first offer after the
    /// tracker, or any later round).
    pub fn offers_replanting(&self) -> bool {
        matches!(self, Stage::TrackerShown | Stage::AwaitingReplantingPrompt)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
