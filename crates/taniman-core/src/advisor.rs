//! Content-generation collaborator contract.
//!
//! The workflow core never generates gardening content itself; it calls an
//! [`Advisor`] at the transition that needs it and stores the structured
//! result verbatim in the session. Implementations may be backed by an LLM
//! crew, a knowledge base, or test doubles.

use crate::error::Result;
use crate::schedule::ScheduleResult;
use crate::types::{Language, PlantingMedium};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AdvisorContext
// ---------------------------------------------------------------------------

/// The context bundle passed to every capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorContext {
    pub location: String,
    pub language: Language,
    /// Unset in the already-planted branch, which never asks.
    pub planting_medium: Option<PlantingMedium>,
    /// Label of the reference year for historical weather, two years back.
    pub previous_year_label: String,
}

// ---------------------------------------------------------------------------
// Structured results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VegetableRecommendation {
    pub vegetable: String,
    pub reason: String,
    /// Recommended pot size when planting in pots, else empty.
    #[serde(default)]
    pub pot_size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchResult {
    pub recommendations: Vec<VegetableRecommendation>,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparationItem {
    pub vegetable: String,
    pub can_grow_from_scraps: bool,
    /// How to grow from food scraps, or "N/A".
    pub scraps_how: String,
    /// e.g. "2-3 weeks before planting".
    pub prep_lead_time: String,
    pub special_tips: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparationResult {
    pub items: Vec<PreparationItem>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplantingSuggestion {
    pub vegetable: String,
    pub reason: String,
    pub best_time_to_plant: String,
    #[serde(default)]
    pub tip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplantingResult {
    pub harvested_vegetable: String,
    pub recommendations: Vec<ReplantingSuggestion>,
    #[serde(default)]
    pub soil_rest_advice: String,
}

// ---------------------------------------------------------------------------
// Advisor trait
// ---------------------------------------------------------------------------

/// One method per generation capability. Calls are blocking from the
/// orchestrator's point of view; a failure is surfaced for the single
/// interaction that triggered it and the same action can be retried.
pub trait Advisor {
    /// Recommend vegetables for the location, season, and medium.
    fn research(&self, ctx: &AdvisorContext) -> Result<ResearchResult>;

    /// Build planting/harvest windows for a comma-joined vegetable list.
    fn schedule(&self, ctx: &AdvisorContext, vegetables: &str) -> Result<ScheduleResult>;

    /// Preparation advice (scraps, lead times, medium-specific tips).
    fn preparation(&self, ctx: &AdvisorContext, vegetables: &str) -> Result<PreparationResult>;

    /// What to plant after harvesting the given vegetable.
    fn replanting(&self, ctx: &AdvisorContext, harvested_vegetable: &str)
        -> Result<ReplantingResult>;

    /// Free-form gardening Q&A.
    fn answer(&self, ctx: &AdvisorContext, question: &str) -> Result<String>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
