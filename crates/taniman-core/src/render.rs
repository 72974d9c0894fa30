//! Rendering collaborator contract.
//!
//! The core never draws anything; replay resolves each directive against
//! the latest stored collaborator output and hands the structured data to
//! a [`Renderer`]. Implementations draw charts, cards, or plain text.

use crate::advisor::{PreparationResult, ReplantingResult, ResearchResult};
use crate::harvest::HarvestEstimate;
use crate::log::Role;
use crate::schedule::ScheduleResult;
use chrono::NaiveDate;

/// One row of the harvest tracker, computed fresh at replay time from the
/// stored planting dates.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerRow {
    pub vegetable: String,
    pub planted: NaiveDate,
    pub estimate: HarvestEstimate,
}

pub trait Renderer {
    fn message(&mut self, role: Role, text: &str);
    fn research_cards(&mut self, research: &ResearchResult);
    fn schedule_chart(&mut self, schedule: &ScheduleResult);
    fn schedule_table(&mut self, schedule: &ScheduleResult);
    fn preparation_cards(&mut self, preparation: &PreparationResult);
    fn harvest_tracker(&mut self, rows: &[TrackerRow]);
    fn replanting_cards(&mut self, replanting: &ReplantingResult);
}
