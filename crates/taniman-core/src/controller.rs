//! The stage controller: a pure decision function over session state and
//! user events.
//!
//! `apply` performs the transition for one event and names the external
//! call (if any) the orchestrator must make before re-rendering; `finish`
//! advances out of a working stage once that call's output is stored.
//! Invalid input returns an error before any mutation, so the controller
//! is safe to invoke repeatedly with bad input.

use crate::error::{Result, TanimanError};
use crate::event::{Effect, Event};
use crate::log::{ConversationEntry, RenderDirective};
use crate::messages;
use crate::session::{grid_key, SessionState};
use crate::stage::Stage;
use crate::types::{Mode, PlantedChoice};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// The result of one transition: entries to append to the conversation and
/// at most one required external call.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub entries: Vec<ConversationEntry>,
    pub effect: Option<Effect>,
}

impl Outcome {
    fn none() -> Self {
        Self {
            entries: Vec::new(),
            effect: None,
        }
    }

    fn say(entry: ConversationEntry) -> Self {
        Self {
            entries: vec![entry],
            effect: None,
        }
    }

    fn run(effect: Effect) -> Self {
        Self {
            entries: Vec::new(),
            effect: Some(effect),
        }
    }
}

// ---------------------------------------------------------------------------
// apply
// ---------------------------------------------------------------------------

/// Fold one user event into the session.
///
/// Errors leave the state untouched: `Validation` for blank/malformed
/// required input (inline warning, no transition), `StaleEvent` for an
/// event the current stage does not accept.
pub fn apply(state: &mut SessionState, event: &Event) -> Result<Outcome> {
    let before = state.stage.name();
    let outcome = dispatch(state, event)?;
    let after = state.stage.name();
    if before != after {
        tracing::debug!(event = event.name(), from = before, to = after, "stage transition");
    }
    Ok(outcome)
}

fn dispatch(state: &mut SessionState, event: &Event) -> Result<Outcome> {
    let lang = state.language_or_default();

    if let Event::Restart = event {
        state.restart();
        return Ok(Outcome::say(ConversationEntry::assistant(
            messages::restarted(lang),
        )));
    }

    match (state.stage.clone(), event) {
        // ── Intake ──────────────────────────────────────────────────────
        (Stage::NeedLocation, Event::SubmitLocation { location }) => {
            let location = location.trim();
            if location.is_empty() {
                return Err(TanimanError::Validation(
                    messages::warn_blank_location(lang).to_string(),
                ));
            }
            state.location = Some(location.to_string());
            state.stage = Stage::NeedLanguage;
            Ok(Outcome::say(ConversationEntry::assistant(
                messages::location_saved(lang, location),
            )))
        }

        (Stage::NeedLanguage, Event::ChooseLanguage { language }) => {
            state.language = Some(*language);
            state.stage = Stage::NeedMode;
            Ok(Outcome::none())
        }

        (Stage::NeedMode, Event::ChooseMode { mode }) => {
            state.mode = Some(*mode);
            match mode {
                Mode::Planning => {
                    state.stage = Stage::NeedMedium;
                    Ok(Outcome::none())
                }
                Mode::Planted => {
                    state.stage = Stage::AwaitingChoice;
                    Ok(Outcome::say(ConversationEntry::assistant(
                        messages::planted_choice_prompt(lang),
                    )))
                }
            }
        }

        (Stage::NeedMedium, Event::ChooseMedium { medium }) => {
            state.planting_medium = Some(*medium);
            state.stage = Stage::Researching;
            Ok(Outcome::run(Effect::Research))
        }

        // ── Feedback loop (re-entrant until an explicit done) ───────────
        (Stage::AwaitingFeedback, Event::AddVegetable { name }) => {
            add_vegetable(state, name, true)
        }

        (Stage::AwaitingFeedback, Event::FeedbackDone) => {
            state.stage = Stage::AwaitingGardenDesign;
            Ok(Outcome::say(ConversationEntry::assistant(
                messages::design_offer(lang),
            )))
        }

        // ── Garden design sub-flow (optional, grid only) ────────────────
        (Stage::AwaitingGardenDesign, Event::PlaceVegetable { row, col, name }) => {
            let name = name.trim();
            if name.is_empty() {
                return Err(TanimanError::Validation(
                    messages::warn_blank_vegetable(lang).to_string(),
                ));
            }
            state.garden_grid.insert(grid_key(*row, *col), name.to_string());
            Ok(Outcome::none())
        }

        (Stage::AwaitingGardenDesign, Event::ClearPlot { row, col }) => {
            state.garden_grid.remove(&grid_key(*row, *col));
            Ok(Outcome::none())
        }

        // Skip and done converge on the same next stage.
        (Stage::AwaitingGardenDesign, Event::DesignDone | Event::SkipDesign) => {
            state.stage = Stage::AwaitingScheduleConfirm;
            Ok(Outcome::say(ConversationEntry::assistant(
                messages::schedule_confirm_prompt(lang),
            )))
        }

        // ── Schedule confirmation, both branches ────────────────────────
        (Stage::AwaitingScheduleConfirm, Event::ConfirmSchedule { accepted }) => {
            if *accepted {
                state.stage = Stage::Scheduling;
                return Ok(Outcome::run(Effect::Schedule));
            }
            match state.mode {
                // Planning: the schedule is optional, preparation is
                // offered regardless.
                Some(Mode::Planning) | None => {
                    state.stage = Stage::AwaitingPreparation;
                    Ok(Outcome::say(ConversationEntry::assistant(
                        messages::preparation_offer(lang),
                    )))
                }
                // Planted: nothing to prepare for; declining short-circuits
                // straight to open Q&A.
                Some(Mode::Planted) => {
                    state.stage = Stage::OpenQa;
                    Ok(Outcome::say(ConversationEntry::assistant(
                        messages::qa_open(lang),
                    )))
                }
            }
        }

        (Stage::AwaitingPreparation, Event::AcceptPreparation { accepted }) => {
            if *accepted {
                state.stage = Stage::Preparing;
                Ok(Outcome::run(Effect::Preparation))
            } else {
                state.stage = Stage::OpenQa;
                Ok(Outcome::say(ConversationEntry::assistant(
                    messages::qa_open(lang),
                )))
            }
        }

        // ── Planted branch ──────────────────────────────────────────────
        (Stage::AwaitingChoice, Event::ChoosePath { choice }) => match choice {
            PlantedChoice::HarvestSchedule => {
                state.stage = Stage::CollectingPlantedVegetables;
                Ok(Outcome::none())
            }
            PlantedChoice::Replanting => {
                state.stage = Stage::CollectingHarvestedVegetable {
                    return_to_prompt: false,
                };
                Ok(Outcome::none())
            }
            PlantedChoice::QuestionsOnly => {
                state.stage = Stage::OpenQa;
                Ok(Outcome::say(ConversationEntry::assistant(
                    messages::qa_open(lang),
                )))
            }
        },

        (Stage::CollectingPlantedVegetables, Event::AddVegetable { name }) => {
            add_vegetable(state, name, false)
        }

        (Stage::CollectingPlantedVegetables, Event::PlantedListDone) => {
            if state.vegetables.is_empty() {
                return Err(TanimanError::Validation(
                    messages::warn_no_planted_vegetables(lang).to_string(),
                ));
            }
            state.stage = Stage::AwaitingScheduleConfirm;
            Ok(Outcome::say(ConversationEntry::assistant(
                messages::schedule_confirm_prompt(lang),
            )))
        }

        (Stage::AwaitingPlantingDates, Event::SubmitPlantingDates { dates }) => {
            let cleaned: BTreeMap<String, _> = dates
                .iter()
                .filter(|(name, _)| !name.trim().is_empty())
                .map(|(name, date)| (name.trim().to_string(), *date))
                .collect();
            if cleaned.is_empty() {
                return Err(TanimanError::Validation(
                    messages::warn_blank_dates(lang).to_string(),
                ));
            }
            state.planted_dates = cleaned;
            state.stage = Stage::TrackerShown;
            Ok(Outcome {
                entries: vec![
                    ConversationEntry::assistant(messages::tracker_intro(lang)),
                    ConversationEntry::directive(RenderDirective::HarvestTracker),
                    ConversationEntry::assistant(messages::replant_offer(lang)),
                ],
                effect: None,
            })
        }

        // The replanting prompt: offered once after the tracker, then
        // re-offered after every completed round until the user skips.
        (Stage::TrackerShown | Stage::AwaitingReplantingPrompt, Event::AcceptReplanting) => {
            state.stage = Stage::CollectingHarvestedVegetable {
                return_to_prompt: true,
            };
            Ok(Outcome::none())
        }

        (Stage::TrackerShown | Stage::AwaitingReplantingPrompt, Event::SkipReplanting) => {
            state.stage = Stage::OpenQa;
            Ok(Outcome::say(ConversationEntry::assistant(
                messages::qa_open(lang),
            )))
        }

        (
            Stage::CollectingHarvestedVegetable { return_to_prompt },
            Event::SubmitHarvestedVegetable { name },
        ) => {
            let name = name.trim();
            if name.is_empty() {
                return Err(TanimanError::Validation(
                    messages::warn_blank_harvested(lang).to_string(),
                ));
            }
            // A different vegetable starts a fresh round; the stored output
            // only gates repeat requests for the same one.
            let same = state
                .harvested_vegetable
                .as_deref()
                .is_some_and(|v| v.eq_ignore_ascii_case(name));
            if !same {
                state.replanting_output = None;
            }
            state.harvested_vegetable = Some(name.to_string());
            state.stage = Stage::Replanting { return_to_prompt };
            Ok(Outcome::run(Effect::Replanting {
                vegetable: name.to_string(),
            }))
        }

        // ── Open Q&A (terminal, absorbing) ──────────────────────────────
        (Stage::OpenQa, Event::AskQuestion { question }) => {
            let question = question.trim();
            if question.is_empty() {
                return Err(TanimanError::Validation(
                    messages::warn_blank_question(lang).to_string(),
                ));
            }
            Ok(Outcome::run(Effect::Answer {
                question: question.to_string(),
            }))
        }

        (stage, event) => Err(TanimanError::StaleEvent {
            stage: stage.name().to_string(),
            event: event.name().to_string(),
        }),
    }
}

fn add_vegetable(state: &mut SessionState, name: &str, user_added: bool) -> Result<Outcome> {
    let lang = state.language_or_default();
    let name = name.trim();
    if name.is_empty() {
        // No-op with a visible warning, never a transition.
        return Err(TanimanError::Validation(
            messages::warn_blank_vegetable(lang).to_string(),
        ));
    }
    state.add_vegetable(name, user_added);
    Ok(Outcome::say(ConversationEntry::assistant(
        messages::added_vegetable(lang, name),
    )))
}

// ---------------------------------------------------------------------------
// finish
// ---------------------------------------------------------------------------

/// Advance out of a working stage after its effect's output has been
/// stored, returning the entries to append.
pub fn finish(state: &mut SessionState, effect: &Effect) -> Vec<ConversationEntry> {
    let lang = state.language_or_default();
    match effect {
        Effect::Research => {
            // Fold the recommendations into the working list, keeping any
            // names the user already typed.
            if let Some(research) = state.research_output.clone() {
                for rec in &research.recommendations {
                    if !state.has_vegetable(&rec.vegetable) {
                        state.add_vegetable(&rec.vegetable, false);
                    }
                }
            }
            state.stage = Stage::AwaitingFeedback;
            vec![
                ConversationEntry::directive(RenderDirective::ResearchCards),
                ConversationEntry::assistant(messages::feedback_prompt(lang)),
            ]
        }

        Effect::Schedule => {
            let mut entries = vec![
                ConversationEntry::assistant(messages::schedule_ready(lang)),
                ConversationEntry::directive(RenderDirective::ScheduleChart),
            ];
            match state.mode {
                Some(Mode::Planted) => {
                    state.stage = Stage::AwaitingPlantingDates;
                    entries.push(ConversationEntry::assistant(messages::planting_dates_prompt(
                        lang,
                    )));
                }
                Some(Mode::Planning) | None => {
                    state.stage = Stage::AwaitingPreparation;
                    entries.push(ConversationEntry::assistant(messages::preparation_offer(
                        lang,
                    )));
                }
            }
            entries
        }

        Effect::Preparation => {
            state.stage = Stage::OpenQa;
            vec![
                ConversationEntry::directive(RenderDirective::PreparationCards),
                ConversationEntry::assistant(messages::qa_open(lang)),
            ]
        }

        Effect::Replanting { .. } => {
            let return_to_prompt = matches!(
                state.stage,
                Stage::Replanting {
                    return_to_prompt: true
                }
            );
            let closing = if return_to_prompt {
                state.stage = Stage::AwaitingReplantingPrompt;
                messages::replant_again(lang)
            } else {
                state.stage = Stage::OpenQa;
                messages::qa_open(lang)
            };
            vec![
                ConversationEntry::directive(RenderDirective::ReplantingCards),
                ConversationEntry::assistant(closing),
            ]
        }

        // Q&A entries are appended by the orchestrator; no transition.
        Effect::Answer { .. } => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
