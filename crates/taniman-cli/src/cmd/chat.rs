//! The interactive chat loop: render new conversation entries, show the
//! active stage's prompt, parse the reply into an event, and hand it to the
//! orchestrator. Validation problems print inline and never advance the
//! dialogue.

use crate::advisor::StaticAdvisor;
use crate::render::TextRenderer;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::io::BufRead;
use taniman_core::event::Event;
use taniman_core::messages;
use taniman_core::orchestrator::WorkflowOrchestrator;
use taniman_core::session::SessionState;
use taniman_core::stage::Stage;
use taniman_core::TanimanError;

pub fn run(today: NaiveDate) -> anyhow::Result<()> {
    let mut orch = WorkflowOrchestrator::new(Box::new(StaticAdvisor));
    let mut renderer = TextRenderer;
    let mut cursor = 0usize;

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    println!("🌱 Taniman — your gardening assistant. Type /quit to leave, /restart to start over.");
    println!();

    loop {
        cursor = orch.replay_from(cursor, today, &mut renderer);

        let stage = orch.state().stage.clone();
        let lang = orch.state().language_or_default();
        if let Some(prompt) = messages::prompt_for(&stage, lang) {
            println!("🌱 {prompt}");
        }

        let Some(line) = lines.next() else {
            break; // EOF
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            // A bare Enter re-shows the prompt, except where blank input is
            // itself an answer the controller must reject visibly.
            if !matches!(stage, Stage::OpenQa) {
                continue;
            }
        }
        match line {
            "/quit" | "/exit" => break,
            "/restart" => {
                cursor = 0;
                orch.handle(Event::Restart, today)?;
                continue;
            }
            _ => {}
        }

        let event = match parse_input(&stage, line) {
            Ok(event) => event,
            Err(hint) => {
                println!("⚠️ {hint}");
                continue;
            }
        };

        if let Some(busy) = busy_hint(orch.state(), &event) {
            println!("🌱 {busy}");
        }

        if let Err(err) = orch.handle(event, today) {
            match err {
                TanimanError::Validation(message) => println!("⚠️ {message}"),
                TanimanError::Collaborator(_) => {
                    tracing::warn!(error = %err, "advisor call failed");
                    println!("⚠️ {}", messages::collaborator_failed(lang));
                }
                other => println!("⚠️ {other}"),
            }
        }
    }

    Ok(())
}

/// Busy text for events that will trigger an advisor call.
fn busy_hint(state: &SessionState, event: &Event) -> Option<&'static str> {
    let lang = state.language_or_default();
    let working = match event {
        Event::ChooseMedium { .. } => Stage::Researching,
        Event::ConfirmSchedule { accepted: true } => Stage::Scheduling,
        Event::AcceptPreparation { accepted: true } => Stage::Preparing,
        Event::SubmitHarvestedVegetable { .. } => Stage::Replanting {
            return_to_prompt: false,
        },
        _ => return None,
    };
    messages::busy_for(&working, lang)
}

// ---------------------------------------------------------------------------
// Input parsing
// ---------------------------------------------------------------------------

/// Turn one line of input into the event the current stage expects. `Err`
/// carries a hint to show the user; nothing reaches the controller.
fn parse_input(stage: &Stage, line: &str) -> Result<Event, String> {
    match stage {
        Stage::NeedLocation => Ok(Event::SubmitLocation {
            location: line.to_string(),
        }),

        Stage::NeedLanguage => line
            .parse()
            .map(|language| Event::ChooseLanguage { language })
            .map_err(|_| "Please answer 'english' or 'tagalog'.".to_string()),

        Stage::NeedMode => line
            .parse()
            .map(|mode| Event::ChooseMode { mode })
            .map_err(|_| "Please answer 'planning' or 'planted'.".to_string()),

        Stage::NeedMedium => line
            .parse()
            .map(|medium| Event::ChooseMedium { medium })
            .map_err(|_| "Please answer 'ground' or 'pots'.".to_string()),

        Stage::AwaitingFeedback => {
            if line.eq_ignore_ascii_case("done") {
                Ok(Event::FeedbackDone)
            } else {
                Ok(Event::AddVegetable {
                    name: line.to_string(),
                })
            }
        }

        Stage::AwaitingGardenDesign => parse_design(line),

        Stage::AwaitingScheduleConfirm => parse_yes_no(line)
            .map(|accepted| Event::ConfirmSchedule { accepted })
            .ok_or_else(|| "Please answer 'yes' or 'no'.".to_string()),

        Stage::AwaitingPreparation => parse_yes_no(line)
            .map(|accepted| Event::AcceptPreparation { accepted })
            .ok_or_else(|| "Please answer 'yes' or 'no'.".to_string()),

        Stage::AwaitingChoice => match line.to_lowercase().as_str() {
            "schedule" | "harvest" => Ok(Event::ChoosePath {
                choice: taniman_core::types::PlantedChoice::HarvestSchedule,
            }),
            "replant" | "replanting" => Ok(Event::ChoosePath {
                choice: taniman_core::types::PlantedChoice::Replanting,
            }),
            "questions" | "question" | "qa" => Ok(Event::ChoosePath {
                choice: taniman_core::types::PlantedChoice::QuestionsOnly,
            }),
            _ => Err("Please answer 'schedule', 'replant', or 'questions'.".to_string()),
        },

        Stage::CollectingPlantedVegetables => {
            if line.eq_ignore_ascii_case("done") {
                Ok(Event::PlantedListDone)
            } else {
                Ok(Event::AddVegetable {
                    name: line.to_string(),
                })
            }
        }

        Stage::AwaitingPlantingDates => parse_dates(line),

        s if s.offers_replanting() => match parse_yes_no(line) {
            Some(true) => Ok(Event::AcceptReplanting),
            Some(false) => Ok(Event::SkipReplanting),
            None => Err("Please answer 'yes' or 'skip'.".to_string()),
        },

        Stage::CollectingHarvestedVegetable { .. } => Ok(Event::SubmitHarvestedVegetable {
            name: line.to_string(),
        }),

        Stage::OpenQa => Ok(Event::AskQuestion {
            question: line.to_string(),
        }),

        // Working stages never persist between interactions.
        _ => Err("One moment...".to_string()),
    }
}

fn parse_yes_no(line: &str) -> Option<bool> {
    match line.to_lowercase().as_str() {
        "yes" | "y" | "oo" | "sige" => Some(true),
        "no" | "n" | "hindi" | "skip" => Some(false),
        _ => None,
    }
}

fn parse_design(line: &str) -> Result<Event, String> {
    let usage = "Use 'place <row> <col> <vegetable>', 'clear <row> <col>', 'done', or 'skip'.";
    let mut parts = line.split_whitespace();
    match parts.next().map(str::to_lowercase).as_deref() {
        Some("done") => Ok(Event::DesignDone),
        Some("skip") => Ok(Event::SkipDesign),
        Some("place") => {
            let row = parts
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| usage.to_string())?;
            let col = parts
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| usage.to_string())?;
            let name = parts.collect::<Vec<_>>().join(" ");
            Ok(Event::PlaceVegetable { row, col, name })
        }
        Some("clear") => {
            let row = parts
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| usage.to_string())?;
            let col = parts
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| usage.to_string())?;
            Ok(Event::ClearPlot { row, col })
        }
        _ => Err(usage.to_string()),
    }
}

/// `name=YYYY-MM-DD` pairs separated by commas.
fn parse_dates(line: &str) -> Result<Event, String> {
    let usage = "Enter 'name=YYYY-MM-DD' pairs separated by commas, e.g. okra=2026-06-01.";
    let mut dates = BTreeMap::new();
    for pair in line.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let (name, raw_date) = pair.split_once('=').ok_or_else(|| usage.to_string())?;
        let date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d")
            .map_err(|_| usage.to_string())?;
        dates.insert(name.trim().to_string(), date);
    }
    Ok(Event::SubmitPlantingDates { dates })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use taniman_core::types::{Language, Mode, PlantedChoice};

    #[test]
    fn intake_answers_parse() {
        assert_eq!(
            parse_input(&Stage::NeedLanguage, "Tagalog").unwrap(),
            Event::ChooseLanguage {
                language: Language::Tagalog
            }
        );
        assert_eq!(
            parse_input(&Stage::NeedMode, "planted").unwrap(),
            Event::ChooseMode { mode: Mode::Planted }
        );
        assert!(parse_input(&Stage::NeedMode, "maybe").is_err());
    }

    #[test]
    fn feedback_loop_distinguishes_done_from_names() {
        assert_eq!(
            parse_input(&Stage::AwaitingFeedback, "done").unwrap(),
            Event::FeedbackDone
        );
        assert_eq!(
            parse_input(&Stage::AwaitingFeedback, "sitaw").unwrap(),
            Event::AddVegetable {
                name: "sitaw".to_string()
            }
        );
    }

    #[test]
    fn design_commands_parse() {
        assert_eq!(
            parse_input(&Stage::AwaitingGardenDesign, "place 1 2 cherry tomato").unwrap(),
            Event::PlaceVegetable {
                row: 1,
                col: 2,
                name: "cherry tomato".to_string()
            }
        );
        assert_eq!(
            parse_input(&Stage::AwaitingGardenDesign, "clear 1 2").unwrap(),
            Event::ClearPlot { row: 1, col: 2 }
        );
        assert!(parse_input(&Stage::AwaitingGardenDesign, "place one two okra").is_err());
    }

    #[test]
    fn planted_choice_parses() {
        assert_eq!(
            parse_input(&Stage::AwaitingChoice, "replant").unwrap(),
            Event::ChoosePath {
                choice: PlantedChoice::Replanting
            }
        );
    }

    #[test]
    fn planting_dates_parse() {
        let event =
            parse_input(&Stage::AwaitingPlantingDates, "okra=2026-06-01, talong=2026-06-15")
                .unwrap();
        let Event::SubmitPlantingDates { dates } = event else {
            panic!("wrong event");
        };
        assert_eq!(dates.len(), 2);
        assert_eq!(
            dates["okra"],
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
        );
        assert!(parse_input(&Stage::AwaitingPlantingDates, "okra=June 1st").is_err());
    }

    #[test]
    fn tagalog_yes_counts_as_yes() {
        assert_eq!(parse_yes_no("Oo"), Some(true));
        assert_eq!(parse_yes_no("hindi"), Some(false));
        assert_eq!(parse_yes_no("bananas"), None);
    }
}
