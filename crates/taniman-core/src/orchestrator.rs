//! Top-level driver: composes the session, the conversation log, the stage
//! controller, and the advisor.

use crate::advisor::Advisor;
use crate::controller;
use crate::error::Result;
use crate::event::{Effect, Event};
use crate::harvest::{self, HarvestTable};
use crate::log::{Content, ConversationEntry, ConversationLog, RenderDirective};
use crate::render::{Renderer, TrackerRow};
use crate::session::SessionState;
use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// WorkflowOrchestrator
// ---------------------------------------------------------------------------

pub struct WorkflowOrchestrator {
    state: SessionState,
    log: ConversationLog,
    advisor: Box<dyn Advisor>,
    table: HarvestTable,
}

impl WorkflowOrchestrator {
    pub fn new(advisor: Box<dyn Advisor>) -> Self {
        Self {
            state: SessionState::new(),
            log: ConversationLog::new(),
            advisor,
            table: HarvestTable::builtin(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Process one user interaction.
    ///
    /// Applies the transition, runs the required collaborator call at most
    /// once (skipping it when the output is already stored), and appends
    /// the resulting entries. On a collaborator failure the session is
    /// restored to its pre-call state so the same action can be retried;
    /// nothing is appended.
    pub fn handle(&mut self, event: Event, today: NaiveDate) -> Result<()> {
        let snapshot = self.state.clone();
        let outcome = controller::apply(&mut self.state, &event)?;

        let mut entries = outcome.entries;
        if let Some(effect) = outcome.effect {
            match self.run_effect(&effect, today) {
                Ok(effect_entries) => entries.extend(effect_entries),
                Err(err) => {
                    self.state = snapshot;
                    return Err(err);
                }
            }
        }
        if let Event::Restart = event {
            self.log.clear();
        }
        self.log.extend(entries);
        // A working stage only exists inside one handle() call.
        debug_assert!(!self.state.stage.is_working());
        Ok(())
    }

    /// Execute one effect. Transitions into a working stage are
    /// idempotent: when the matching output is already stored, the
    /// collaborator is not called again and the flow proceeds as if the
    /// call had just completed.
    fn run_effect(&mut self, effect: &Effect, today: NaiveDate) -> Result<Vec<ConversationEntry>> {
        let ctx = self.state.advisor_context(today);
        match effect {
            Effect::Research => {
                if self.state.research_output.is_none() {
                    self.state.research_output = Some(self.advisor.research(&ctx)?);
                } else {
                    tracing::debug!("research output already stored, skipping call");
                }
                Ok(controller::finish(&mut self.state, effect))
            }

            Effect::Schedule => {
                if self.state.schedule_output.is_none() {
                    let schedule = self
                        .advisor
                        .schedule(&ctx, &self.state.vegetables_joined())?;
                    schedule.validate()?;
                    self.state.schedule_output = Some(schedule);
                } else {
                    tracing::debug!("schedule output already stored, skipping call");
                }
                Ok(controller::finish(&mut self.state, effect))
            }

            Effect::Preparation => {
                if self.state.preparation_output.is_none() {
                    self.state.preparation_output = Some(
                        self.advisor
                            .preparation(&ctx, &self.state.vegetables_joined())?,
                    );
                } else {
                    tracing::debug!("preparation output already stored, skipping call");
                }
                Ok(controller::finish(&mut self.state, effect))
            }

            Effect::Replanting { vegetable } => {
                let stored_for_same = self
                    .state
                    .replanting_output
                    .as_ref()
                    .is_some_and(|r| r.harvested_vegetable.eq_ignore_ascii_case(vegetable));
                if !stored_for_same {
                    self.state.replanting_output =
                        Some(self.advisor.replanting(&ctx, vegetable)?);
                } else {
                    tracing::debug!(vegetable, "replanting output already stored, skipping call");
                }
                Ok(controller::finish(&mut self.state, effect))
            }

            Effect::Answer { question } => {
                // Answers are conversation text, not stored outputs.
                let answer = self.advisor.answer(&ctx, question)?;
                let mut entries = vec![
                    ConversationEntry::user(question.clone()),
                    ConversationEntry::assistant(answer),
                ];
                entries.extend(controller::finish(&mut self.state, effect));
                Ok(entries)
            }
        }
    }

    // ---------------------------------------------------------------------------
    // Replay
    // ---------------------------------------------------------------------------

    /// Replay the whole conversation through a renderer. Deterministic:
    /// same state + log always produce the same sequence.
    pub fn replay(&self, today: NaiveDate, renderer: &mut dyn Renderer) {
        self.replay_from(0, today, renderer);
    }

    /// Replay entries from `cursor` onward, returning the new cursor.
    /// Hosts that render incrementally keep the returned position.
    pub fn replay_from(
        &self,
        cursor: usize,
        today: NaiveDate,
        renderer: &mut dyn Renderer,
    ) -> usize {
        for entry in self.log.entries().iter().skip(cursor) {
            match &entry.content {
                Content::Text(text) => renderer.message(entry.role, text),
                Content::Directive(directive) => {
                    self.render_directive(*directive, today, renderer)
                }
            }
        }
        self.log.len()
    }

    /// Resolve a directive against the latest stored result. A directive
    /// whose result is missing renders nothing; it never fails replay.
    fn render_directive(
        &self,
        directive: RenderDirective,
        today: NaiveDate,
        renderer: &mut dyn Renderer,
    ) {
        match directive {
            RenderDirective::ResearchCards => {
                if let Some(research) = &self.state.research_output {
                    renderer.research_cards(research);
                }
            }
            RenderDirective::ScheduleChart => {
                if let Some(schedule) = &self.state.schedule_output {
                    renderer.schedule_chart(schedule);
                    renderer.schedule_table(schedule);
                }
            }
            RenderDirective::PreparationCards => {
                if let Some(preparation) = &self.state.preparation_output {
                    renderer.preparation_cards(preparation);
                }
            }
            RenderDirective::HarvestTracker => {
                let rows = self.tracker_rows(today);
                if !rows.is_empty() {
                    renderer.harvest_tracker(&rows);
                }
            }
            RenderDirective::ReplantingCards => {
                if let Some(replanting) = &self.state.replanting_output {
                    renderer.replanting_cards(replanting);
                }
            }
        }
    }

    /// Tracker rows computed fresh from the stored planting dates, so a
    /// replayed tracker always reflects today's countdowns.
    pub fn tracker_rows(&self, today: NaiveDate) -> Vec<TrackerRow> {
        self.state
            .planted_dates
            .iter()
            .map(|(vegetable, planted)| TrackerRow {
                vegetable: vegetable.clone(),
                planted: *planted,
                estimate: harvest::estimate(&self.table, vegetable, *planted, today),
            })
            .collect()
    }
}

impl std::fmt::Debug for WorkflowOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowOrchestrator")
            .field("stage", &self.state.stage)
            .field("log_len", &self.log.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::{
        AdvisorContext, PreparationResult, ReplantingResult, ResearchResult, ReplantingSuggestion,
        VegetableRecommendation,
    };
    use crate::error::TanimanError;
    use crate::log::Role;
    use crate::schedule::{ScheduleResult, VegetableSchedule};
    use crate::types::{Language, Mode, PlantedChoice, PlantingMedium};
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    // ── Counting advisor double ─────────────────────────────────────────

    #[derive(Default)]
    struct CallCounts {
        research: usize,
        schedule: usize,
        preparation: usize,
        replanting: usize,
        answer: usize,
    }

    struct FakeAdvisor {
        counts: Rc<RefCell<CallCounts>>,
        fail: bool,
    }

    impl FakeAdvisor {
        fn new() -> (Self, Rc<RefCell<CallCounts>>) {
            let counts = Rc::new(RefCell::new(CallCounts::default()));
            (
                Self {
                    counts: counts.clone(),
                    fail: false,
                },
                counts,
            )
        }

        fn failing() -> Self {
            Self {
                counts: Rc::new(RefCell::new(CallCounts::default())),
                fail: true,
            }
        }

        fn check(&self) -> Result<()> {
            if self.fail {
                Err(TanimanError::Collaborator("crew unavailable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl Advisor for FakeAdvisor {
        fn research(&self, _ctx: &AdvisorContext) -> Result<ResearchResult> {
            self.check()?;
            self.counts.borrow_mut().research += 1;
            Ok(ResearchResult {
                recommendations: vec![
                    VegetableRecommendation {
                        vegetable: "kangkong".to_string(),
                        reason: "fast and forgiving".to_string(),
                        pot_size: "20 cm".to_string(),
                    },
                    VegetableRecommendation {
                        vegetable: "okra".to_string(),
                        reason: "loves the heat".to_string(),
                        pot_size: "30 cm".to_string(),
                    },
                ],
                summary: "Warm-season picks".to_string(),
            })
        }

        fn schedule(&self, _ctx: &AdvisorContext, _vegetables: &str) -> Result<ScheduleResult> {
            self.check()?;
            self.counts.borrow_mut().schedule += 1;
            Ok(ScheduleResult {
                entries: vec![VegetableSchedule {
                    vegetable: "okra".to_string(),
                    plant_start_month: 3,
                    plant_end_month: 5,
                    harvest_start_month: 5,
                    harvest_end_month: 7,
                    companion_plant: "basil".to_string(),
                }],
                notes: String::new(),
            })
        }

        fn preparation(&self, _ctx: &AdvisorContext, _vegetables: &str) -> Result<PreparationResult> {
            self.check()?;
            self.counts.borrow_mut().preparation += 1;
            Ok(PreparationResult {
                items: vec![],
                notes: String::new(),
            })
        }

        fn replanting(
            &self,
            _ctx: &AdvisorContext,
            harvested_vegetable: &str,
        ) -> Result<ReplantingResult> {
            self.check()?;
            self.counts.borrow_mut().replanting += 1;
            Ok(ReplantingResult {
                harvested_vegetable: harvested_vegetable.to_string(),
                recommendations: vec![ReplantingSuggestion {
                    vegetable: "mungo".to_string(),
                    reason: "restores the soil".to_string(),
                    best_time_to_plant: "start of the dry season".to_string(),
                    tip: String::new(),
                }],
                soil_rest_advice: String::new(),
            })
        }

        fn answer(&self, _ctx: &AdvisorContext, _question: &str) -> Result<String> {
            self.check()?;
            self.counts.borrow_mut().answer += 1;
            Ok("Water in the morning.".to_string())
        }
    }

    // ── Recording renderer double ───────────────────────────────────────

    #[derive(Default)]
    struct RecordingRenderer {
        calls: Vec<String>,
    }

    impl Renderer for RecordingRenderer {
        fn message(&mut self, role: Role, text: &str) {
            self.calls.push(format!("{role}: {text}"));
        }
        fn research_cards(&mut self, _: &ResearchResult) {
            self.calls.push("research_cards".to_string());
        }
        fn schedule_chart(&mut self, _: &ScheduleResult) {
            self.calls.push("schedule_chart".to_string());
        }
        fn schedule_table(&mut self, _: &ScheduleResult) {
            self.calls.push("schedule_table".to_string());
        }
        fn preparation_cards(&mut self, _: &PreparationResult) {
            self.calls.push("preparation_cards".to_string());
        }
        fn harvest_tracker(&mut self, rows: &[TrackerRow]) {
            self.calls.push(format!("harvest_tracker({})", rows.len()));
        }
        fn replanting_cards(&mut self, _: &ReplantingResult) {
            self.calls.push("replanting_cards".to_string());
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    fn drive(orch: &mut WorkflowOrchestrator, events: &[Event]) {
        for event in events {
            orch.handle(event.clone(), today()).unwrap();
        }
    }

    fn intake_planning() -> Vec<Event> {
        vec![
            Event::SubmitLocation {
                location: "Cebu".to_string(),
            },
            Event::ChooseLanguage {
                language: Language::English,
            },
            Event::ChooseMode {
                mode: Mode::Planning,
            },
            Event::ChooseMedium {
                medium: PlantingMedium::Pots,
            },
        ]
    }

    #[test]
    fn end_to_end_planning_scenario() {
        let (advisor, counts) = FakeAdvisor::new();
        let mut orch = WorkflowOrchestrator::new(Box::new(advisor));

        drive(&mut orch, &intake_planning());
        // Research ran once and its recommendations were folded in.
        assert_eq!(counts.borrow().research, 1);
        assert_eq!(orch.state().vegetables, vec!["kangkong", "okra"]);

        drive(
            &mut orch,
            &[
                Event::FeedbackDone,
                Event::SkipDesign,
                Event::ConfirmSchedule { accepted: true },
                Event::AcceptPreparation { accepted: false },
            ],
        );

        assert!(orch.state().stage.is_qa_open());
        assert_eq!(counts.borrow().schedule, 1);
        assert_eq!(counts.borrow().preparation, 0);

        let log = orch.log();
        assert_eq!(log.directive_count(RenderDirective::ResearchCards), 1);
        assert_eq!(log.directive_count(RenderDirective::ScheduleChart), 1);
        assert_eq!(log.directive_count(RenderDirective::PreparationCards), 0);
    }

    #[test]
    fn scheduling_is_idempotent() {
        let (advisor, counts) = FakeAdvisor::new();
        let mut orch = WorkflowOrchestrator::new(Box::new(advisor));
        drive(&mut orch, &intake_planning());
        drive(
            &mut orch,
            &[
                Event::FeedbackDone,
                Event::SkipDesign,
                Event::ConfirmSchedule { accepted: true },
            ],
        );
        assert_eq!(counts.borrow().schedule, 1);
        let stored = orch.state().schedule_output.clone();

        // Force a second pass through the scheduling transition.
        let mut state_rewound = orch.state.clone();
        state_rewound.stage = crate::stage::Stage::AwaitingScheduleConfirm;
        orch.state = state_rewound;
        orch.handle(Event::ConfirmSchedule { accepted: true }, today())
            .unwrap();

        assert_eq!(counts.borrow().schedule, 1, "no second collaborator call");
        assert_eq!(orch.state().schedule_output, stored);
    }

    #[test]
    fn collaborator_failure_keeps_pre_call_state() {
        let mut orch = WorkflowOrchestrator::new(Box::new(FakeAdvisor::failing()));
        drive(
            &mut orch,
            &[
                Event::SubmitLocation {
                    location: "Cebu".to_string(),
                },
                Event::ChooseLanguage {
                    language: Language::English,
                },
                Event::ChooseMode {
                    mode: Mode::Planning,
                },
            ],
        );
        let log_len = orch.log().len();

        let err = orch
            .handle(
                Event::ChooseMedium {
                    medium: PlantingMedium::Pots,
                },
                today(),
            )
            .unwrap_err();
        assert!(matches!(err, TanimanError::Collaborator(_)));

        // Pre-call stage restored; the same action can be retried.
        assert_eq!(orch.state().stage, crate::stage::Stage::NeedMedium);
        assert!(orch.state().research_output.is_none());
        assert_eq!(orch.log().len(), log_len, "nothing appended on failure");
    }

    #[test]
    fn replay_resolves_directives_against_current_state() {
        let (advisor, _) = FakeAdvisor::new();
        let mut orch = WorkflowOrchestrator::new(Box::new(advisor));
        drive(&mut orch, &intake_planning());

        let mut renderer = RecordingRenderer::default();
        orch.replay(today(), &mut renderer);
        assert!(renderer.calls.contains(&"research_cards".to_string()));

        // Replay twice: identical sequence.
        let mut renderer2 = RecordingRenderer::default();
        orch.replay(today(), &mut renderer2);
        assert_eq!(renderer.calls, renderer2.calls);
    }

    #[test]
    fn replay_cursor_advances() {
        let (advisor, _) = FakeAdvisor::new();
        let mut orch = WorkflowOrchestrator::new(Box::new(advisor));
        drive(&mut orch, &intake_planning());

        let mut renderer = RecordingRenderer::default();
        let cursor = orch.replay_from(0, today(), &mut renderer);
        assert_eq!(cursor, orch.log().len());

        let seen = renderer.calls.len();
        let cursor = orch.replay_from(cursor, today(), &mut renderer);
        assert_eq!(cursor, orch.log().len());
        assert_eq!(renderer.calls.len(), seen, "nothing new to render");
    }

    #[test]
    fn planted_harvest_schedule_path_renders_tracker() {
        let (advisor, counts) = FakeAdvisor::new();
        let mut orch = WorkflowOrchestrator::new(Box::new(advisor));

        let mut dates = BTreeMap::new();
        dates.insert(
            "okra".to_string(),
            NaiveDate::from_ymd_opt(2026, 7, 20).unwrap(),
        );

        drive(
            &mut orch,
            &[
                Event::SubmitLocation {
                    location: "Iloilo".to_string(),
                },
                Event::ChooseLanguage {
                    language: Language::Tagalog,
                },
                Event::ChooseMode { mode: Mode::Planted },
                Event::ChoosePath {
                    choice: PlantedChoice::HarvestSchedule,
                },
                Event::AddVegetable {
                    name: "okra".to_string(),
                },
                Event::PlantedListDone,
                Event::ConfirmSchedule { accepted: true },
                Event::SubmitPlantingDates { dates },
            ],
        );

        assert_eq!(counts.borrow().schedule, 1);
        assert_eq!(orch.state().stage, crate::stage::Stage::TrackerShown);

        let mut renderer = RecordingRenderer::default();
        orch.replay(today(), &mut renderer);
        assert!(renderer.calls.contains(&"harvest_tracker(1)".to_string()));
    }

    #[test]
    fn open_qa_appends_question_and_answer() {
        let (advisor, counts) = FakeAdvisor::new();
        let mut orch = WorkflowOrchestrator::new(Box::new(advisor));
        drive(&mut orch, &intake_planning());
        drive(
            &mut orch,
            &[
                Event::FeedbackDone,
                Event::SkipDesign,
                Event::ConfirmSchedule { accepted: false },
                Event::AcceptPreparation { accepted: false },
            ],
        );

        orch.handle(
            Event::AskQuestion {
                question: "How often should I water okra?".to_string(),
            },
            today(),
        )
        .unwrap();

        assert_eq!(counts.borrow().answer, 1);
        let entries = orch.log().entries();
        let question_pos = entries
            .iter()
            .position(|e| e.content == Content::Text("How often should I water okra?".to_string()))
            .unwrap();
        assert_eq!(entries[question_pos].role, Role::User);
        assert_eq!(entries[question_pos + 1].role, Role::Assistant);
    }

    #[test]
    fn restart_clears_log_and_state() {
        let (advisor, _) = FakeAdvisor::new();
        let mut orch = WorkflowOrchestrator::new(Box::new(advisor));
        drive(&mut orch, &intake_planning());
        assert!(!orch.log().is_empty());

        orch.handle(Event::Restart, today()).unwrap();
        assert_eq!(orch.state().stage, crate::stage::Stage::NeedLocation);
        assert_eq!(orch.log().len(), 1, "only the restart message remains");
    }
}
