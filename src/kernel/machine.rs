use std::sync::Arc;

use tracing::{debug, info};

use super::event::{DialogueEvent, RecognitionResult, SpeechCommand};
use super::intent::{knowledge, IntentRoute, IntentRouter};
use super::prompts;
use super::record::{Confirmation, DialogueRecord, PartialSlots, RecordDelta};
use super::state::{Composite, DialogueState, Flow, Phase};
use super::telemetry::event::{TaskEvent, TelemetryEvent};
use crate::grammar::Grammar;
use crate::nlu::{self, NluInterpretation};

/// Outcome of one step: where the machine is now, the updated record, and
/// the commands to hand to the speech boundary (in emission order).
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: DialogueState,
    pub record: DialogueRecord,
    pub effects: Vec<SpeechCommand>,
    pub telemetry: Vec<TelemetryEvent>,
}

// Working copy threaded through a single step.
struct Turn {
    record: DialogueRecord,
    telemetry: Vec<TelemetryEvent>,
}

impl Turn {
    fn new(record: &DialogueRecord) -> Self {
        Self {
            record: record.clone(),
            telemetry: Vec::new(),
        }
    }

    fn apply(&mut self, delta: RecordDelta) {
        self.record.reduce(delta);
    }

    fn emit(&mut self, event: TelemetryEvent) {
        self.telemetry.push(event);
    }

    /// Discard the current task and start a new one.
    fn restart(&mut self, finished: bool) {
        if !finished {
            self.emit(TelemetryEvent::Task(TaskEvent::Restarted(self.record.task_id)));
        }
        self.record = DialogueRecord::new();
        self.emit(TelemetryEvent::Task(TaskEvent::Started(self.record.task_id)));
    }
}

/// The turn state machine.
///
/// `step` is a pure function of (state, event, record). Guards are evaluated in
/// declaration order and the first match wins, so every (state, event) pair has
/// at most one enabled transition. Pairs with none leave everything unchanged.
#[derive(Debug, Clone)]
pub struct TurnMachine {
    flow: Flow,
    grammar: Arc<Grammar>,
    max_reprompts: Option<u32>,
}

impl TurnMachine {
    pub fn new(flow: Flow, grammar: Arc<Grammar>) -> Self {
        Self {
            flow,
            grammar,
            max_reprompts: None,
        }
    }

    /// Cap consecutive re-asks of one question. `None` keeps retrying forever.
    pub fn with_max_reprompts(mut self, cap: Option<u32>) -> Self {
        self.max_reprompts = cap;
        self
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Initial entry: fresh record, `Prepare` state, PREPARE command.
    pub fn start(&self) -> Transition {
        let mut turn = Turn::new(&DialogueRecord::new());
        turn.emit(TelemetryEvent::Task(TaskEvent::Started(turn.record.task_id)));
        self.enter(DialogueState::Prepare, turn)
    }

    pub fn step(
        &self,
        state: &DialogueState,
        event: &DialogueEvent,
        record: &DialogueRecord,
    ) -> Transition {
        let mut turn = Turn::new(record);

        let target = match (*state, event) {
            (DialogueState::Prepare, DialogueEvent::EngineReady) => {
                Some(DialogueState::prompt(Composite::Greeting))
            }

            // Grammar flow: the welcome is announced, not asked.
            (
                DialogueState::Composite(Composite::Greeting, Phase::Prompt),
                DialogueEvent::SpeakComplete,
            ) if self.flow == Flow::Grammar => {
                Some(DialogueState::prompt(Composite::Person))
            }

            (
                DialogueState::Composite(c, Phase::Prompt | Phase::NoInput | Phase::Clarify),
                DialogueEvent::SpeakComplete,
            ) => Some(DialogueState::Composite(c, Phase::Listen)),

            (
                DialogueState::Composite(c, Phase::Listen),
                DialogueEvent::Recognised(result, interpretation),
            ) => {
                turn.apply(RecordDelta::ResultStored(result.clone(), interpretation.clone()));
                Some(self.on_recognised(c, result, interpretation.as_ref(), &mut turn))
            }

            (DialogueState::Composite(c, Phase::Listen), DialogueEvent::NoInput) => {
                turn.apply(RecordDelta::ResultCleared);
                turn.emit(TelemetryEvent::NoInput { composite: c });
                Some(self.reprompt(c, Phase::NoInput, &mut turn))
            }

            (DialogueState::Composite(c, Phase::Echo), DialogueEvent::SpeakComplete) => {
                Some(self.after_echo(c, &mut turn))
            }

            (DialogueState::WhoIsX, DialogueEvent::SpeakComplete) => {
                turn.emit(TelemetryEvent::Task(TaskEvent::Completed(turn.record.task_id)));
                Some(DialogueState::Done)
            }

            (DialogueState::UnknownIntent, DialogueEvent::SpeakComplete) => {
                turn.restart(false);
                Some(DialogueState::prompt(Composite::Greeting))
            }

            (DialogueState::Abandoned, DialogueEvent::SpeakComplete) => Some(DialogueState::Done),

            (s, DialogueEvent::Click) if s.accepts_click() => {
                turn.restart(true);
                Some(DialogueState::prompt(Composite::Greeting))
            }

            _ => None,
        };

        match target {
            Some(next) => {
                info!("{} --{}--> {}", state, event.name(), next);
                self.enter(next, turn)
            }
            None => {
                debug!("Ignored {} in {}", event.name(), state);
                turn.emit(TelemetryEvent::EventIgnored { state: *state });
                Transition {
                    state: *state,
                    record: turn.record,
                    effects: Vec::new(),
                    telemetry: turn.telemetry,
                }
            }
        }
    }

    /// Entry actions of `state`.
    fn enter(&self, state: DialogueState, mut turn: Turn) -> Transition {
        let record = &turn.record;
        let effects = match state {
            DialogueState::Prepare => vec![SpeechCommand::Prepare],
            DialogueState::Composite(c, Phase::Prompt) => {
                vec![SpeechCommand::Speak(prompts::prompt(c, self.flow, record))]
            }
            DialogueState::Composite(c, Phase::NoInput) => {
                vec![SpeechCommand::Speak(prompts::no_input(c, self.flow, record))]
            }
            DialogueState::Composite(_, Phase::Clarify) => {
                vec![SpeechCommand::Speak(prompts::clarify(record))]
            }
            DialogueState::Composite(_, Phase::Listen) => vec![SpeechCommand::Listen {
                nlu: self.flow == Flow::Nlu,
            }],
            DialogueState::Composite(_, Phase::Echo) => {
                let utterance = record
                    .last_result
                    .as_ref()
                    .map(|r| r.utterance.as_str())
                    .unwrap_or_default();
                vec![SpeechCommand::Speak(prompts::echo(
                    utterance,
                    self.grammar.is_known(utterance),
                ))]
            }
            DialogueState::WhoIsX => {
                vec![SpeechCommand::Speak(knowledge::answer(record.person.as_deref()))]
            }
            DialogueState::UnknownIntent => {
                vec![SpeechCommand::Speak(prompts::UNKNOWN_INTENT.to_string())]
            }
            DialogueState::AppointmentCreated => {
                vec![SpeechCommand::Speak(prompts::APPOINTMENT_CREATED.to_string())]
            }
            DialogueState::Abandoned => vec![SpeechCommand::Speak(prompts::ABANDONED.to_string())],
            DialogueState::Done => Vec::new(),
        };

        turn.emit(TelemetryEvent::StateEntered { state });
        Transition {
            state,
            record: turn.record,
            effects,
            telemetry: turn.telemetry,
        }
    }

    /// Listen-complete with a result.
    fn on_recognised(
        &self,
        composite: Composite,
        result: &RecognitionResult,
        interpretation: Option<&NluInterpretation>,
        turn: &mut Turn,
    ) -> DialogueState {
        let utterance = result.utterance.as_str();
        let entry = self.grammar.lookup(utterance).cloned();
        if entry.is_none() && composite != Composite::Greeting {
            debug!("Out-of-grammar utterance in {:?}", composite);
            turn.emit(TelemetryEvent::OutOfGrammar { composite });
        }

        match composite {
            Composite::Greeting => self.route(interpretation, turn),

            Composite::Person | Composite::Day | Composite::Time => {
                let mut candidate = entry.unwrap_or_default();
                // Only the confirmation question writes the confirmation slot.
                candidate.confirmation = None;
                if let Some(interpretation) = interpretation {
                    candidate = candidate.overlay(&nlu::adapt(interpretation));
                }
                turn.apply(RecordDelta::SlotsExtracted(candidate));
                DialogueState::Composite(composite, Phase::Echo)
            }

            Composite::FullDay => {
                let mut candidate = entry.unwrap_or_default();
                if let Some(answer) = candidate.confirmation.take() {
                    turn.apply(RecordDelta::FullDayAnswered(answer == Confirmation::Affirmed));
                }
                turn.apply(RecordDelta::SlotsExtracted(candidate));
                DialogueState::Composite(composite, Phase::Echo)
            }

            Composite::Confirmation => {
                match entry.as_ref().and_then(|e| e.confirmation) {
                    Some(Confirmation::Affirmed) => {
                        turn.apply(RecordDelta::SlotsExtracted(PartialSlots {
                            confirmation: Some(Confirmation::Affirmed),
                            ..Default::default()
                        }));
                        turn.emit(TelemetryEvent::Task(TaskEvent::Completed(turn.record.task_id)));
                        DialogueState::AppointmentCreated
                    }
                    Some(Confirmation::Denied) => {
                        turn.restart(false);
                        DialogueState::prompt(Composite::Greeting)
                    }
                    None => self.reprompt(composite, Phase::Clarify, turn),
                }
            }
        }
    }

    /// Greeting listen-complete in the intent-routed dialogue.
    fn route(&self, interpretation: Option<&NluInterpretation>, turn: &mut Turn) -> DialogueState {
        let route = interpretation
            .map(|i| IntentRouter::route(&i.top_intent))
            .unwrap_or(IntentRoute::Unknown);
        turn.emit(TelemetryEvent::IntentRouted { route });

        match (route, interpretation) {
            (IntentRoute::WhoIsX, Some(interpretation)) => {
                turn.apply(RecordDelta::SlotsExtracted(nlu::adapt(interpretation)));
                DialogueState::WhoIsX
            }
            (IntentRoute::CreateMeeting, Some(interpretation)) => {
                turn.apply(RecordDelta::SlotsExtracted(nlu::adapt(interpretation)));
                turn.apply(RecordDelta::RepromptsReset);
                DialogueState::prompt(Composite::Day)
            }
            _ => DialogueState::UnknownIntent,
        }
    }

    /// Branch once the echo has been spoken.
    fn after_echo(&self, composite: Composite, turn: &mut Turn) -> DialogueState {
        if composite == Composite::FullDay {
            let answer = turn.record.full_day;
            return match answer {
                Some(true) => self.advance(Composite::Confirmation, turn),
                Some(false) => self.advance(Composite::Time, turn),
                None => self.reprompt(composite, Phase::Prompt, turn),
            };
        }

        let filled = composite
            .target_slot()
            .map(|slot| turn.record.has(slot))
            .unwrap_or(false);
        match (filled, self.next_after(composite)) {
            (true, Some(next)) => self.advance(next, turn),
            _ => self.reprompt(composite, Phase::Prompt, turn),
        }
    }

    fn next_after(&self, composite: Composite) -> Option<Composite> {
        match (composite, self.flow) {
            (Composite::Person, _) => Some(Composite::Day),
            (Composite::Day, Flow::Grammar) => Some(Composite::FullDay),
            (Composite::Day, Flow::Nlu) => Some(Composite::Time),
            (Composite::Time, _) => Some(Composite::Confirmation),
            _ => None,
        }
    }

    fn advance(&self, next: Composite, turn: &mut Turn) -> DialogueState {
        turn.apply(RecordDelta::RepromptsReset);
        DialogueState::prompt(next)
    }

    /// Re-ask `composite` in `phase`, or give up once the cap is exceeded.
    fn reprompt(&self, composite: Composite, phase: Phase, turn: &mut Turn) -> DialogueState {
        turn.apply(RecordDelta::RepromptCounted);
        let count = turn.record.reprompts;
        turn.emit(TelemetryEvent::Reprompt { composite, count });

        match self.max_reprompts {
            Some(cap) if count > cap => {
                info!("Reprompt cap {} exceeded in {:?}", cap, composite);
                turn.emit(TelemetryEvent::Task(TaskEvent::Abandoned(turn.record.task_id)));
                DialogueState::Abandoned
            }
            _ => DialogueState::Composite(composite, phase),
        }
    }
}
