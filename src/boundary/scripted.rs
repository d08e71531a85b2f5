use std::collections::VecDeque;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::kernel::event::{DialogueEvent, SpeechCommand};
use crate::kernel::runner::DialogueRunner;
use crate::nlu::NluInterpretation;

/// One canned user turn.
#[derive(Debug, Clone)]
pub enum Cue {
    Say(String),
    SayInterpreted(String, NluInterpretation),
    Silence,
    /// UI click, delivered right after the next SPEAK_COMPLETE.
    Click,
}

impl Cue {
    pub fn say(utterance: &str) -> Self {
        Cue::Say(utterance.to_string())
    }
}

/// Fake speech boundary replaying canned listen outcomes.
///
/// PREPARE answers ENGINE_READY, SPEAK answers SPEAK_COMPLETE, LISTEN consumes
/// the next cue. A LISTEN with no cue left ends the script.
#[derive(Debug, Default)]
pub struct ScriptedBoundary {
    cues: VecDeque<Cue>,
    /// Every command received, in order.
    pub commands: Vec<SpeechCommand>,
}

impl ScriptedBoundary {
    pub fn new(cues: impl IntoIterator<Item = Cue>) -> Self {
        Self {
            cues: cues.into_iter().collect(),
            commands: Vec::new(),
        }
    }

    /// Convenience: plain utterances, `None` for a silent turn.
    pub fn from_utterances(turns: &[Option<&str>]) -> Self {
        Self::new(turns.iter().map(|turn| match turn {
            Some(text) => Cue::say(text),
            None => Cue::Silence,
        }))
    }

    /// Everything the system said, in order.
    pub fn spoken(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                SpeechCommand::Speak(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn remaining(&self) -> usize {
        self.cues.len()
    }

    /// Events answering `command`. `None` once the script is exhausted.
    pub fn respond(&mut self, command: &SpeechCommand) -> Option<Vec<DialogueEvent>> {
        self.commands.push(command.clone());
        match command {
            SpeechCommand::Prepare => Some(vec![DialogueEvent::EngineReady]),
            SpeechCommand::Speak(_) => {
                let mut events = vec![DialogueEvent::SpeakComplete];
                if matches!(self.cues.front(), Some(Cue::Click)) {
                    self.cues.pop_front();
                    events.push(DialogueEvent::Click);
                }
                Some(events)
            }
            SpeechCommand::Listen { .. } => {
                let event = match self.cues.pop_front()? {
                    Cue::Say(text) => DialogueEvent::heard(&text),
                    Cue::SayInterpreted(text, interpretation) => {
                        DialogueEvent::interpreted(&text, interpretation)
                    }
                    Cue::Silence => DialogueEvent::NoInput,
                    Cue::Click => DialogueEvent::Click,
                };
                Some(vec![event])
            }
        }
    }

    /// Drive `runner` synchronously from its initial state until the script
    /// runs out or the runner stops issuing commands.
    pub fn drive(&mut self, runner: &mut DialogueRunner) {
        let mut pending: VecDeque<SpeechCommand> = runner.start().into();
        while let Some(command) = pending.pop_front() {
            let Some(events) = self.respond(&command) else {
                debug!("Script exhausted at {:?}", command);
                break;
            };
            for event in events {
                pending.extend(runner.step(event));
            }
        }
    }

    /// Run as an async boundary task over channels. The task hands itself back
    /// when the script is exhausted or the command channel closes; dropping the
    /// event sender ends the runner's loop.
    pub fn spawn(
        mut self,
        mut commands: mpsc::Receiver<SpeechCommand>,
        events: mpsc::Sender<DialogueEvent>,
    ) -> JoinHandle<ScriptedBoundary> {
        tokio::spawn(async move {
            while let Some(command) = commands.recv().await {
                let Some(replies) = self.respond(&command) else {
                    break;
                };
                for event in replies {
                    if events.send(event).await.is_err() {
                        return self;
                    }
                }
            }
            self
        })
    }
}
