use std::fmt;

use serde::{Deserialize, Serialize};

use super::record::Slot;

/// Which top-level dialogue the machine runs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    /// Slot filling driven by the static grammar on every turn.
    #[default]
    Grammar,
    /// Greeting routed by the NLU top intent.
    Nlu,
}

/// Sub-machine position inside a composite state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Prompt,
    NoInput,
    /// Yes/no-specific reprompt (confirmation only).
    Clarify,
    Listen,
    /// Telling the user whether their utterance was in the grammar.
    Echo,
}

/// Composite states: each asks one question and owns a Prompt/NoInput/Listen sub-machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Composite {
    Greeting,
    Person,
    Day,
    FullDay,
    Time,
    Confirmation,
}

impl Composite {
    /// The slot whose presence lets this composite advance.
    pub fn target_slot(self) -> Option<Slot> {
        match self {
            Composite::Person => Some(Slot::Person),
            Composite::Day => Some(Slot::Day),
            Composite::Time => Some(Slot::Time),
            Composite::Confirmation => Some(Slot::Confirmation),
            Composite::Greeting | Composite::FullDay => None,
        }
    }
}

/// Current node of the hierarchical machine. Holds no user content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialogueState {
    /// Waiting for the speech engine to become ready.
    Prepare,
    Composite(Composite, Phase),
    /// Speaking the who-is answer.
    WhoIsX,
    /// Speaking the "didn't understand" apology before re-greeting.
    UnknownIntent,
    /// Task committed. Waits for a click.
    AppointmentCreated,
    /// Reprompt cap exceeded; apologizing before going idle.
    Abandoned,
    /// Idle. Waits for a click.
    Done,
}

impl DialogueState {
    pub fn prompt(composite: Composite) -> Self {
        DialogueState::Composite(composite, Phase::Prompt)
    }

    /// States that accept the external click.
    pub fn accepts_click(&self) -> bool {
        matches!(self, DialogueState::AppointmentCreated | DialogueState::Done)
    }

    pub fn composite(&self) -> Option<Composite> {
        match self {
            DialogueState::Composite(c, _) => Some(*c),
            _ => None,
        }
    }
}

impl fmt::Display for DialogueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialogueState::Composite(c, p) => write!(f, "{:?}.{:?}", c, p),
            other => write!(f, "{:?}", other),
        }
    }
}
