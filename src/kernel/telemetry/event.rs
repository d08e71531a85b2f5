use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::kernel::intent::IntentRoute;
use crate::kernel::state::{Composite, DialogueState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    StateEntered { state: DialogueState },

    /// An event with no enabled transition in `state`.
    EventIgnored { state: DialogueState },

    NoInput { composite: Composite },

    OutOfGrammar { composite: Composite },

    /// A composite re-asked its own question.
    Reprompt { composite: Composite, count: u32 },

    IntentRouted { route: IntentRoute },

    Task(TaskEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskEvent {
    Started(Uuid),
    Completed(Uuid),
    /// Discarded and replaced by a fresh task (denied, click, unknown intent).
    Restarted(Uuid),
    Abandoned(Uuid),
}
