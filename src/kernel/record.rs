use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::event::RecognitionResult;
use crate::nlu::NluInterpretation;

/// Answer to a yes/no question. "Unset" is the absence of a value (`None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confirmation {
    Affirmed,
    Denied,
}

impl From<bool> for Confirmation {
    fn from(yes: bool) -> Self {
        if yes {
            Confirmation::Affirmed
        } else {
            Confirmation::Denied
        }
    }
}

/// The task slots a turn can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Person,
    Day,
    Time,
    Confirmation,
}

/// Slot values extracted from a single turn. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialSlots {
    pub person: Option<String>,
    pub day: Option<String>,
    pub time: Option<String>,
    pub confirmation: Option<Confirmation>,
}

impl PartialSlots {
    pub fn is_empty(&self) -> bool {
        filled(&self.person).is_none()
            && filled(&self.day).is_none()
            && filled(&self.time).is_none()
            && self.confirmation.is_none()
    }

    /// Field-wise: `other` wins wherever it holds a non-empty value.
    pub fn overlay(&self, other: &PartialSlots) -> PartialSlots {
        PartialSlots {
            person: pick(&other.person, &self.person),
            day: pick(&other.day, &self.day),
            time: pick(&other.time, &self.time),
            confirmation: other.confirmation.or(self.confirmation),
        }
    }
}

fn filled(value: &Option<String>) -> Option<&String> {
    value.as_ref().filter(|v| !v.trim().is_empty())
}

fn pick(candidate: &Option<String>, current: &Option<String>) -> Option<String> {
    filled(candidate).or(current.as_ref()).cloned()
}

/// The mutable aggregate for one task instance.
///
/// INVARIANT: a filled slot is only ever replaced by a new non-empty value for
/// the same slot. A turn that extracts nothing leaves it untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueRecord {
    pub task_id: Uuid,
    pub person: Option<String>,
    pub day: Option<String>,
    pub time: Option<String>,
    pub confirmation: Option<Confirmation>,
    /// Answer to "Will it take the whole day?".
    pub full_day: Option<bool>,
    pub last_result: Option<RecognitionResult>,
    pub last_interpretation: Option<NluInterpretation>,
    /// Consecutive re-asks of the current question.
    pub reprompts: u32,
}

impl Default for DialogueRecord {
    fn default() -> Self {
        Self {
            task_id: Uuid::new_v4(),
            person: None,
            day: None,
            time: None,
            confirmation: None,
            full_day: None,
            last_result: None,
            last_interpretation: None,
            reprompts: 0,
        }
    }
}

/// Strict record delta. The turn machine mutates the record only through these.
#[derive(Debug, Clone)]
pub enum RecordDelta {
    ResultStored(RecognitionResult, Option<NluInterpretation>),
    ResultCleared,
    SlotsExtracted(PartialSlots),
    FullDayAnswered(bool),
    RepromptCounted,
    RepromptsReset,
}

impl DialogueRecord {
    /// Fresh record with a new task id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot aggregation: `new = candidate ?? record` for every slot.
    pub fn merge(&self, candidate: &PartialSlots) -> DialogueRecord {
        let slots = self.slots().overlay(candidate);
        DialogueRecord {
            person: slots.person,
            day: slots.day,
            time: slots.time,
            confirmation: slots.confirmation,
            ..self.clone()
        }
    }

    pub fn slots(&self) -> PartialSlots {
        PartialSlots {
            person: self.person.clone(),
            day: self.day.clone(),
            time: self.time.clone(),
            confirmation: self.confirmation,
        }
    }

    pub fn has(&self, slot: Slot) -> bool {
        match slot {
            Slot::Person => filled(&self.person).is_some(),
            Slot::Day => filled(&self.day).is_some(),
            Slot::Time => filled(&self.time).is_some(),
            Slot::Confirmation => self.confirmation.is_some(),
        }
    }

    pub fn reduce(&mut self, delta: RecordDelta) {
        match delta {
            RecordDelta::ResultStored(result, interpretation) => {
                self.last_result = Some(result);
                self.last_interpretation = interpretation;
            }
            RecordDelta::ResultCleared => {
                self.last_result = None;
                self.last_interpretation = None;
            }
            RecordDelta::SlotsExtracted(candidate) => {
                *self = self.merge(&candidate);
            }
            RecordDelta::FullDayAnswered(answer) => {
                self.full_day = Some(answer);
            }
            RecordDelta::RepromptCounted => {
                self.reprompts = self.reprompts.saturating_add(1);
            }
            RecordDelta::RepromptsReset => {
                self.reprompts = 0;
            }
        }
    }
}
