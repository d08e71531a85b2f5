//! NLU result types and the adapter into the slot vocabulary.
//!
//! The shapes mirror the `prediction` object of a conversational language
//! understanding service, so a response body deserializes directly.

use serde::{Deserialize, Serialize};

use crate::kernel::record::PartialSlots;

pub const PERSON: &str = "person";
pub const MEETING_DAY: &str = "meeting_day";
pub const MEETING_TIME: &str = "meeting_time";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentScore {
    pub category: String,
    pub confidence_score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub category: String,
    pub text: String,
    pub confidence_score: f32,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NluInterpretation {
    pub top_intent: String,
    #[serde(default)]
    pub intents: Vec<IntentScore>,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl NluInterpretation {
    pub fn new(top_intent: &str) -> Self {
        Self {
            top_intent: top_intent.to_string(),
            intents: Vec::new(),
            entities: Vec::new(),
        }
    }

    /// Builder helper: append an entity spanning `text` at `offset`.
    pub fn with_entity(mut self, category: &str, text: &str, offset: usize) -> Self {
        self.entities.push(Entity {
            category: category.to_string(),
            text: text.to_string(),
            confidence_score: 1.0,
            offset,
            length: text.chars().count(),
        });
        self
    }

    /// Confidence of the top intent, if the service listed it.
    pub fn confidence(&self) -> Option<f32> {
        self.intents
            .iter()
            .find(|i| i.category == self.top_intent)
            .map(|i| i.confidence_score)
    }

    /// First entity of `category` in service order.
    pub fn entity(&self, category: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.category == category)
    }
}

/// Normalize an interpretation into slot candidates.
///
/// The first entity per category wins. The top intent is not a slot value.
pub fn adapt(interpretation: &NluInterpretation) -> PartialSlots {
    let text = |category: &str| interpretation.entity(category).map(|e| e.text.clone());
    PartialSlots {
        person: text(PERSON),
        day: text(MEETING_DAY),
        time: text(MEETING_TIME),
        confirmation: None,
    }
}
