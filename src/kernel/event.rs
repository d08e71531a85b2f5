use serde::{Deserialize, Serialize};

use crate::nlu::NluInterpretation;

/// One recognized user turn, as transcribed by the speech engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub utterance: String,
    pub confidence: Option<f32>,
}

impl RecognitionResult {
    pub fn new(utterance: &str) -> Self {
        Self {
            utterance: utterance.to_string(),
            confidence: None,
        }
    }
}

/// Inbound events from the speech boundary (plus the UI click).
#[derive(Debug, Clone, PartialEq)]
pub enum DialogueEvent {
    EngineReady,
    SpeakComplete,
    /// A listen turn ended with recognized speech, optionally interpreted by NLU.
    Recognised(RecognitionResult, Option<NluInterpretation>),
    /// A listen turn ended without input before the engine's timeout.
    NoInput,
    /// External UI interrupt. Honored only from terminal/idle states.
    Click,
}

impl DialogueEvent {
    /// Recognized text with no NLU interpretation.
    pub fn heard(utterance: &str) -> Self {
        DialogueEvent::Recognised(RecognitionResult::new(utterance), None)
    }

    /// Recognized text bundled with an NLU interpretation.
    pub fn interpreted(utterance: &str, interpretation: NluInterpretation) -> Self {
        DialogueEvent::Recognised(RecognitionResult::new(utterance), Some(interpretation))
    }

    pub fn name(&self) -> &'static str {
        match self {
            DialogueEvent::EngineReady => "ENGINE_READY",
            DialogueEvent::SpeakComplete => "SPEAK_COMPLETE",
            DialogueEvent::Recognised(..) => "RECOGNISED",
            DialogueEvent::NoInput => "NO_INPUT",
            DialogueEvent::Click => "CLICK",
        }
    }
}

/// Outbound commands to the speech boundary, emitted in order by state entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechCommand {
    Prepare,
    Speak(String),
    Listen { nlu: bool },
}
