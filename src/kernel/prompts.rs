//! System utterances. Fixed strings plus the record-interpolated confirmation.

use super::record::DialogueRecord;
use super::state::{Composite, Flow};

pub const WELCOME: &str = "Let's create an appointment!";
pub const HOW_CAN_I_HELP: &str = "How can I help you today?";
pub const UNKNOWN_INTENT: &str = "Sorry, I didn't understand that!";
pub const APPOINTMENT_CREATED: &str = "Your appointment has been created!";
pub const ABANDONED: &str = "Sorry, I am having trouble understanding you. Click to start over.";

pub fn prompt(composite: Composite, flow: Flow, record: &DialogueRecord) -> String {
    match composite {
        Composite::Greeting => match flow {
            Flow::Grammar => WELCOME.to_string(),
            Flow::Nlu => HOW_CAN_I_HELP.to_string(),
        },
        Composite::Person => "Who are you meeting with?".to_string(),
        Composite::Day => "On which day is your meeting?".to_string(),
        Composite::FullDay => "Will it take the whole day?".to_string(),
        Composite::Time => "What time is your meeting?".to_string(),
        Composite::Confirmation => confirmation(record),
    }
}

pub fn no_input(composite: Composite, flow: Flow, record: &DialogueRecord) -> String {
    let lead = match composite {
        Composite::Greeting | Composite::Person => "I can't hear you!",
        Composite::Day => "I can't hear a day!",
        _ => "I didn't hear that!",
    };
    format!("{} {}", lead, prompt(composite, flow, record))
}

/// Reprompt for a confirmation answer that was neither yes nor no.
pub fn clarify(record: &DialogueRecord) -> String {
    format!("Please answer yes or no. {}", confirmation(record))
}

pub fn echo(utterance: &str, in_grammar: bool) -> String {
    if in_grammar {
        format!("You just said: {}. And it is in the grammar.", utterance)
    } else {
        format!("You just said: {}. And it is not in the grammar.", utterance)
    }
}

/// "Do you want me to create an appointment with P on D at T?"
///
/// An affirmed full-day flag replaces the time with "for the whole day".
/// Unfilled slots are left out of the sentence.
pub fn confirmation(record: &DialogueRecord) -> String {
    let mut message = String::from("Do you want me to create an appointment");
    if let Some(person) = &record.person {
        message.push_str(&format!(" with {}", person));
    }
    if let Some(day) = &record.day {
        message.push_str(&format!(" on {}", day));
    }
    if record.full_day == Some(true) {
        message.push_str(" for the whole day");
    } else if let Some(time) = &record.time {
        message.push_str(&format!(" at {}", time));
    }
    message.push('?');
    message
}
