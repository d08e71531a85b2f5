use std::sync::Arc;

use tokio::sync::mpsc;

use parley::boundary::{Cue, ScriptedBoundary};
use parley::kernel::event::SpeechCommand;
use parley::kernel::intent::knowledge::biography;
use parley::kernel::prompts;
use parley::kernel::record::Confirmation;
use parley::kernel::state::{Composite, DialogueState, Flow, Phase};
use parley::nlu::{NluInterpretation, MEETING_TIME, PERSON};
use parley::{DialogueRunner, Grammar, TurnMachine};

fn play(cues: Vec<Cue>) -> (DialogueRunner, ScriptedBoundary) {
    let machine = TurnMachine::new(Flow::Nlu, Arc::new(Grammar::appointment()));
    let (_event_tx, event_rx) = mpsc::channel(8);
    let (command_tx, _command_rx) = mpsc::channel(8);
    let mut runner = DialogueRunner::new(machine, event_rx, command_tx);
    let mut boundary = ScriptedBoundary::new(cues);
    boundary.drive(&mut runner);
    (runner, boundary)
}

fn who_is(name: &str) -> Cue {
    let text = format!("who is {}", name);
    let interpretation = NluInterpretation::new("who_is_X").with_entity(PERSON, name, 7);
    Cue::SayInterpreted(text, interpretation)
}

#[test]
fn test_scenario_d_who_is_known_person() {
    let (runner, boundary) = play(vec![who_is("Taylor")]);

    assert_eq!(runner.state, DialogueState::Done);
    assert_eq!(runner.record.person.as_deref(), Some("Taylor"));
    assert_eq!(
        boundary.spoken(),
        vec![prompts::HOW_CAN_I_HELP, biography("Taylor").unwrap()]
    );
    assert!(boundary.commands.contains(&SpeechCommand::Listen { nlu: true }));
}

#[test]
fn test_scenario_d_who_is_unknown_person() {
    let (runner, boundary) = play(vec![who_is("Beyoncé")]);

    assert_eq!(runner.state, DialogueState::Done);
    assert_eq!(boundary.spoken().last(), Some(&"Sorry, I don't have info on Beyoncé."));
}

#[test]
fn test_who_is_without_person_entity() {
    let cue = Cue::SayInterpreted("who is that".to_string(), NluInterpretation::new("who_is_X"));
    let (_, boundary) = play(vec![cue]);

    assert_eq!(boundary.spoken().last(), Some(&"I couldn't identify the person."));
}

#[test]
fn test_unknown_intent_returns_to_greeting() {
    let cue = Cue::SayInterpreted("order a pizza".to_string(), NluInterpretation::new("orderFood"));
    let (runner, boundary) = play(vec![cue]);

    assert_eq!(runner.state, DialogueState::Composite(Composite::Greeting, Phase::Listen));
    assert_eq!(
        boundary.spoken(),
        vec![prompts::HOW_CAN_I_HELP, prompts::UNKNOWN_INTENT, prompts::HOW_CAN_I_HELP]
    );

    let snapshot = runner.telemetry.snapshot();
    assert_eq!(snapshot.routing_stats.unknown, 1);
    assert_eq!(snapshot.task_stats.restarted, 1);
}

#[test]
fn test_missing_interpretation_is_unknown_intent() {
    let (runner, boundary) = play(vec![Cue::say("hello")]);

    assert_eq!(runner.state, DialogueState::Composite(Composite::Greeting, Phase::Listen));
    assert!(boundary.spoken().contains(&prompts::UNKNOWN_INTENT));
}

#[test]
fn test_greeting_no_input() {
    let (runner, boundary) = play(vec![Cue::Silence]);

    assert_eq!(runner.state, DialogueState::Composite(Composite::Greeting, Phase::Listen));
    assert_eq!(
        boundary.spoken().last(),
        Some(&"I can't hear you! How can I help you today?")
    );
}

#[test]
fn test_create_meeting_fills_day_time_and_confirms() {
    let interpretation = NluInterpretation::new("createMeeting").with_entity(PERSON, "Jennie", 24);
    let cues = vec![
        Cue::SayInterpreted("create a meeting with Jennie".to_string(), interpretation),
        Cue::say("Friday"),
        Cue::say("afternoon"),
        Cue::say("absolutely"),
    ];
    let (runner, boundary) = play(cues);

    assert_eq!(runner.state, DialogueState::AppointmentCreated);
    assert_eq!(runner.record.person.as_deref(), Some("Jennie"));
    assert_eq!(runner.record.day.as_deref(), Some("Friday"));
    assert_eq!(runner.record.time.as_deref(), Some("14:30"));
    assert_eq!(runner.record.confirmation, Some(Confirmation::Affirmed));

    let spoken = boundary.spoken();
    let confirm = "Do you want me to create an appointment with Jennie on Friday at 14:30?";
    assert!(spoken.contains(&confirm));
    // No full-day question in the routed dialogue.
    assert!(!spoken.contains(&"Will it take the whole day?"));
    assert_eq!(runner.telemetry.snapshot().routing_stats.create_meeting, 1);
}

#[test]
fn test_create_meeting_time_entity_is_replaced_by_answer() {
    let interpretation = NluInterpretation::new("createMeeting")
        .with_entity(PERSON, "Taylor", 22)
        .with_entity(MEETING_TIME, "at 9", 29);
    let cues = vec![
        Cue::SayInterpreted("book a meeting with Taylor at 9".to_string(), interpretation),
        Cue::say("today"),
        Cue::say("17"),
    ];
    let (runner, _) = play(cues);

    assert_eq!(runner.state, DialogueState::Composite(Composite::Confirmation, Phase::Listen));
    assert_eq!(runner.record.time.as_deref(), Some("17:00"));
}

#[test]
fn test_who_is_then_click_greets_again() {
    let (runner, boundary) = play(vec![who_is("Rosé"), Cue::Click]);

    assert_eq!(runner.state, DialogueState::Composite(Composite::Greeting, Phase::Listen));
    assert_eq!(runner.record.person, None);
    assert_eq!(
        boundary.spoken().iter().filter(|s| **s == prompts::HOW_CAN_I_HELP).count(),
        2
    );
}
