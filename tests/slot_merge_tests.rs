use parley::kernel::record::{Confirmation, DialogueRecord, PartialSlots, RecordDelta, Slot};
use parley::nlu::{adapt, NluInterpretation, MEETING_TIME, PERSON};

fn record_with_person(name: &str) -> DialogueRecord {
    DialogueRecord {
        person: Some(name.to_string()),
        ..DialogueRecord::new()
    }
}

#[test]
fn test_carry_forward_keeps_existing_slot() {
    let record = record_with_person("Alice");

    let merged = record.merge(&PartialSlots::default());
    assert_eq!(merged.person.as_deref(), Some("Alice"));

    let merged = record.merge(&PartialSlots {
        day: Some("Monday".to_string()),
        ..Default::default()
    });
    assert_eq!(merged.person.as_deref(), Some("Alice"));
    assert_eq!(merged.day.as_deref(), Some("Monday"));
}

#[test]
fn test_new_value_replaces_slot() {
    let record = record_with_person("Alice");
    let merged = record.merge(&PartialSlots {
        person: Some("Bob".to_string()),
        ..Default::default()
    });
    assert_eq!(merged.person.as_deref(), Some("Bob"));
}

#[test]
fn test_empty_string_does_not_overwrite() {
    let record = record_with_person("Alice");
    let merged = record.merge(&PartialSlots {
        person: Some("   ".to_string()),
        ..Default::default()
    });
    assert_eq!(merged.person.as_deref(), Some("Alice"));
}

#[test]
fn test_confirmation_is_tri_state() {
    let affirmed = DialogueRecord {
        confirmation: Some(Confirmation::Affirmed),
        ..DialogueRecord::new()
    };
    // No confirmation phrase: untouched, not coerced to denied.
    assert_eq!(affirmed.merge(&PartialSlots::default()).confirmation, Some(Confirmation::Affirmed));

    let unset = DialogueRecord::new();
    assert_eq!(unset.merge(&PartialSlots::default()).confirmation, None);

    let denied = unset.merge(&PartialSlots {
        confirmation: Some(Confirmation::Denied),
        ..Default::default()
    });
    assert_eq!(denied.confirmation, Some(Confirmation::Denied));
}

#[test]
fn test_merge_preserves_bookkeeping() {
    let mut record = record_with_person("Alice");
    record.full_day = Some(true);
    record.reprompts = 3;

    let merged = record.merge(&PartialSlots {
        time: Some("10:00".to_string()),
        ..Default::default()
    });
    assert_eq!(merged.task_id, record.task_id);
    assert_eq!(merged.full_day, Some(true));
    assert_eq!(merged.reprompts, 3);
    assert!(merged.has(Slot::Time));
    assert!(!merged.has(Slot::Day));
}

#[test]
fn test_reduce_result_cleared() {
    let mut record = DialogueRecord::new();
    record.reduce(RecordDelta::ResultStored(
        parley::kernel::event::RecognitionResult::new("vlad"),
        Some(NluInterpretation::new("createMeeting")),
    ));
    assert!(record.last_result.is_some());
    assert!(record.last_interpretation.is_some());

    record.reduce(RecordDelta::ResultCleared);
    assert!(record.last_result.is_none());
    assert!(record.last_interpretation.is_none());
}

#[test]
fn test_adapt_first_entity_wins() {
    let interpretation = NluInterpretation::new("createMeeting")
        .with_entity(PERSON, "Jennie", 17)
        .with_entity(PERSON, "Rosé", 28)
        .with_entity(MEETING_TIME, "at noon", 33);

    let slots = adapt(&interpretation);
    assert_eq!(slots.person.as_deref(), Some("Jennie"));
    assert_eq!(slots.time.as_deref(), Some("at noon"));
    assert_eq!(slots.day, None);
    assert_eq!(slots.confirmation, None);
}

#[test]
fn test_adapt_without_entities_is_empty() {
    let slots = adapt(&NluInterpretation::new("who_is_X"));
    assert!(slots.is_empty());
}

#[test]
fn test_interpretation_deserializes_service_shape() {
    let json = r#"{
        "topIntent": "who_is_X",
        "projectKind": "Conversation",
        "intents": [
            { "category": "who_is_X", "confidenceScore": 0.93 },
            { "category": "createMeeting", "confidenceScore": 0.04 }
        ],
        "entities": [
            { "category": "person", "text": "Taylor", "offset": 7, "length": 6, "confidenceScore": 1 }
        ]
    }"#;
    let interpretation: NluInterpretation = serde_json::from_str(json).unwrap();

    assert_eq!(interpretation.top_intent, "who_is_X");
    assert_eq!(interpretation.confidence(), Some(0.93));
    let entity = interpretation.entity(PERSON).unwrap();
    assert_eq!(entity.text, "Taylor");
    assert_eq!((entity.offset, entity.length), (7, 6));
}
