use parley::grammar::{canonicalize, Grammar};
use parley::kernel::record::Confirmation;
use parley::DialogueError;

#[test]
fn test_lookup_is_case_insensitive() {
    let grammar = Grammar::appointment();
    assert_eq!(grammar.lookup("MONDAY"), grammar.lookup("monday"));
    assert_eq!(grammar.day("Monday"), Some("Monday"));
}

#[test]
fn test_unknown_phrase_is_none() {
    let grammar = Grammar::appointment();
    assert!(grammar.lookup("banana").is_none());
    assert!(!grammar.is_known("banana"));
    assert!(grammar.lookup("").is_none());
    assert_eq!(grammar.person("banana"), None);
    assert_eq!(grammar.confirmation("banana"), None);
}

#[test]
fn test_whitespace_is_collapsed_not_removed() {
    assert_eq!(canonicalize("  Of   Course "), "of course");
    assert_eq!(canonicalize("NO\tWAY"), "no way");

    let grammar = Grammar::appointment();
    assert_eq!(grammar.confirmation("  Of   Course "), Some(Confirmation::Affirmed));
    assert_eq!(grammar.confirmation("no way"), Some(Confirmation::Denied));
    // Whitespace inside a phrase is significant.
    assert!(!grammar.is_known("ofcourse"));
}

#[test]
fn test_field_accessors() {
    let grammar = Grammar::appointment();
    assert_eq!(grammar.person("vlad"), Some("Vladislav Maraev"));
    assert_eq!(grammar.time("10"), Some("10:00"));
    assert_eq!(grammar.time("afternoon"), Some("14:30"));
    assert_eq!(grammar.day("next"), Some("Next week"));
    assert_eq!(grammar.confirmation("yes"), Some(Confirmation::Affirmed));

    // Entries only carry their own field.
    assert_eq!(grammar.day("vlad"), None);
    assert_eq!(grammar.confirmation("monday"), None);
}

#[test]
fn test_non_ascii_phrase() {
    let grammar = Grammar::appointment();
    assert_eq!(grammar.person("ROSÉ"), Some("Rosé"));
}

#[test]
fn test_grammar_from_json_replaces_table() {
    let json = r#"{
        "Doctor Who": { "person": "The Doctor" },
        "noon": { "time": "12:00" },
        "yep": { "confirmation": true },
        "nope": { "confirmation": false }
    }"#;
    let grammar = Grammar::from_json(json).unwrap();

    assert_eq!(grammar.len(), 4);
    assert_eq!(grammar.person("doctor   who"), Some("The Doctor"));
    assert_eq!(grammar.time("NOON"), Some("12:00"));
    assert_eq!(grammar.confirmation("yep"), Some(Confirmation::Affirmed));
    assert_eq!(grammar.confirmation("nope"), Some(Confirmation::Denied));
    assert!(!grammar.is_known("monday"), "Built-in vocabulary must not leak in");
}

#[test]
fn test_grammar_from_bad_json_is_error() {
    let result = Grammar::from_json("[1, 2, 3]");
    assert!(matches!(result, Err(DialogueError::Grammar(_))));
}

#[test]
fn test_grammar_from_json_rejects_canonical_collisions() {
    let json = r#"{
        "Monday": { "day": "Monday" },
        "monday ": { "day": "Tuesday" }
    }"#;

    let result = Grammar::from_json(json);
    assert!(matches!(result, Err(DialogueError::Grammar(_))));
}
