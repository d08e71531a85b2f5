use crate::kernel::record::Confirmation;

use super::GrammarEntry;

/// Built-in appointment vocabulary: canonical phrase -> slot values.
pub(super) fn appointment_entries() -> Vec<(&'static str, GrammarEntry)> {
    let people = [
        ("vlad", "Vladislav Maraev"),
        ("aya", "Nayat Astaiza Soriano"),
        ("victoria", "Victoria Daniilidou"),
        ("bella", "Bella Du"),
        ("xin", "Xin Bian"),
        ("jennie", "Jennie Kim"),
        ("rosé", "Rosé"),
        ("taylor", "Taylor"),
    ];
    let days = [
        ("monday", "Monday"),
        ("tuesday", "Tuesday"),
        ("wednesday", "Wednesday"),
        ("thursday", "Thursday"),
        ("friday", "Friday"),
        ("today", "Today"),
        ("tomorrow", "Tomorrow"),
        ("next", "Next week"),
    ];
    let times = [
        ("10", "10:00"),
        ("11", "11:00"),
        ("12", "12:00"),
        ("13", "13:00"),
        ("15", "15:00"),
        ("17", "17:00"),
        ("morning", "9:00"),
        ("afternoon", "14:30"),
        ("evening", "19:00"),
    ];
    let confirmations = [
        ("yes", Confirmation::Affirmed),
        ("of course", Confirmation::Affirmed),
        ("sure", Confirmation::Affirmed),
        ("absolutely", Confirmation::Affirmed),
        ("no", Confirmation::Denied),
        ("no way", Confirmation::Denied),
    ];

    let mut entries = Vec::new();
    for (phrase, name) in people {
        let entry = GrammarEntry {
            person: Some(name.to_string()),
            ..Default::default()
        };
        entries.push((phrase, entry));
    }
    for (phrase, day) in days {
        entries.push((phrase, GrammarEntry { day: Some(day.to_string()), ..Default::default() }));
    }
    for (phrase, time) in times {
        entries.push((phrase, GrammarEntry { time: Some(time.to_string()), ..Default::default() }));
    }
    for (phrase, answer) in confirmations {
        entries.push((phrase, GrammarEntry { confirmation: Some(answer), ..Default::default() }));
    }
    entries
}
