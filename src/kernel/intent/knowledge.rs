//! Static answers for the "who is X" sub-dialogue.

const BIOGRAPHIES: &[(&str, &str)] = &[
    (
        "Jennie",
        "Jennie is a member of BLACKPINK, known for her charismatic stage presence and fashion influence. She recently released her solo album 'RUBY' and is also active in the fashion industry as a brand ambassador.",
    ),
    (
        "Rosé",
        "Rosé is the main vocalist of BLACKPINK. She is praised for her unique voice and emotional delivery in performances. Her single APT has gone viral lately.",
    ),
    (
        "Taylor",
        "Taylor Swift is a globally acclaimed singer-songwriter known for her narrative songwriting style. She has won multiple Grammy Awards and is known for albums like '1989', 'Red', and 'Midnights'. She recently completed her Eras Tour.",
    ),
];

/// Stored biography for `name`, matched case-insensitively.
pub fn biography(name: &str) -> Option<&'static str> {
    let wanted = name.trim().to_lowercase();
    BIOGRAPHIES
        .iter()
        .find(|(key, _)| key.to_lowercase() == wanted)
        .map(|(_, bio)| *bio)
}

/// What to say for a who-is question about `person`.
pub fn answer(person: Option<&str>) -> String {
    match person {
        Some(name) => match biography(name) {
            Some(bio) => bio.to_string(),
            None => format!("Sorry, I don't have info on {}.", name),
        },
        None => "I couldn't identify the person.".to_string(),
    }
}
