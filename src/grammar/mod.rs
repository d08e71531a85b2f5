//! Static phrase grammar.
//!
//! Maps a canonical utterance to the slot values it carries. The table is
//! configuration data: it can be swapped for a JSON file without touching the
//! turn machine.

mod table;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{DialogueError, Result};
use crate::kernel::record::{Confirmation, PartialSlots};

/// A grammar entry is a partial slot record.
pub type GrammarEntry = PartialSlots;

/// Lower-case, trim, and collapse every whitespace run to a single space.
///
/// "  Of   Course " and "of course" share the key "of course".
pub fn canonicalize(utterance: &str) -> String {
    utterance
        .split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

// On-disk shape: confirmation is a plain boolean.
#[derive(Debug, Deserialize)]
struct RawEntry {
    person: Option<String>,
    day: Option<String>,
    time: Option<String>,
    confirmation: Option<bool>,
}

impl From<RawEntry> for GrammarEntry {
    fn from(raw: RawEntry) -> Self {
        GrammarEntry {
            person: raw.person,
            day: raw.day,
            time: raw.time,
            confirmation: raw.confirmation.map(Confirmation::from),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Grammar {
    entries: HashMap<String, GrammarEntry>,
}

impl Default for Grammar {
    fn default() -> Self {
        Self::appointment()
    }
}

impl Grammar {
    /// The built-in appointment-booking vocabulary.
    pub fn appointment() -> Self {
        Self::from_entries(table::appointment_entries())
    }

    pub fn from_entries<K: AsRef<str>>(
        entries: impl IntoIterator<Item = (K, GrammarEntry)>,
    ) -> Self {
        let entries = entries
            .into_iter()
            .map(|(phrase, entry)| (canonicalize(phrase.as_ref()), entry))
            .collect();
        Self { entries }
    }

    /// Parse a JSON object of `phrase -> {person?, day?, time?, confirmation?}`.
    ///
    /// Two phrases with the same canonical form (`"Monday"`, `"monday "`) are
    /// rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, RawEntry> =
            serde_json::from_str(json).map_err(|e| DialogueError::Grammar(e.to_string()))?;

        let mut entries = HashMap::with_capacity(raw.len());
        for (phrase, entry) in raw {
            let key = canonicalize(&phrase);
            if entries.insert(key.clone(), GrammarEntry::from(entry)).is_some() {
                return Err(DialogueError::Grammar(format!(
                    "phrase \"{}\" collides with another entry as \"{}\"",
                    phrase, key
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let grammar = Self::from_json(&content)?;
        info!("Grammar loaded from {} ({} phrases)", path.display(), grammar.len());
        Ok(grammar)
    }

    /// Exact-match probe on the canonical form. Unknown phrases yield `None`.
    pub fn lookup(&self, utterance: &str) -> Option<&GrammarEntry> {
        self.entries.get(&canonicalize(utterance))
    }

    pub fn is_known(&self, utterance: &str) -> bool {
        self.lookup(utterance).is_some()
    }

    pub fn person(&self, utterance: &str) -> Option<&str> {
        self.lookup(utterance).and_then(|e| e.person.as_deref())
    }

    pub fn day(&self, utterance: &str) -> Option<&str> {
        self.lookup(utterance).and_then(|e| e.day.as_deref())
    }

    pub fn time(&self, utterance: &str) -> Option<&str> {
        self.lookup(utterance).and_then(|e| e.time.as_deref())
    }

    pub fn confirmation(&self, utterance: &str) -> Option<Confirmation> {
        self.lookup(utterance).and_then(|e| e.confirmation)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
