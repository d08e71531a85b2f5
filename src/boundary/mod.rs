//! Speech boundary implementations.
//!
//! A boundary consumes `SpeechCommand`s and answers with exactly one
//! turn-ending `DialogueEvent` per command (plus any UI clicks).

pub mod console;
pub mod scripted;

pub use console::ConsoleBoundary;
pub use scripted::{Cue, ScriptedBoundary};
