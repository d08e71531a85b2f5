//! Dialogue telemetry.
//!
//! # SAFETY INVARIANT
//! Telemetry is a write-only side channel. The turn machine emits it but
//! never reads it back when deciding a transition.
//!
//! # PRIVACY INVARIANT
//! Events carry state names, routes, task ids and counts. Never utterances,
//! slot values or NLU entities.

pub mod event;
pub mod metrics;
pub mod recorder;
