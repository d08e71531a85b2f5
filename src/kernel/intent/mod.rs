pub mod knowledge;
pub mod router;

pub use router::{IntentRoute, IntentRouter};
