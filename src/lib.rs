pub mod boundary;
pub mod config;
pub mod error;
pub mod grammar;
pub mod kernel;
pub mod nlu;
pub mod services;

pub use config::DialogueConfig;
pub use error::{DialogueError, Result};
pub use grammar::Grammar;
pub use kernel::machine::{Transition, TurnMachine};
pub use kernel::runner::DialogueRunner;
