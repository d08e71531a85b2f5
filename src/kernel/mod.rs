pub mod event;
pub mod intent;
pub mod machine;
pub mod prompts;
pub mod record;
pub mod runner;
pub mod state;
pub mod telemetry;
