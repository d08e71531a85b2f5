use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use parley::boundary::ConsoleBoundary;
use parley::kernel::state::Flow;
use parley::services::nlu::NluClient;
use parley::{DialogueConfig, DialogueRunner};

/// Turn-based appointment booking dialogue on the terminal.
#[derive(Parser, Debug)]
#[command(name = "parley", version, about)]
struct CliArgs {
    /// Path to the TOML configuration file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Dialogue flow.
    #[arg(short = 'f', long = "flow", value_enum)]
    flow: Option<Flow>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => DialogueConfig::load_or_default(path),
        None => DialogueConfig::default(),
    };
    if let Some(flow) = args.flow {
        config.dialogue.flow = flow;
    }
    let level = args.log_level.clone().unwrap_or_else(|| config.log.level.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::info!("Parley booting ({:?} flow)", config.dialogue.flow);

    let machine = config.build_machine()?;
    let nlu = NluClient::from_config(&config.nlu)?;
    if config.dialogue.flow == Flow::Nlu && nlu.is_none() {
        tracing::warn!("NLU flow without an NLU endpoint: every request will be unknown");
    }

    let (event_tx, event_rx) = mpsc::channel(100);
    let (command_tx, command_rx) = mpsc::channel(100);

    let boundary = ConsoleBoundary::new(
        nlu,
        Duration::from_millis(config.speech.no_input_timeout_ms),
    );
    tokio::spawn(boundary.run(command_rx, event_tx));

    let shutdown = CancellationToken::new();
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let mut runner = DialogueRunner::new(machine, event_rx, command_tx);
    runner.run(shutdown).await?;

    let snapshot = runner.telemetry.snapshot();
    tracing::info!(
        "Session ended: {} tasks started, {} completed, {} no-input turns",
        snapshot.task_stats.started,
        snapshot.task_stats.completed,
        snapshot.turn_stats.no_inputs
    );
    Ok(())
}
