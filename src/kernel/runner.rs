use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::event::{DialogueEvent, SpeechCommand};
use super::machine::{Transition, TurnMachine};
use super::record::DialogueRecord;
use super::state::DialogueState;
use super::telemetry::recorder::TelemetryRecorder;
use crate::error::{DialogueError, Result};

/// Owns one live dialogue: the machine, its current state and record.
///
/// Created explicitly by the caller and torn down when `run` returns. There is
/// no process-wide instance.
pub struct DialogueRunner {
    pub receiver: mpsc::Receiver<DialogueEvent>,
    commands: mpsc::Sender<SpeechCommand>,
    machine: TurnMachine,
    pub state: DialogueState,
    pub record: DialogueRecord,
    pub telemetry: TelemetryRecorder,
}

impl DialogueRunner {
    pub fn new(
        machine: TurnMachine,
        receiver: mpsc::Receiver<DialogueEvent>,
        commands: mpsc::Sender<SpeechCommand>,
    ) -> Self {
        Self {
            receiver,
            commands,
            machine,
            state: DialogueState::Prepare,
            record: DialogueRecord::new(),
            telemetry: TelemetryRecorder::new(),
        }
    }

    pub fn machine(&self) -> &TurnMachine {
        &self.machine
    }

    /// Enter the initial state. Returns the commands for the boundary.
    pub fn start(&mut self) -> Vec<SpeechCommand> {
        let transition = self.machine.start();
        self.commit(transition)
    }

    /// Pure step: advance state and record with one event.
    /// MUST NOT await I/O. Returns commands to be executed by the driver.
    pub fn step(&mut self, event: DialogueEvent) -> Vec<SpeechCommand> {
        let transition = self.machine.step(&self.state, &event, &self.record);
        self.commit(transition)
    }

    fn commit(&mut self, transition: Transition) -> Vec<SpeechCommand> {
        let Transition {
            state,
            record,
            effects,
            telemetry,
        } = transition;
        self.state = state;
        self.record = record;
        for event in telemetry {
            self.telemetry.record(event);
        }
        effects
    }

    /// Async driver loop.
    ///
    /// Issues the start commands, then applies each inbound event in arrival
    /// order. Returns when the event channel closes or `shutdown` fires.
    pub async fn run(&mut self, shutdown: CancellationToken) -> Result<()> {
        info!("Dialogue runner started ({:?} flow)", self.machine.flow());

        let commands = self.start();
        self.dispatch(commands).await?;

        loop {
            let event = tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Dialogue runner cancelled in {}", self.state);
                    break;
                }
                event = self.receiver.recv() => event,
            };

            let Some(event) = event else {
                info!("Speech boundary closed in {}", self.state);
                break;
            };

            let commands = self.step(event);
            self.dispatch(commands).await?;
        }

        Ok(())
    }

    async fn dispatch(&self, commands: Vec<SpeechCommand>) -> Result<()> {
        for command in commands {
            if self.commands.send(command).await.is_err() {
                warn!("Command channel dropped by speech boundary");
                return Err(DialogueError::ChannelClosed);
            }
        }
        Ok(())
    }
}
