use std::collections::VecDeque;
use std::io::Write;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::kernel::event::{DialogueEvent, RecognitionResult, SpeechCommand};
use crate::services::nlu::NluClient;

const CLICK: &str = ":click";

/// Terminal stand-in for the speech engine.
///
/// SPEAK prints, LISTEN takes one typed line. An empty line, or no line within
/// the no-input timeout, is a no-input turn. `:click` is the UI button; it is
/// only delivered between listen turns. Lines typed ahead of a LISTEN are kept
/// for it. End of input stops the dialogue.
pub struct ConsoleBoundary {
    nlu: Option<NluClient>,
    no_input_timeout: Duration,
}

// Typed lines not yet consumed.
struct UserInput {
    lines: mpsc::Receiver<String>,
    pending: VecDeque<String>,
    closed: bool,
}

enum Answer {
    Line(String),
    Silence,
    Ended,
}

enum Wake {
    Command(Option<SpeechCommand>),
    Line(Option<String>),
}

impl UserInput {
    fn new(lines: mpsc::Receiver<String>) -> Self {
        Self {
            lines,
            pending: VecDeque::new(),
            closed: false,
        }
    }

    /// Next answer typed before `deadline`. Clicks are skipped.
    async fn answer(&mut self, deadline: Instant) -> Answer {
        loop {
            let line = match self.pending.pop_front() {
                Some(line) => line,
                None if self.closed => return Answer::Ended,
                None => match tokio::time::timeout_at(deadline, self.lines.recv()).await {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        self.closed = true;
                        return Answer::Ended;
                    }
                    Err(_) => return Answer::Silence,
                },
            };
            if line.trim() == CLICK {
                debug!("Click ignored while listening");
                continue;
            }
            return Answer::Line(line);
        }
    }
}

impl ConsoleBoundary {
    pub fn new(nlu: Option<NluClient>, no_input_timeout: Duration) -> Self {
        Self {
            nlu,
            no_input_timeout,
        }
    }

    /// Serve the dialogue from stdin.
    pub async fn run(
        self,
        commands: mpsc::Receiver<SpeechCommand>,
        events: mpsc::Sender<DialogueEvent>,
    ) {
        // Stdin is read on its own task so clicks arrive while idle.
        let (line_tx, lines) = mpsc::channel::<String>(16);
        tokio::spawn(async move {
            let mut reader = BufReader::new(tokio::io::stdin()).lines();
            while let Ok(Some(line)) = reader.next_line().await {
                if line_tx.send(line).await.is_err() {
                    break;
                }
            }
        });

        println!("Type your answers. Empty line = silence, '{}' = click.", CLICK);
        self.serve(commands, events, lines).await;
    }

    /// Serve the dialogue from `lines`, one entry per typed line.
    ///
    /// When input ends the event sender is dropped first, so the runner
    /// finishes on a closed event channel. Commands are drained until the
    /// runner lets go of its sender.
    pub async fn serve(
        &self,
        mut commands: mpsc::Receiver<SpeechCommand>,
        events: mpsc::Sender<DialogueEvent>,
        lines: mpsc::Receiver<String>,
    ) {
        let mut input = UserInput::new(lines);

        loop {
            let wake = tokio::select! {
                command = commands.recv() => Wake::Command(command),
                line = input.lines.recv(), if !input.closed => Wake::Line(line),
            };

            let event = match wake {
                Wake::Command(None) => return,
                Wake::Command(Some(SpeechCommand::Prepare)) => DialogueEvent::EngineReady,
                Wake::Command(Some(SpeechCommand::Speak(text))) => {
                    println!("[SYSTEM] {}", text);
                    DialogueEvent::SpeakComplete
                }
                Wake::Command(Some(SpeechCommand::Listen { nlu })) => {
                    match self.listen(&mut input, nlu).await {
                        Some(event) => event,
                        None => break,
                    }
                }
                Wake::Line(Some(line)) if line.trim() == CLICK => DialogueEvent::Click,
                Wake::Line(Some(line)) => {
                    input.pending.push_back(line);
                    continue;
                }
                Wake::Line(None) => {
                    input.closed = true;
                    if input.pending.is_empty() {
                        break;
                    }
                    continue;
                }
            };

            if events.send(event).await.is_err() {
                return;
            }
        }

        info!("Console input ended");
        drop(events);
        while commands.recv().await.is_some() {}
    }

    /// One listen turn. `None` once input has ended.
    async fn listen(&self, input: &mut UserInput, nlu: bool) -> Option<DialogueEvent> {
        print!("[USER] ");
        let _ = std::io::stdout().flush();

        let deadline = Instant::now() + self.no_input_timeout;
        let line = match input.answer(deadline).await {
            Answer::Line(line) => line,
            Answer::Silence => return Some(DialogueEvent::NoInput),
            Answer::Ended => return None,
        };

        let text = line.trim();
        if text.is_empty() {
            return Some(DialogueEvent::NoInput);
        }

        let interpretation = match (&self.nlu, nlu) {
            (Some(client), true) => match client.analyze(text).await {
                Ok(interpretation) => Some(interpretation),
                Err(e) => {
                    warn!("NLU failed, continuing without interpretation: {}", e);
                    None
                }
            },
            _ => None,
        };

        Some(DialogueEvent::Recognised(RecognitionResult::new(text), interpretation))
    }
}
