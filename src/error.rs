use thiserror::Error;

/// Errors surfaced by the dialogue kernel's plumbing.
///
/// Dialogue outcomes (an unknown phrase, an unknown intent, a silent turn)
/// are never errors. These variants only cover configuration, data loading
/// and the transport to external collaborators.
#[derive(Debug, Error)]
pub enum DialogueError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Grammar table error: {0}")]
    Grammar(String),

    #[error("NLU service error: {0}")]
    Nlu(String),

    #[error("Speech boundary channel closed")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, DialogueError>;
