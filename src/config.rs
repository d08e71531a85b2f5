use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{DialogueError, Result};
use crate::grammar::Grammar;
use crate::kernel::machine::TurnMachine;
use crate::kernel::state::Flow;

/// Top-level configuration, loaded from TOML. Every section has defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogueConfig {
    #[serde(default)]
    pub dialogue: DialogueSection,
    #[serde(default)]
    pub speech: SpeechSection,
    #[serde(default)]
    pub grammar: GrammarSection,
    #[serde(default)]
    pub nlu: NluSection,
    #[serde(default)]
    pub log: LogSection,
}

impl DialogueConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DialogueConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Falls back to defaults if the file is missing or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config from {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| DialogueError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// The grammar table: the configured JSON file, or the built-in one.
    pub fn load_grammar(&self) -> Result<Grammar> {
        match &self.grammar.path {
            Some(path) => Grammar::load(path),
            None => Ok(Grammar::appointment()),
        }
    }

    pub fn build_machine(&self) -> Result<TurnMachine> {
        let grammar = Arc::new(self.load_grammar()?);
        Ok(TurnMachine::new(self.dialogue.flow, grammar)
            .with_max_reprompts(self.dialogue.max_reprompts))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueSection {
    pub flow: Flow,
    /// Consecutive re-asks allowed before abandoning. Absent means unbounded.
    pub max_reprompts: Option<u32>,
}

/// Settings relayed to the speech engine. The kernel never enforces them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSection {
    pub locale: String,
    pub voice: String,
    pub no_input_timeout_ms: u64,
    pub complete_timeout_ms: u64,
}

impl Default for SpeechSection {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            voice: "en-US-DavisNeural".to_string(),
            no_input_timeout_ms: 5000,
            complete_timeout_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarSection {
    /// JSON grammar table replacing the built-in vocabulary.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NluSection {
    /// Language resource base URL, e.g. `https://<name>.cognitiveservices.azure.com`.
    /// The `/language/:analyze-conversations` path is appended by the client.
    /// Empty disables NLU.
    pub endpoint: String,
    /// Environment variable holding the subscription key.
    pub api_key_env: String,
    pub project_name: String,
    pub deployment_name: String,
    pub language: String,
}

impl Default for NluSection {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key_env: "PARLEY_NLU_KEY".to_string(),
            project_name: "appointment".to_string(),
            deployment_name: "appointment".to_string(),
            language: "en-US".to_string(),
        }
    }
}

impl NluSection {
    pub fn is_enabled(&self) -> bool {
        !self.endpoint.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// trace, debug, info, warn, error.
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
