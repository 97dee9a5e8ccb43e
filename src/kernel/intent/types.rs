use serde::{Deserialize, Serialize};

/// Discrete commands recognised from a single utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Repeat,
    OpenSettings,
    /// Payload: the new name.
    ChangeName,
    /// Payload (optional): target language tag. Without payload the locale toggles.
    ChangeLanguage,
    ChangeSpeechRateFaster,
    ChangeSpeechRateSlower,
    /// Routes into the settings sub-dialog without applying anything yet.
    IntentChangeName,
    IntentChangeLanguage,
    IntentChangeSpeed,
    Unknown,
}

/// Parser output, consumed once by the dialog engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommand {
    pub command: Command,
    pub payload: Option<String>,
}

impl ParsedCommand {
    pub fn new(command: Command) -> Self {
        Self {
            command,
            payload: None,
        }
    }

    pub fn with_payload(command: Command, payload: impl Into<String>) -> Self {
        Self {
            command,
            payload: Some(payload.into()),
        }
    }

    pub fn unknown() -> Self {
        Self::new(Command::Unknown)
    }

    pub fn is_unknown(&self) -> bool {
        self.command == Command::Unknown
    }
}
