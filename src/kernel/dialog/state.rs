use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DialogState {
    #[default]
    Idle,
    AwaitingSettingChoice,
    AwaitingNewName,
    AwaitingNewLanguage,
    AwaitingNewSpeed,
}

impl DialogState {
    pub fn is_idle(&self) -> bool {
        *self == DialogState::Idle
    }
}

/// Correlates the turns of one exchange with the remote assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSession {
    pub id: String,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
        }
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Strict state delta. This is the ONLY way conversation state mutates.
#[derive(Debug, Clone)]
pub enum DialogDelta {
    /// Any transition, including re-entering the current state.
    Enter(DialogState),
    /// One re-prompt was issued for the current sub-dialog.
    RetryIssued,
    SessionStarted(ConversationSession),
}

/// Live conversation state, owned by exactly one engine.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    state: DialogState,
    session: Option<ConversationSession>,
    retry_pending: bool,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn session(&self) -> Option<&ConversationSession> {
        self.session.as_ref()
    }

    pub fn retry_pending(&self) -> bool {
        self.retry_pending
    }

    /// Applies `delta` and returns the state it left.
    pub fn reduce(&mut self, delta: DialogDelta) -> DialogState {
        let previous = self.state;
        match delta {
            DialogDelta::Enter(next) => {
                // Every transition starts with a fresh retry budget.
                self.retry_pending = false;
                if next.is_idle() && !previous.is_idle() {
                    if let Some(session) = self.session.take() {
                        info!(session = %session.id, "Conversation session closed");
                    }
                }
                self.state = next;
            }
            DialogDelta::RetryIssued => self.retry_pending = true,
            DialogDelta::SessionStarted(session) => {
                info!(session = %session.id, "Conversation session opened");
                self.session = Some(session);
            }
        }
        previous
    }

    /// Existing session id, minting a new session when there is none.
    pub fn ensure_session(&mut self) -> String {
        if let Some(session) = &self.session {
            return session.id.clone();
        }
        let session = ConversationSession::new();
        let id = session.id.clone();
        self.reduce(DialogDelta::SessionStarted(session));
        id
    }
}
