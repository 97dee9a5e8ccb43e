use serde::{Deserialize, Serialize};

use crate::kernel::dialog::state::DialogState;
use crate::kernel::intent::Command;

// Allowed: states, command kinds, counts, durations, outcomes
// Forbidden: utterances, names, reply text, screen text, session ids

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TelemetryEvent {
    Transition {
        from: DialogState,
        to: DialogState,
    },

    LocalCommand {
        command: Command,
    },

    Escalation {
        outcome: EscalationOutcome,
        follow_up: bool,
        latency_ms: u64,
    },

    Retry {
        state: DialogState,
        kind: RetryKind,
    },

    ActionBatch {
        performed: usize,
        failed: usize,
        unresolved: usize,
    },

    Lifecycle(LifecycleEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscalationOutcome {
    Replied,
    Failed,
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetryKind {
    Issued,
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    NameCaptured,
    LanguageChanged,
    SpeechRateChanged,
}
