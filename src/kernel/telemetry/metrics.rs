use std::collections::VecDeque;

use super::event::{EscalationOutcome, LifecycleEvent, RetryKind, TelemetryEvent};
use crate::kernel::dialog::state::DialogState;

#[derive(Debug, Clone, Default)]
pub struct TelemetrySnapshot {
    pub dialog_stats: DialogStats,
    pub escalation_stats: EscalationStats,
    pub retry_stats: RetryStats,
    pub action_stats: ActionStats,
    pub settings_stats: SettingsStats,
}

#[derive(Debug, Clone, Default)]
pub struct DialogStats {
    pub transitions: u64,
    pub returns_to_idle: u64,
    pub local_commands: u64,
}

#[derive(Debug, Clone, Default)]
pub struct EscalationStats {
    pub replied: u64,
    pub failed: u64,
    pub timed_out: u64,
    pub follow_ups: u64,
    pub avg_latency_ms: f64,
}

#[derive(Debug, Clone, Default)]
pub struct RetryStats {
    pub issued: u64,
    pub exhausted: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ActionStats {
    pub performed: u64,
    pub failed: u64,
    /// Selector matched nothing on screen.
    pub locator_misses: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsStats {
    pub names_captured: u64,
    pub language_changes: u64,
    pub rate_changes: u64,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();
    let mut latency_total = 0u64;
    let mut latency_count = 0u64;

    for event in events {
        match event {
            TelemetryEvent::Transition { from, to } => {
                snap.dialog_stats.transitions += 1;
                if *to == DialogState::Idle && *from != DialogState::Idle {
                    snap.dialog_stats.returns_to_idle += 1;
                }
            }
            TelemetryEvent::LocalCommand { .. } => snap.dialog_stats.local_commands += 1,
            TelemetryEvent::Escalation {
                outcome,
                follow_up,
                latency_ms,
            } => {
                match outcome {
                    EscalationOutcome::Replied => snap.escalation_stats.replied += 1,
                    EscalationOutcome::Failed => snap.escalation_stats.failed += 1,
                    EscalationOutcome::TimedOut => snap.escalation_stats.timed_out += 1,
                }
                if *follow_up {
                    snap.escalation_stats.follow_ups += 1;
                }
                latency_total += latency_ms;
                latency_count += 1;
            }
            TelemetryEvent::Retry { kind, .. } => match kind {
                RetryKind::Issued => snap.retry_stats.issued += 1,
                RetryKind::Exhausted => snap.retry_stats.exhausted += 1,
            },
            TelemetryEvent::ActionBatch {
                performed,
                failed,
                unresolved,
            } => {
                snap.action_stats.performed += *performed as u64;
                snap.action_stats.failed += *failed as u64;
                snap.action_stats.locator_misses += *unresolved as u64;
            }
            TelemetryEvent::Lifecycle(kind) => match kind {
                LifecycleEvent::NameCaptured => snap.settings_stats.names_captured += 1,
                LifecycleEvent::LanguageChanged => snap.settings_stats.language_changes += 1,
                LifecycleEvent::SpeechRateChanged => snap.settings_stats.rate_changes += 1,
            },
        }
    }

    if latency_count > 0 {
        snap.escalation_stats.avg_latency_ms = latency_total as f64 / latency_count as f64;
    }

    snap
}
