use std::collections::VecDeque;

use super::event::TelemetryEvent;
use super::metrics::{compute_snapshot, TelemetrySnapshot};

const MAX_EVENTS: usize = 10_000;

#[derive(Debug)]
pub struct TelemetryRecorder {
    buffer: VecDeque<TelemetryEvent>,
}

impl TelemetryRecorder {
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::with_capacity(MAX_EVENTS),
        }
    }

    pub fn record(&mut self, event: TelemetryEvent) {
        if self.buffer.len() >= MAX_EVENTS {
            self.buffer.pop_front();
        }
        self.buffer.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        compute_snapshot(&self.buffer)
    }
}

impl Default for TelemetryRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::telemetry::event::RetryKind;
    use crate::kernel::dialog::state::DialogState;

    #[test]
    fn ring_buffer_drops_oldest() {
        let mut rec = TelemetryRecorder::new();
        for _ in 0..MAX_EVENTS + 5 {
            rec.record(TelemetryEvent::Retry {
                state: DialogState::AwaitingNewSpeed,
                kind: RetryKind::Issued,
            });
        }
        assert_eq!(rec.len(), MAX_EVENTS);
        assert_eq!(rec.snapshot().retry_stats.issued, MAX_EVENTS as u64);
    }
}
