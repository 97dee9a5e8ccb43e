use tracing::{debug, info};

use super::digest::{has_changed, ScreenDigest};
use super::window::ActiveWindow;

/// Dedup policy for proactive follow-ups.
///
/// At most one follow-up per window generation. A window that carries the
/// screen it was opened on resets the baseline to that screen; otherwise the
/// baseline survives a window closing and reopening. It is dropped once a
/// screen is observed while no window is active. Identical consecutive
/// digests never trigger.
#[derive(Debug, Default)]
pub struct FollowUpMonitor {
    baseline: Option<ScreenDigest>,
    seen_generation: Option<u64>,
    emitted_generation: Option<u64>,
}

impl FollowUpMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// `window` is the active window, `None` when closed.
    /// Returns true when this observation should trigger a follow-up.
    pub fn observe(&mut self, window: Option<&ActiveWindow>, current: ScreenDigest) -> bool {
        let Some(window) = window else {
            if self.baseline.take().is_some() {
                debug!("Follow-up baseline cleared, no active window");
            }
            return false;
        };
        let generation = window.generation;

        if self.emitted_generation == Some(generation) {
            return false;
        }

        if self.seen_generation != Some(generation) {
            self.seen_generation = Some(generation);
            if let Some(opened_on) = &window.baseline {
                debug!(generation, hash = opened_on.hash, "Baseline taken from window");
                self.baseline = Some(opened_on.clone());
            }
        }

        let changed = self
            .baseline
            .as_ref()
            .is_some_and(|previous| has_changed(previous, &current));
        if changed {
            info!(generation, hash = current.hash, "Screen changed inside follow-up window");
            self.emitted_generation = Some(generation);
        }
        self.baseline = Some(current);
        changed
    }

    pub fn baseline(&self) -> Option<&ScreenDigest> {
        self.baseline.as_ref()
    }
}
