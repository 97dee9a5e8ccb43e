use parking_lot::Mutex;
use std::sync::Arc;
use tokio::time::{Duration, Instant};

use super::digest::ScreenDigest;

#[derive(Debug, Default)]
struct WindowState {
    deadline: Option<Instant>,
    generation: u64,
    baseline: Option<ScreenDigest>,
}

/// An open window as seen by an observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveWindow {
    pub generation: u64,
    /// Screen at the moment the window opened, if one was inspectable.
    pub baseline: Option<ScreenDigest>,
}

/// Time-boxed permission to re-engage the user after a screen change.
///
/// Clones share the same window. Every `open` starts a new generation, which
/// is how observers tell a reopened window from the one they already used.
/// Uses tokio's clock so paused-time tests work.
#[derive(Debug, Clone, Default)]
pub struct FollowUpWindow {
    inner: Arc<Mutex<WindowState>>,
}

impl FollowUpWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new generation. `baseline` is the screen the reply was given
    /// for; the first settled screen that differs from it is the follow-up.
    pub fn open(&self, duration: Duration, baseline: Option<ScreenDigest>) {
        let mut state = self.inner.lock();
        state.deadline = Some(Instant::now() + duration);
        state.generation += 1;
        state.baseline = baseline;
    }

    pub fn close(&self) {
        let mut state = self.inner.lock();
        state.deadline = None;
        state.baseline = None;
    }

    pub fn is_active(&self) -> bool {
        self.active().is_some()
    }

    /// The currently open window, dropping an expired deadline.
    pub fn active(&self) -> Option<ActiveWindow> {
        let mut state = self.inner.lock();
        match state.deadline {
            Some(at) if Instant::now() < at => Some(ActiveWindow {
                generation: state.generation,
                baseline: state.baseline.clone(),
            }),
            Some(_) => {
                state.deadline = None;
                state.baseline = None;
                None
            }
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn expires_after_duration() {
        let window = FollowUpWindow::new();
        assert!(!window.is_active());

        window.open(Duration::from_secs(5), None);
        let shared = window.clone();
        assert!(shared.is_active());

        tokio::time::advance(Duration::from_secs(6)).await;
        assert!(!window.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn reopening_bumps_generation() {
        let window = FollowUpWindow::new();
        window.open(Duration::from_secs(5), None);
        let first = window.active().map(|w| w.generation);
        window.clone().close();
        assert!(!window.is_active());

        window.open(Duration::from_secs(5), None);
        assert_ne!(window.active().map(|w| w.generation), first);
    }
}
