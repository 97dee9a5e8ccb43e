use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::digest::digest;
use super::monitor::FollowUpMonitor;
use super::window::FollowUpWindow;
use crate::kernel::event::{Event, InputEvent};
use crate::services::tree_provider::UiTreeProvider;

/// "Something on screen changed" notification from the accessibility layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenChanged;

/// Turns screen-change notifications into follow-up utterances.
///
/// Runs beside the reactor and never touches dialog state: its only output is
/// a synthetic input pushed into the same queue the user's speech goes to.
pub struct ScreenWatcher {
    trees: Arc<dyn UiTreeProvider>,
    window: FollowUpWindow,
    monitor: FollowUpMonitor,
    settle: Duration,
    events: mpsc::Sender<Event>,
}

impl ScreenWatcher {
    pub fn new(
        trees: Arc<dyn UiTreeProvider>,
        window: FollowUpWindow,
        settle: Duration,
        events: mpsc::Sender<Event>,
    ) -> Self {
        Self {
            trees,
            window,
            monitor: FollowUpMonitor::new(),
            settle,
            events,
        }
    }

    /// Digests the current screen and applies the follow-up policy.
    /// Returns true if a follow-up was queued.
    pub async fn check_now(&mut self) -> bool {
        let Some(tree) = self.trees.current_tree() else {
            debug!("No inspectable screen");
            return false;
        };
        let current = digest(&tree);
        if !self.monitor.observe(self.window.active().as_ref(), current) {
            return false;
        }

        self.window.close();
        if self
            .events
            .send(Event::Input(InputEvent::follow_up()))
            .await
            .is_err()
        {
            warn!("Event queue closed, follow-up dropped");
            return false;
        }
        info!("Follow-up queued");
        true
    }

    /// Waits for the screen to stay quiet for the settle period after each
    /// burst of notifications, then checks it once.
    pub async fn run(mut self, mut changes: mpsc::Receiver<ScreenChanged>, cancel: CancellationToken) {
        info!(settle_ms = self.settle.as_millis() as u64, "Screen watcher started");
        'outer: loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                next = changes.recv() => {
                    if next.is_none() {
                        break;
                    }
                }
            }

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break 'outer,
                    _ = tokio::time::sleep(self.settle) => break,
                    next = changes.recv() => {
                        if next.is_none() {
                            break 'outer;
                        }
                    }
                }
            }

            self.check_now().await;
        }
        info!("Screen watcher stopped");
    }
}
