use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::screen::digest::{digest, ScreenDigest};
use crate::screen::locator::locate_bounds;
use crate::screen::tree::{Rect, UiTree};
use crate::services::llm::{DeviceAction, ScrollDirection};
use crate::services::tree_provider::UiTreeProvider;

/// Resolved, device-level action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionEvent {
    Click { bounds: Rect },
    Back,
    Home,
    Highlight { bounds: Rect, duration: Duration },
    Scroll { direction: ScrollDirection },
}

/// Executes device actions (gesture injection, overlay highlight, ...).
#[async_trait]
pub trait ActionSink: Send + Sync {
    async fn perform(&self, event: ActionEvent) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub performed: usize,
    pub failed: usize,
    /// Selector found nothing on screen; the action was skipped.
    pub unresolved: usize,
}

/// Runs a reply's actions in order, one at a time. A failing or unresolved
/// action is logged and the batch moves on.
#[derive(Clone)]
pub struct ActionDispatcher {
    sink: Arc<dyn ActionSink>,
    trees: Arc<dyn UiTreeProvider>,
    highlight: Duration,
}

impl ActionDispatcher {
    pub fn new(sink: Arc<dyn ActionSink>, trees: Arc<dyn UiTreeProvider>, highlight: Duration) -> Self {
        Self {
            sink,
            trees,
            highlight,
        }
    }

    /// Digest of whatever is on screen right now.
    pub fn screen_digest(&self) -> Option<ScreenDigest> {
        self.trees.current_tree().map(|tree| digest(&tree))
    }

    pub fn resolve(&self, action: &DeviceAction, tree: Option<&UiTree>) -> Option<ActionEvent> {
        match action {
            DeviceAction::Click { selector } => tree
                .and_then(|t| locate_bounds(t, selector))
                .map(|bounds| ActionEvent::Click { bounds }),
            DeviceAction::Highlight {
                selector,
                duration_ms,
            } => tree.and_then(|t| locate_bounds(t, selector)).map(|bounds| {
                ActionEvent::Highlight {
                    bounds,
                    duration: duration_ms
                        .map(Duration::from_millis)
                        .unwrap_or(self.highlight),
                }
            }),
            DeviceAction::Back => Some(ActionEvent::Back),
            DeviceAction::Home => Some(ActionEvent::Home),
            DeviceAction::Scroll { direction } => Some(ActionEvent::Scroll {
                direction: *direction,
            }),
        }
    }

    pub async fn dispatch_all(&self, actions: &[DeviceAction]) -> DispatchReport {
        let mut report = DispatchReport::default();

        for (index, action) in actions.iter().enumerate() {
            // Earlier actions may have changed the screen.
            let tree = self.trees.current_tree();
            let Some(event) = self.resolve(action, tree.as_ref()) else {
                warn!(index, kind = action.kind(), "No element matched selector; action skipped");
                report.unresolved += 1;
                continue;
            };

            debug!(index, event = ?event, "Dispatching action");
            match self.sink.perform(event).await {
                Ok(()) => report.performed += 1,
                Err(e) => {
                    warn!(index, kind = action.kind(), error = %e, "Action failed; continuing with the batch");
                    report.failed += 1;
                }
            }
        }

        report
    }
}
