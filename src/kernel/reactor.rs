use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::dialog::DialogEngine;
use super::event::{Event, InputEvent};
use crate::screen::digest;
use crate::services::tree_provider::UiTreeProvider;

/// Single writer for the dialog.
///
/// Utterances from the recognizer and follow-ups from the screen watcher share
/// one queue and are handled strictly one at a time: the next event is not
/// pulled until the previous turn, remote call and action batch included,
/// has finished.
pub struct Reactor {
    pub receiver: mpsc::Receiver<Event>,
    pub engine: DialogEngine,
    trees: Arc<dyn UiTreeProvider>,
}

impl Reactor {
    pub fn new(
        receiver: mpsc::Receiver<Event>,
        engine: DialogEngine,
        trees: Arc<dyn UiTreeProvider>,
    ) -> Self {
        Self {
            receiver,
            engine,
            trees,
        }
    }

    /// Digest text of the current screen, if there is anything to describe.
    pub fn screen_context(&self) -> Option<String> {
        let tree = self.trees.current_tree()?;
        let text = digest(&tree).normalized_text;
        (!text.is_empty()).then_some(text)
    }

    /// Handles one event. Returns false once the reactor should stop.
    pub async fn step(&mut self, event: Event) -> bool {
        match event {
            Event::Input(input) => {
                self.handle_input(input).await;
                true
            }
            Event::Shutdown => {
                info!("Shutdown requested");
                false
            }
        }
    }

    async fn handle_input(&mut self, input: InputEvent) {
        debug!(source = %input.source, follow_up = input.is_follow_up(), "Input received");
        let context = self.screen_context();
        self.engine
            .on_user_input(&input.text, context.as_deref())
            .await;
    }

    /// Async driver loop. Ends on `Shutdown` or when every sender is gone.
    pub async fn run(&mut self) {
        info!("Reactor started");
        while let Some(event) = self.receiver.recv().await {
            if !self.step(event).await {
                break;
            }
        }
        info!(state = ?self.engine.state(), "Reactor stopped");
    }
}
