use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::services::actions::{ActionEvent, ActionSink};
use crate::services::settings::SettingsStore;
use crate::services::speech::{QueueMode, SpeechOutput};

/// Prints what would be spoken, tagged with the current locale and rate.
pub struct ConsoleSpeech {
    settings: Arc<dyn SettingsStore>,
}

impl ConsoleSpeech {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl SpeechOutput for ConsoleSpeech {
    async fn speak(&self, text: &str, mode: QueueMode) -> Result<()> {
        let flush = if mode == QueueMode::Flush { "!" } else { "" };
        println!(
            "[SPEAK{flush} {} x{:.1}] {text}",
            self.settings.locale(),
            self.settings.speech_rate()
        );
        Ok(())
    }
}

/// Prints device actions instead of injecting gestures.
#[derive(Debug, Default)]
pub struct ConsoleActions;

#[async_trait]
impl ActionSink for ConsoleActions {
    async fn perform(&self, event: ActionEvent) -> Result<()> {
        match event {
            ActionEvent::Click { bounds } => {
                let (x, y) = bounds.center();
                println!("[ACTION] click at ({x}, {y})");
            }
            ActionEvent::Back => println!("[ACTION] back"),
            ActionEvent::Home => println!("[ACTION] home"),
            ActionEvent::Highlight { bounds, duration } => println!(
                "[ACTION] highlight {bounds:?} for {}ms",
                duration.as_millis()
            ),
            ActionEvent::Scroll { direction } => println!("[ACTION] scroll {direction:?}"),
        }
        Ok(())
    }
}
