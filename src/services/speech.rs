use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueMode {
    /// Drop whatever is playing and speak now.
    Flush,
    Append,
}

/// Text-to-speech collaborator. The future resolves once the utterance has
/// been handed to the audio path, so callers sequence with `.await`.
#[async_trait]
pub trait SpeechOutput: Send + Sync {
    async fn speak(&self, text: &str, mode: QueueMode) -> Result<()>;
}
