#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use voice_assist::config::AssistConfig;
use voice_assist::kernel::dialog::{DialogConfig, DialogEngine, DialogServices};
use voice_assist::kernel::locale::Locale;
use voice_assist::screen::{FollowUpWindow, UiTree};
use voice_assist::services::actions::{ActionDispatcher, ActionEvent, ActionSink};
use voice_assist::services::device::StaticDeviceStatus;
use voice_assist::services::llm::{AssistReply, AssistRequest, DeviceAction, LlmClient};
use voice_assist::services::locale::LocaleNotifier;
use voice_assist::services::settings::InMemorySettings;
use voice_assist::services::speech::{QueueMode, SpeechOutput};
use voice_assist::services::tree_provider::SnapshotTreeProvider;

#[derive(Default)]
pub struct RecordingSpeech {
    spoken: Mutex<Vec<String>>,
}

impl RecordingSpeech {
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.spoken.lock().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.spoken.lock().len()
    }
}

#[async_trait]
impl SpeechOutput for RecordingSpeech {
    async fn speak(&self, text: &str, _mode: QueueMode) -> Result<()> {
        self.spoken.lock().push(text.to_string());
        Ok(())
    }
}

/// Records every event it is asked to perform; can be told to fail some calls.
#[derive(Default)]
pub struct RecordingActions {
    performed: Mutex<Vec<ActionEvent>>,
    fail_calls: Mutex<Vec<usize>>,
}

impl RecordingActions {
    /// Zero-based call indexes that should return an error.
    pub fn failing_on(calls: &[usize]) -> Self {
        Self {
            performed: Mutex::new(Vec::new()),
            fail_calls: Mutex::new(calls.to_vec()),
        }
    }

    pub fn performed(&self) -> Vec<ActionEvent> {
        self.performed.lock().clone()
    }
}

#[async_trait]
impl ActionSink for RecordingActions {
    async fn perform(&self, event: ActionEvent) -> Result<()> {
        let mut performed = self.performed.lock();
        let call = performed.len();
        performed.push(event);
        if self.fail_calls.lock().contains(&call) {
            return Err(anyhow!("gesture rejected"));
        }
        Ok(())
    }
}

/// Hands out queued replies in order; an empty queue is a failure.
#[derive(Default)]
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<Result<AssistReply>>>,
    requests: Mutex<Vec<AssistRequest>>,
    delay: Mutex<Option<Duration>>,
}

impl ScriptedLlm {
    pub fn push_reply(&self, text: &str, actions: Vec<DeviceAction>) {
        self.replies.lock().push_back(Ok(AssistReply {
            reply_text: text.to_string(),
            actions,
        }));
    }

    pub fn push_error(&self, message: &str) {
        self.replies.lock().push_back(Err(anyhow!(message.to_string())));
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    pub fn requests(&self) -> Vec<AssistRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn assist(&self, request: AssistRequest) -> Result<AssistReply> {
        self.requests.lock().push(request);
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("no scripted reply")))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    changes: Mutex<Vec<Locale>>,
}

impl RecordingNotifier {
    pub fn changes(&self) -> Vec<Locale> {
        self.changes.lock().clone()
    }
}

impl LocaleNotifier for RecordingNotifier {
    fn locale_changed(&self, locale: Locale) {
        self.changes.lock().push(locale);
    }
}

/// Engine wired to fakes, with handles to inspect each of them.
pub struct Harness {
    pub engine: DialogEngine,
    pub settings: Arc<InMemorySettings>,
    pub speech: Arc<RecordingSpeech>,
    pub llm: Arc<ScriptedLlm>,
    pub actions: Arc<RecordingActions>,
    pub trees: Arc<SnapshotTreeProvider>,
    pub notifier: Arc<RecordingNotifier>,
    pub window: FollowUpWindow,
}

impl Harness {
    pub fn new() -> Self {
        Self::build(InMemorySettings::new(Locale::Russian), RecordingActions::default(), None)
    }

    pub fn with_settings(settings: InMemorySettings) -> Self {
        Self::build(settings, RecordingActions::default(), None)
    }

    pub fn with_screen(tree: UiTree, actions: RecordingActions) -> Self {
        Self::build(InMemorySettings::new(Locale::Russian), actions, Some(tree))
    }

    fn build(settings: InMemorySettings, actions: RecordingActions, tree: Option<UiTree>) -> Self {
        let settings = Arc::new(settings);
        let speech = Arc::new(RecordingSpeech::default());
        let llm = Arc::new(ScriptedLlm::default());
        let actions = Arc::new(actions);
        let trees = Arc::new(SnapshotTreeProvider::new(tree));
        let notifier = Arc::new(RecordingNotifier::default());
        let window = FollowUpWindow::new();

        let services = DialogServices {
            settings: settings.clone(),
            speech: speech.clone(),
            llm: llm.clone(),
            device: Arc::new(StaticDeviceStatus::default()),
            locale_notifier: notifier.clone(),
            actions: ActionDispatcher::new(
                actions.clone(),
                trees.clone(),
                AssistConfig::default().highlight_duration,
            ),
            follow_up: window.clone(),
        };
        let config = DialogConfig {
            llm_timeout: Duration::from_secs(2),
            ..DialogConfig::default()
        };

        Self {
            engine: DialogEngine::new(services, config),
            settings,
            speech,
            llm,
            actions,
            trees,
            notifier,
            window,
        }
    }

    pub async fn say(&mut self, text: &str) {
        self.engine.on_user_input(text, None).await;
    }
}
