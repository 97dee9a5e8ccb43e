use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::hints;
use super::prompts::Prompt;
use super::state::{Conversation, ConversationSession, DialogDelta, DialogState};
use crate::config::AssistConfig;
use crate::kernel::event::{is_follow_up, FOLLOW_UP_TOKEN};
use crate::kernel::intent::{Command, IntentParser, ParsedCommand};
use crate::kernel::locale::Locale;
use crate::kernel::speech::{adjust, RateDirection};
use crate::kernel::telemetry::event::{EscalationOutcome, LifecycleEvent, RetryKind};
use crate::kernel::telemetry::{TelemetryEvent, TelemetryRecorder};
use crate::screen::FollowUpWindow;
use crate::services::actions::ActionDispatcher;
use crate::services::device::DeviceStatusProvider;
use crate::services::llm::{AssistReply, AssistRequest, LlmClient, LlmError};
use crate::services::locale::LocaleNotifier;
use crate::services::settings::SettingsStore;
use crate::services::speech::{QueueMode, SpeechOutput};

/// Collaborators the engine talks to. All of them live outside the core.
#[derive(Clone)]
pub struct DialogServices {
    pub settings: Arc<dyn SettingsStore>,
    pub speech: Arc<dyn SpeechOutput>,
    pub llm: Arc<dyn LlmClient>,
    pub device: Arc<dyn DeviceStatusProvider>,
    pub locale_notifier: Arc<dyn LocaleNotifier>,
    pub actions: ActionDispatcher,
    pub follow_up: FollowUpWindow,
}

#[derive(Debug, Clone)]
pub struct DialogConfig {
    /// The two locales CHANGE_LANGUAGE toggles between.
    pub primary_locale: Locale,
    pub secondary_locale: Locale,
    pub llm_timeout: Duration,
    pub follow_up_window: Duration,
    pub alternate_delimiter: String,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self::from(&AssistConfig::default())
    }
}

impl From<&AssistConfig> for DialogConfig {
    fn from(config: &AssistConfig) -> Self {
        Self {
            primary_locale: config.primary_locale,
            secondary_locale: config.secondary_locale,
            llm_timeout: config.llm_timeout,
            follow_up_window: config.follow_up_window,
            alternate_delimiter: config.alternate_delimiter.clone(),
        }
    }
}

/// Conversation state machine for one user.
///
/// Every method that advances the dialog takes `&mut self`, so turns are
/// serialized by whoever owns the engine (normally the [`Reactor`]).
///
/// [`Reactor`]: crate::kernel::reactor::Reactor
pub struct DialogEngine {
    parser: IntentParser,
    services: DialogServices,
    config: DialogConfig,
    conversation: Conversation,
    last_spoken: Option<String>,
    pub telemetry: TelemetryRecorder,
}

impl DialogEngine {
    pub fn new(services: DialogServices, config: DialogConfig) -> Self {
        Self {
            parser: IntentParser::new(config.alternate_delimiter.clone()),
            services,
            config,
            conversation: Conversation::new(),
            last_spoken: None,
            telemetry: TelemetryRecorder::new(),
        }
    }

    pub fn state(&self) -> DialogState {
        self.conversation.state()
    }

    pub fn session(&self) -> Option<&ConversationSession> {
        self.conversation.session()
    }

    pub fn retry_pending(&self) -> bool {
        self.conversation.retry_pending()
    }

    pub fn last_spoken(&self) -> Option<&str> {
        self.last_spoken.as_deref()
    }

    /// Routes the next utterance heard in IDLE to name capture.
    pub fn request_name_capture(&self) {
        self.services.settings.set_needs_name(true);
    }

    /// Advances the dialog by one utterance. Never fails: every error path
    /// ends in something spoken or in a logged no-op.
    pub async fn on_user_input(&mut self, text: &str, screen_context: Option<&str>) {
        let state = self.conversation.state();
        debug!(state = ?state, "User input");
        if is_follow_up(text) && !state.is_idle() {
            // Queued before a sub-dialog started; it would only burn a retry.
            debug!(state = ?state, "Stale follow-up dropped");
            return;
        }
        match state {
            DialogState::Idle => self.handle_idle(text, screen_context).await,
            DialogState::AwaitingSettingChoice => self.handle_setting_choice(text).await,
            DialogState::AwaitingNewName => self.capture_name(text).await,
            DialogState::AwaitingNewLanguage => self.handle_new_language(text).await,
            DialogState::AwaitingNewSpeed => self.handle_new_speed(text).await,
        }
    }

    async fn handle_idle(&mut self, text: &str, screen_context: Option<&str>) {
        if is_follow_up(text) {
            if self.services.settings.needs_name() {
                debug!("Follow-up dropped, waiting for the user's name");
                return;
            }
            self.escalate(FOLLOW_UP_TOKEN, screen_context, true).await;
            return;
        }

        if self.services.settings.needs_name() {
            self.services.settings.set_needs_name(false);
            info!("First-run name capture");
            self.capture_name(text).await;
            return;
        }

        let Some(best) = self.parser.first_alternate(text) else {
            debug!("Blank utterance ignored");
            return;
        };

        let parsed = self.parser.parse(text);
        if parsed.is_unknown() {
            let best = best.to_string();
            self.escalate(&best, screen_context, false).await;
        } else {
            self.execute_local(parsed).await;
        }
    }

    async fn execute_local(&mut self, parsed: ParsedCommand) {
        info!(command = ?parsed.command, "Local command");
        self.telemetry.record(TelemetryEvent::LocalCommand {
            command: parsed.command,
        });
        self.services.follow_up.close();

        match parsed.command {
            Command::Repeat => {
                let text = match self.last_spoken.clone() {
                    Some(text) => text,
                    None => Prompt::NothingToRepeat.render(self.locale()),
                };
                self.say_text(text).await;
            }
            Command::ChangeName => match parsed.payload {
                Some(name) => self.save_name(&name).await,
                None => self.begin(DialogState::AwaitingNewName, Prompt::AskName).await,
            },
            Command::ChangeLanguage => {
                let target = parsed
                    .payload
                    .as_deref()
                    .and_then(Locale::from_tag)
                    .unwrap_or_else(|| self.toggled_locale());
                self.apply_language(target).await;
            }
            Command::ChangeSpeechRateFaster => self.apply_rate(RateDirection::Faster).await,
            Command::ChangeSpeechRateSlower => self.apply_rate(RateDirection::Slower).await,
            Command::OpenSettings => {
                self.begin(DialogState::AwaitingSettingChoice, Prompt::SettingsMenu)
                    .await
            }
            Command::IntentChangeName => {
                self.begin(DialogState::AwaitingNewName, Prompt::AskName).await
            }
            Command::IntentChangeLanguage => {
                self.begin(DialogState::AwaitingNewLanguage, Prompt::AskLanguage)
                    .await
            }
            Command::IntentChangeSpeed => {
                self.begin(DialogState::AwaitingNewSpeed, Prompt::AskSpeed).await
            }
            Command::Unknown => warn!("Unknown command reached local execution"),
        }
    }

    async fn handle_setting_choice(&mut self, text: &str) {
        match self.parser.parse(text).command {
            Command::IntentChangeName => {
                self.begin(DialogState::AwaitingNewName, Prompt::AskName).await
            }
            Command::IntentChangeLanguage => {
                self.begin(DialogState::AwaitingNewLanguage, Prompt::AskLanguage)
                    .await
            }
            Command::IntentChangeSpeed => {
                self.begin(DialogState::AwaitingNewSpeed, Prompt::AskSpeed).await
            }
            _ => self.retry_or_give_up(Prompt::SettingsMenuRetry).await,
        }
    }

    /// Name capture never retries: a blank top alternate returns to IDLE
    /// silently, lower-ranked alternates are never used.
    async fn capture_name(&mut self, text: &str) {
        let name = self.parser.top_alternate(text).to_string();
        if name.is_empty() {
            debug!("Blank name, leaving name capture");
        } else {
            self.save_name(&name).await;
        }
        self.enter(DialogState::Idle);
    }

    async fn handle_new_language(&mut self, text: &str) {
        let alternates = self.parser.alternates(text);
        match alternates.iter().find_map(|alt| hints::detect_language(alt)) {
            Some(target) => {
                self.apply_language(target).await;
                self.enter(DialogState::Idle);
            }
            None => {
                let reprompt = match alternates.first() {
                    Some(guess) => Prompt::ConfirmLanguageGuess((*guess).to_string()),
                    None => Prompt::AskLanguage,
                };
                self.retry_or_give_up(reprompt).await;
            }
        }
    }

    async fn handle_new_speed(&mut self, text: &str) {
        let direction = self
            .parser
            .alternates(text)
            .into_iter()
            .find_map(hints::detect_speed)
            .or_else(|| match self.parser.parse(text).command {
                Command::ChangeSpeechRateFaster => Some(RateDirection::Faster),
                Command::ChangeSpeechRateSlower => Some(RateDirection::Slower),
                _ => None,
            });

        match direction {
            Some(direction) => {
                self.apply_rate(direction).await;
                self.enter(DialogState::Idle);
            }
            None => self.retry_or_give_up(Prompt::AskSpeedRetry).await,
        }
    }

    /// One re-prompt per sub-dialog, then an apology and back to IDLE.
    async fn retry_or_give_up(&mut self, reprompt: Prompt) {
        let state = self.conversation.state();
        if self.conversation.retry_pending() {
            info!(state = ?state, "Retry exhausted");
            self.telemetry.record(TelemetryEvent::Retry {
                state,
                kind: RetryKind::Exhausted,
            });
            self.say(Prompt::GiveUp).await;
            self.enter(DialogState::Idle);
        } else {
            debug!(state = ?state, "Re-prompting");
            self.conversation.reduce(DialogDelta::RetryIssued);
            self.telemetry.record(TelemetryEvent::Retry {
                state,
                kind: RetryKind::Issued,
            });
            self.say(reprompt).await;
        }
    }

    async fn begin(&mut self, next: DialogState, prompt: Prompt) {
        self.enter(next);
        self.say(prompt).await;
    }

    fn enter(&mut self, next: DialogState) {
        let from = self.conversation.reduce(DialogDelta::Enter(next));
        if from != next {
            info!(from = ?from, to = ?next, "Dialog transition");
        }
        self.telemetry.record(TelemetryEvent::Transition { from, to: next });
    }

    async fn save_name(&mut self, name: &str) {
        self.services.settings.set_user_name(name);
        self.telemetry
            .record(TelemetryEvent::Lifecycle(LifecycleEvent::NameCaptured));
        self.say(Prompt::NameSaved(name.to_string())).await;
    }

    /// Persists, notifies, then confirms in the new language.
    async fn apply_language(&mut self, target: Locale) {
        self.services.settings.set_locale(target);
        self.services.locale_notifier.locale_changed(target);
        info!(locale = %target, "Language changed");
        self.telemetry
            .record(TelemetryEvent::Lifecycle(LifecycleEvent::LanguageChanged));
        self.say(Prompt::LanguageSaved).await;
    }

    async fn apply_rate(&mut self, direction: RateDirection) {
        let current = self.services.settings.speech_rate();
        let rate = adjust(current, direction);
        self.services.settings.set_speech_rate(rate);
        info!(from = current, to = rate, "Speech rate changed");
        self.telemetry
            .record(TelemetryEvent::Lifecycle(LifecycleEvent::SpeechRateChanged));
        self.say(Prompt::RateSaved(rate)).await;
    }

    fn toggled_locale(&self) -> Locale {
        if self.locale() == self.config.primary_locale {
            self.config.secondary_locale
        } else {
            self.config.primary_locale
        }
    }

    /// Remote turn. Failures are answered with an apology and leave the
    /// dialog state as it was.
    async fn escalate(&mut self, user_text: &str, screen_context: Option<&str>, follow_up: bool) {
        let request = AssistRequest {
            session_id: self.conversation.ensure_session(),
            user_text: user_text.to_string(),
            screen_context: screen_context
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            locale: self.locale().tag().to_string(),
            device_status: self.services.device.snapshot(),
        };
        info!(
            session = %request.session_id,
            follow_up,
            has_screen = request.screen_context.is_some(),
            "Escalating to remote assistant"
        );

        let started = Instant::now();
        let result = match tokio::time::timeout(
            self.config.llm_timeout,
            self.services.llm.assist(request),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout(self.config.llm_timeout).into()),
        };
        let latency_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(reply) => {
                self.record_escalation(EscalationOutcome::Replied, follow_up, latency_ms);
                self.deliver(reply).await;
            }
            Err(e) => {
                let outcome = match e.downcast_ref::<LlmError>() {
                    Some(LlmError::Timeout(_)) => EscalationOutcome::TimedOut,
                    _ => EscalationOutcome::Failed,
                };
                warn!(error = %e, latency_ms, "Remote assistant failed");
                self.record_escalation(outcome, follow_up, latency_ms);
                self.say(Prompt::RemoteFallback).await;
            }
        }
    }

    async fn deliver(&mut self, reply: AssistReply) {
        // The screen the reply talks about; the window compares against it.
        let opened_on = self.services.actions.screen_digest();
        let text = reply.reply_text.trim();
        if !text.is_empty() {
            self.say_text(text.to_string()).await;
        }

        if !reply.actions.is_empty() {
            let report = self.services.actions.dispatch_all(&reply.actions).await;
            info!(
                performed = report.performed,
                failed = report.failed,
                unresolved = report.unresolved,
                "Action batch finished"
            );
            self.telemetry.record(TelemetryEvent::ActionBatch {
                performed: report.performed,
                failed: report.failed,
                unresolved: report.unresolved,
            });
        }

        self.services
            .follow_up
            .open(self.config.follow_up_window, opened_on);
    }

    fn record_escalation(&mut self, outcome: EscalationOutcome, follow_up: bool, latency_ms: u64) {
        self.telemetry.record(TelemetryEvent::Escalation {
            outcome,
            follow_up,
            latency_ms,
        });
    }

    fn locale(&self) -> Locale {
        self.services.settings.locale()
    }

    async fn say(&mut self, prompt: Prompt) {
        let text = prompt.render(self.locale());
        self.say_text(text).await;
    }

    async fn say_text(&mut self, text: String) {
        if let Err(e) = self.services.speech.speak(&text, QueueMode::Flush).await {
            warn!(error = %e, "Speech output failed");
        }
        self.last_spoken = Some(text);
    }
}
