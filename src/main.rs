use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use voice_assist::kernel::dialog::{DialogConfig, DialogEngine, DialogServices};
use voice_assist::kernel::event::{Event, InputEvent};
use voice_assist::outputs::console::{ConsoleActions, ConsoleSpeech};
use voice_assist::screen::watcher::ScreenWatcher;
use voice_assist::screen::FollowUpWindow;
use voice_assist::services::actions::ActionDispatcher;
use voice_assist::services::device::StaticDeviceStatus;
use voice_assist::services::llm::HttpLlmClient;
use voice_assist::services::locale::BroadcastLocaleNotifier;
use voice_assist::services::settings::{InMemorySettings, SettingsStore};
use voice_assist::services::tree_provider::{SnapshotTreeProvider, UiTreeProvider};
use voice_assist::{AssistConfig, Reactor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AssistConfig::from_env()?;
    tracing::info!(url = %config.llm_url, locale = %config.primary_locale, "Assistant booting");

    let settings: Arc<dyn SettingsStore> = Arc::new(InMemorySettings::new(config.primary_locale));
    let trees: Arc<dyn UiTreeProvider> = Arc::new(SnapshotTreeProvider::default());
    let notifier = Arc::new(BroadcastLocaleNotifier::new(8));
    let window = FollowUpWindow::new();

    // Stand-in for the overlay that reloads its strings.
    let mut locale_rx = notifier.subscribe();
    tokio::spawn(async move {
        while let Ok(locale) = locale_rx.recv().await {
            tracing::info!(%locale, "Localized strings reloaded");
        }
    });

    let services = DialogServices {
        settings: settings.clone(),
        speech: Arc::new(ConsoleSpeech::new(settings.clone())),
        llm: Arc::new(HttpLlmClient::new(config.llm_url.clone(), config.llm_timeout)),
        device: Arc::new(StaticDeviceStatus::default()),
        locale_notifier: notifier,
        actions: ActionDispatcher::new(
            Arc::new(ConsoleActions),
            trees.clone(),
            config.highlight_duration,
        ),
        follow_up: window.clone(),
    };
    let engine = DialogEngine::new(services, DialogConfig::from(&config));

    let (tx, rx) = mpsc::channel(100);
    let mut reactor = Reactor::new(rx, engine, trees.clone());

    let cancel = CancellationToken::new();
    let (_screen_tx, screen_rx) = mpsc::channel(32);
    let watcher = ScreenWatcher::new(trees, window, config.screen_settle, tx.clone());
    let watcher_task = tokio::spawn(watcher.run(screen_rx, cancel.clone()));

    let stdin_tx = tx.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if stdin_tx
                .send(Event::Input(InputEvent::text("stdin", &line)))
                .await
                .is_err()
            {
                return;
            }
        }
        let _ = stdin_tx.send(Event::Shutdown).await;
    });

    let signal_tx = tx;
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = signal_tx.send(Event::Shutdown).await;
        }
    });

    tracing::info!("Type an utterance per line; alternates separated by '{}'. Ctrl+C to stop.", config.alternate_delimiter);
    reactor.run().await;

    cancel.cancel();
    let _ = watcher_task.await;

    let snap = reactor.engine.telemetry.snapshot();
    tracing::info!(
        transitions = snap.dialog_stats.transitions,
        local_commands = snap.dialog_stats.local_commands,
        escalations = snap.escalation_stats.replied,
        escalation_failures = snap.escalation_stats.failed + snap.escalation_stats.timed_out,
        retries = snap.retry_stats.issued,
        "Session summary"
    );
    Ok(())
}
