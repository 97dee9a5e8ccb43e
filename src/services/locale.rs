use tokio::sync::broadcast;
use tracing::debug;

use crate::kernel::locale::Locale;

/// Tells dependent components to reload localized strings.
pub trait LocaleNotifier: Send + Sync {
    fn locale_changed(&self, locale: Locale);
}

#[derive(Debug, Clone)]
pub struct BroadcastLocaleNotifier {
    tx: broadcast::Sender<Locale>,
}

impl BroadcastLocaleNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Locale> {
        self.tx.subscribe()
    }
}

impl LocaleNotifier for BroadcastLocaleNotifier {
    fn locale_changed(&self, locale: Locale) {
        // No subscribers is fine.
        if self.tx.send(locale).is_err() {
            debug!(%locale, "Locale change had no listeners");
        }
    }
}
