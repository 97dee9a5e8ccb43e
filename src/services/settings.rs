use parking_lot::Mutex;

use crate::kernel::locale::Locale;
use crate::kernel::speech::rate::DEFAULT_RATE;

/// User preferences. Reads observe preceding writes immediately.
pub trait SettingsStore: Send + Sync {
    fn user_name(&self) -> Option<String>;
    fn set_user_name(&self, name: &str);
    fn locale(&self) -> Locale;
    fn set_locale(&self, locale: Locale);
    fn speech_rate(&self) -> f32;
    fn set_speech_rate(&self, rate: f32);
    /// First-run flag: the next utterance is the user's name.
    fn needs_name(&self) -> bool;
    fn set_needs_name(&self, needed: bool);
}

#[derive(Debug, Clone)]
struct Preferences {
    user_name: Option<String>,
    locale: Locale,
    speech_rate: f32,
    needs_name: bool,
}

#[derive(Debug)]
pub struct InMemorySettings {
    inner: Mutex<Preferences>,
}

impl InMemorySettings {
    pub fn new(locale: Locale) -> Self {
        Self {
            inner: Mutex::new(Preferences {
                user_name: None,
                locale,
                speech_rate: DEFAULT_RATE,
                needs_name: false,
            }),
        }
    }

    pub fn with_rate(self, rate: f32) -> Self {
        self.inner.lock().speech_rate = rate;
        self
    }
}

impl Default for InMemorySettings {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl SettingsStore for InMemorySettings {
    fn user_name(&self) -> Option<String> {
        self.inner.lock().user_name.clone()
    }

    fn set_user_name(&self, name: &str) {
        self.inner.lock().user_name = Some(name.to_string());
    }

    fn locale(&self) -> Locale {
        self.inner.lock().locale
    }

    fn set_locale(&self, locale: Locale) {
        self.inner.lock().locale = locale;
    }

    fn speech_rate(&self) -> f32 {
        self.inner.lock().speech_rate
    }

    fn set_speech_rate(&self, rate: f32) {
        self.inner.lock().speech_rate = rate;
    }

    fn needs_name(&self) -> bool {
        self.inner.lock().needs_name
    }

    fn set_needs_name(&self, needed: bool) {
        self.inner.lock().needs_name = needed;
    }
}
