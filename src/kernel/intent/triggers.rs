//! Trigger vocabularies, one table per supported locale.
//!
//! All entries are stored already normalized: lowercase, `ё` folded to `е`,
//! single spaces between words. Extend a locale by adding phrases here.

use super::types::Command;
use crate::kernel::locale::Locale;

pub struct TriggerTable {
    /// Dropped before whole-string comparison of language-switch phrases.
    pub filler_words: &'static [&'static str],
    /// Whole-string phrases (after filler removal) that switch language.
    pub language_switch: &'static [(&'static str, Locale)],
    /// Whole-string phrases that flip to the other configured language.
    pub language_toggle: &'static [&'static str],
    /// Prefix triggers whose remainder is the new name.
    pub change_name: &'static [&'static str],
    pub faster: &'static [&'static str],
    pub slower: &'static [&'static str],
    pub intent_name: &'static [&'static str],
    pub intent_language: &'static [&'static str],
    pub intent_speed: &'static [&'static str],
    pub repeat: &'static [&'static str],
    pub settings: &'static [&'static str],
}

impl TriggerTable {
    /// Plain prefix triggers for commands that carry no payload.
    pub fn triggers_for(&self, command: Command) -> &'static [&'static str] {
        match command {
            Command::ChangeSpeechRateFaster => self.faster,
            Command::ChangeSpeechRateSlower => self.slower,
            Command::IntentChangeName => self.intent_name,
            Command::IntentChangeLanguage => self.intent_language,
            Command::IntentChangeSpeed => self.intent_speed,
            Command::Repeat => self.repeat,
            Command::OpenSettings => self.settings,
            Command::ChangeName | Command::ChangeLanguage | Command::Unknown => &[],
        }
    }
}

pub const RUSSIAN: TriggerTable = TriggerTable {
    filler_words: &["на", "по"],
    language_switch: &[
        ("английский", Locale::English),
        ("английском", Locale::English),
        ("английски", Locale::English),
        ("переключи английский", Locale::English),
        ("переключись английский", Locale::English),
        ("перейди английский", Locale::English),
        ("говори английском", Locale::English),
        ("говори английски", Locale::English),
        ("язык английский", Locale::English),
        ("русский", Locale::Russian),
        ("русском", Locale::Russian),
        ("русски", Locale::Russian),
        ("переключи русский", Locale::Russian),
        ("переключись русский", Locale::Russian),
        ("перейди русский", Locale::Russian),
        ("говори русском", Locale::Russian),
        ("говори русски", Locale::Russian),
        ("язык русский", Locale::Russian),
    ],
    language_toggle: &["переключи язык", "другой язык", "поменяй язык обратно"],
    change_name: &[
        "измени имя на",
        "поменяй имя на",
        "смени имя на",
        "зови меня",
        "называй меня",
        "меня зовут",
    ],
    faster: &["быстрее", "говори быстрее", "побыстрее", "живее", "поживее"],
    slower: &["медленнее", "говори медленнее", "помедленнее", "не спеши", "не торопись"],
    intent_name: &["имя", "измени имя", "поменяй имя", "смени имя", "изменить имя"],
    intent_language: &["язык", "измени язык", "поменяй язык", "смени язык", "изменить язык"],
    intent_speed: &[
        "скорость",
        "скорость речи",
        "темп",
        "измени скорость",
        "поменяй скорость",
        "изменить скорость",
    ],
    repeat: &["повтори", "еще раз", "что ты сказал"],
    settings: &["настройки", "настройка", "открой настройки", "параметры"],
};

pub const ENGLISH: TriggerTable = TriggerTable {
    filler_words: &["to", "in", "into"],
    language_switch: &[
        ("english", Locale::English),
        ("switch english", Locale::English),
        ("speak english", Locale::English),
        ("language english", Locale::English),
        ("russian", Locale::Russian),
        ("switch russian", Locale::Russian),
        ("speak russian", Locale::Russian),
        ("language russian", Locale::Russian),
    ],
    language_toggle: &["switch language", "other language", "toggle language"],
    change_name: &[
        "change name to",
        "change my name to",
        "call me",
        "my name is",
    ],
    faster: &["faster", "speak faster", "talk faster", "hurry up"],
    slower: &["slower", "speak slower", "talk slower", "easy now"],
    intent_name: &["name", "change name", "change my name"],
    intent_language: &["language", "change language"],
    intent_speed: &["speed", "speech rate", "change speed"],
    repeat: &["repeat", "say again", "say that again"],
    settings: &["settings", "open settings", "preferences"],
};

pub const ALL: [&TriggerTable; 2] = [&RUSSIAN, &ENGLISH];
