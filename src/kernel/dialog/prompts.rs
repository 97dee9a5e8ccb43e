use crate::kernel::locale::Locale;

/// Everything the assistant says on its own, as opposed to relaying a remote reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    SettingsMenu,
    SettingsMenuRetry,
    AskName,
    AskLanguage,
    /// Echoes the best-guess token back for confirmation.
    ConfirmLanguageGuess(String),
    AskSpeed,
    AskSpeedRetry,
    NameSaved(String),
    LanguageSaved,
    RateSaved(f32),
    GiveUp,
    NothingToRepeat,
    RemoteFallback,
}

impl Prompt {
    pub fn render(&self, locale: Locale) -> String {
        match locale {
            Locale::Russian => self.russian(),
            Locale::English => self.english(),
        }
    }

    fn russian(&self) -> String {
        match self {
            Prompt::SettingsMenu => "Что вы хотите изменить: имя, язык или скорость речи?".into(),
            Prompt::SettingsMenuRetry => "Не расслышала. Скажите: имя, язык или скорость.".into(),
            Prompt::AskName => "Как мне вас называть?".into(),
            Prompt::AskLanguage => "На какой язык переключиться: русский или английский?".into(),
            Prompt::ConfirmLanguageGuess(guess) => {
                format!("Вы сказали «{guess}»? Назовите язык: русский или английский.")
            }
            Prompt::AskSpeed => "Говорить быстрее или медленнее?".into(),
            Prompt::AskSpeedRetry => "Скажите «быстрее» или «медленнее».".into(),
            Prompt::NameSaved(name) => format!("Хорошо, теперь я буду называть вас {name}."),
            Prompt::LanguageSaved => "Теперь я говорю по-русски.".into(),
            Prompt::RateSaved(rate) => format!("Скорость речи {rate:.1}."),
            Prompt::GiveUp => "Извините, не получилось. Попробуем позже.".into(),
            Prompt::NothingToRepeat => "Мне пока нечего повторить.".into(),
            Prompt::RemoteFallback => "Извините, сейчас не могу ответить. Попробуйте ещё раз.".into(),
        }
    }

    fn english(&self) -> String {
        match self {
            Prompt::SettingsMenu => "What would you like to change: name, language or speech rate?".into(),
            Prompt::SettingsMenuRetry => "Sorry, I didn't catch that. Say name, language or speed.".into(),
            Prompt::AskName => "What should I call you?".into(),
            Prompt::AskLanguage => "Which language should I switch to: Russian or English?".into(),
            Prompt::ConfirmLanguageGuess(guess) => {
                format!("Did you say \"{guess}\"? Please name the language: Russian or English.")
            }
            Prompt::AskSpeed => "Should I speak faster or slower?".into(),
            Prompt::AskSpeedRetry => "Please say faster or slower.".into(),
            Prompt::NameSaved(name) => format!("Okay, I will call you {name}."),
            Prompt::LanguageSaved => "I am speaking English now.".into(),
            Prompt::RateSaved(rate) => format!("Speech rate is now {rate:.1}."),
            Prompt::GiveUp => "Sorry, that didn't work. Let's try again later.".into(),
            Prompt::NothingToRepeat => "There is nothing to repeat yet.".into(),
            Prompt::RemoteFallback => "Sorry, I can't answer right now. Please try again.".into(),
        }
    }
}
