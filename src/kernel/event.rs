/// Reserved utterance the screen watcher injects when the screen settled on
/// something new while a follow-up window was open.
pub const FOLLOW_UP_TOKEN: &str = "FOLLOW_UP";

#[derive(Debug, Clone)]
pub enum Event {
    /// Recognized text from the user, or a synthesized follow-up.
    Input(InputEvent),
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    pub source: String,
    pub text: String,
}

impl InputEvent {
    pub fn text(source: &str, text: &str) -> Self {
        Self {
            source: source.to_string(),
            text: text.to_string(),
        }
    }

    pub fn follow_up() -> Self {
        Self::text("screen", FOLLOW_UP_TOKEN)
    }

    pub fn is_follow_up(&self) -> bool {
        is_follow_up(&self.text)
    }
}

pub fn is_follow_up(text: &str) -> bool {
    text.trim() == FOLLOW_UP_TOKEN
}
