pub mod engine;
pub mod hints;
pub mod prompts;
pub mod state;

pub use engine::{DialogConfig, DialogEngine, DialogServices};
pub use prompts::Prompt;
pub use state::{ConversationSession, DialogState};
