pub mod parser;
pub mod triggers;
pub mod types;

pub use parser::IntentParser;
pub use types::{Command, ParsedCommand};
