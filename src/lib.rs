pub mod config;
pub mod kernel;
pub mod outputs;
pub mod screen;
pub mod services;

pub use config::{AssistConfig, ConfigError};
pub use kernel::dialog::{DialogEngine, DialogState};
pub use kernel::reactor::Reactor;
