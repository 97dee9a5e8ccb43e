//! Narrow interfaces to the collaborators around the core, plus the default
//! implementations the console driver uses.

pub mod actions;
pub mod device;
pub mod llm;
pub mod locale;
pub mod settings;
pub mod speech;
pub mod tree_provider;
