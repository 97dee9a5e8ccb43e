pub mod client;
pub mod types;

pub use client::{HttpLlmClient, LlmClient, LlmError};
pub use types::{AssistReply, AssistRequest, DeviceAction, ScrollDirection};
