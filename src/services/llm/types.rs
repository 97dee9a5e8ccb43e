use serde::{Deserialize, Serialize};

use crate::screen::locator::Selector;
use crate::services::device::DeviceStatus;

/// One remote turn. `session_id` correlates turns of the same exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistRequest {
    pub session_id: String,
    pub user_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_context: Option<String>,
    pub locale: String,
    pub device_status: DeviceStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistReply {
    #[serde(alias = "reply", alias = "text")]
    pub reply_text: String,
    #[serde(default)]
    pub actions: Vec<DeviceAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Device action requested by the model, in the order it should run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeviceAction {
    Click {
        selector: Selector,
    },
    Back,
    Home,
    Highlight {
        selector: Selector,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_ms: Option<u64>,
    },
    Scroll {
        #[serde(default = "default_scroll")]
        direction: ScrollDirection,
    },
}

fn default_scroll() -> ScrollDirection {
    ScrollDirection::Down
}

impl DeviceAction {
    pub fn kind(&self) -> &'static str {
        match self {
            DeviceAction::Click { .. } => "click",
            DeviceAction::Back => "back",
            DeviceAction::Home => "home",
            DeviceAction::Highlight { .. } => "highlight",
            DeviceAction::Scroll { .. } => "scroll",
        }
    }
}
