use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connectivity {
    Wifi,
    Cellular,
    #[default]
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RingerMode {
    #[default]
    Normal,
    Vibrate,
    Silent,
}

/// Opaque device context attached to every remote call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceStatus {
    pub connectivity: Connectivity,
    pub battery_percent: Option<u8>,
    pub charging: bool,
    pub ringer_mode: RingerMode,
    pub locked: bool,
    pub installed_apps: Vec<String>,
}

/// Gathered synchronously at call time.
pub trait DeviceStatusProvider: Send + Sync {
    fn snapshot(&self) -> DeviceStatus;
}

/// Fixed status, for the console driver and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticDeviceStatus(pub DeviceStatus);

impl DeviceStatusProvider for StaticDeviceStatus {
    fn snapshot(&self) -> DeviceStatus {
        self.0.clone()
    }
}
