pub mod dialog;
pub mod event;
pub mod intent;
pub mod locale;
pub mod reactor;
pub mod speech;
pub mod telemetry;
