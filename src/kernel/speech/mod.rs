pub mod rate;

pub use rate::{adjust, RateDirection};
