//! Speech-rate arithmetic shared by the local commands and the speed sub-dialog.

pub const MIN_RATE: f32 = 0.1;
pub const MAX_RATE: f32 = 2.5;
pub const DEFAULT_RATE: f32 = 1.0;

/// Fixed step for one "faster" or "slower" command, independent of repetition.
pub const RATE_STEP: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDirection {
    Faster,
    Slower,
}

impl RateDirection {
    fn delta(&self) -> f32 {
        match self {
            RateDirection::Faster => RATE_STEP,
            RateDirection::Slower => -RATE_STEP,
        }
    }
}

/// `clamp(current + delta, 0.1, 2.5)` rounded to one decimal place.
pub fn adjust(current: f32, direction: RateDirection) -> f32 {
    let next = (current + direction.delta()).clamp(MIN_RATE, MAX_RATE);
    ((next * 10.0).round() / 10.0).clamp(MIN_RATE, MAX_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_by_point_two() {
        assert_eq!(adjust(1.0, RateDirection::Faster), 1.2);
        assert_eq!(adjust(1.0, RateDirection::Slower), 0.8);
    }

    #[test]
    fn clamps_at_both_ends() {
        assert_eq!(adjust(2.4, RateDirection::Faster), 2.5);
        assert_eq!(adjust(2.5, RateDirection::Faster), 2.5);
        assert_eq!(adjust(0.2, RateDirection::Slower), 0.1);
        assert_eq!(adjust(0.1, RateDirection::Slower), 0.1);
    }

    #[test]
    fn rounds_accumulated_float_error() {
        let mut rate = DEFAULT_RATE;
        for _ in 0..3 {
            rate = adjust(rate, RateDirection::Faster);
        }
        assert_eq!(rate, 1.6);
    }
}
