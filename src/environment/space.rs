use crate::{dess::Action, environment::Observation};

/// Element-wise bounds of a continuous vector space.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds<const N: usize> {
    pub low: [f64; N],
    pub high: [f64; N],
}

impl<const N: usize> Bounds<N> {
    #[must_use]
    pub fn contains(&self, point: &[f64; N]) -> bool {
        point
            .iter()
            .zip(self.low.iter().zip(&self.high))
            .all(|(value, (low, high))| (low..=high).contains(&value))
    }
}

/// Battery, electrolyzer, and fuel cell commands.
pub const ACTION_SPACE: Bounds<3> = Bounds { low: Action::LOW, high: Action::HIGH };

/// Spot prices may go negative, everything else is non-negative.
pub const OBSERVATION_SPACE: Bounds<{ Observation::N_DIMENSIONS }> = Bounds {
    low: [0.0, 0.0, 0.0, 0.0, 0.0, f64::NEG_INFINITY, 0.0, 0.0],
    high: [1.0, 1.0, f64::INFINITY, f64::INFINITY, f64::INFINITY, f64::INFINITY, 1.0, 1.0],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_space() {
        assert!(ACTION_SPACE.contains(&[-1.0, 0.0, 1.0]));
        assert!(!ACTION_SPACE.contains(&[0.0, -0.1, 0.0]));
        assert!(!ACTION_SPACE.contains(&[f64::NAN, 0.0, 0.0]));
    }

    #[test]
    fn test_exhausted_observation_is_inside() {
        assert!(OBSERVATION_SPACE.contains(&Observation::EXHAUSTED.to_array()));
    }
}
