use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Weights of the cost (α), resilience (β), and sustainability (γ) components.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RewardWeights {
    #[serde(alias = "alpha")]
    pub cost: f64,

    #[serde(alias = "beta")]
    pub resilience: f64,

    #[serde(alias = "gamma")]
    pub sustainability: f64,
}

impl Default for RewardWeights {
    fn default() -> Self {
        Self { cost: 1.0, resilience: 20.0, sustainability: 10.0 }
    }
}

impl RewardWeights {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (field, value) in [
            ("cost", self.cost),
            ("resilience", self.resilience),
            ("sustainability", self.sustainability),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigurationError::Negative { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greek_aliases() {
        let weights: RewardWeights = toml::from_str("alpha = 2.0\ngamma = 0.0").unwrap();
        assert_eq!(weights, RewardWeights { cost: 2.0, resilience: 20.0, sustainability: 0.0 });
    }

    #[test]
    fn test_negative_weight() {
        let weights = RewardWeights { resilience: -1.0, ..RewardWeights::default() };
        assert_eq!(
            weights.validate(),
            Err(ConfigurationError::Negative { field: "resilience", value: -1.0 })
        );
    }
}
