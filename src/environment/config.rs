use serde::{Deserialize, Serialize};

use crate::{error::ConfigurationError, quantity::cost::KilowattCharge};

/// One week of 15-minute steps.
const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 96 * 7;

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// Wear charge per kilowatt of absolute net storage power, applied once per step.
    pub operating_cost_per_kw: KilowattCharge,

    /// Number of preceding steps averaged together with the current one
    /// to decide whether the grid price is high.
    pub moving_average_window: usize,

    /// Truncate the episode after this many steps.
    pub max_steps: Option<usize>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            operating_cost_per_kw: KilowattCharge(0.005),
            moving_average_window: DEFAULT_MOVING_AVERAGE_WINDOW,
            max_steps: None,
        }
    }
}

impl EnvironmentConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let operating_cost = self.operating_cost_per_kw.0;
        if !operating_cost.is_finite() || operating_cost < 0.0 {
            return Err(ConfigurationError::Negative {
                field: "operating_cost_per_kw",
                value: operating_cost,
            });
        }
        if self.moving_average_window == 0 {
            return Err(ConfigurationError::EmptyWindow);
        }
        if self.max_steps == Some(0) {
            return Err(ConfigurationError::NonPositive { field: "max_steps", value: 0.0 });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(EnvironmentConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_empty_window() {
        let config = EnvironmentConfig { moving_average_window: 0, ..EnvironmentConfig::default() };
        assert_eq!(config.validate(), Err(ConfigurationError::EmptyWindow));
    }

    #[test]
    fn test_zero_max_steps() {
        let config = EnvironmentConfig { max_steps: Some(0), ..EnvironmentConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize() {
        let config: EnvironmentConfig = toml::from_str("max_steps = 96").unwrap();
        assert_eq!(config.max_steps, Some(96));
        assert_eq!(config.moving_average_window, 672);
    }
}
