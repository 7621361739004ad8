use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigurationError,
    quantity::{
        Zero,
        energy::KilowattHours,
        mass::{Kilograms, KilogramsPerKilowattHour, KilowattHoursPerKilogram},
        power::Kilowatts,
        time::Hours,
    },
};

/// Rated parameters of the battery and the hydrogen path.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DessConfig {
    #[serde(rename = "battery_capacity_kwh")]
    pub battery_capacity: KilowattHours,

    #[serde(rename = "battery_max_charge_kw")]
    pub battery_max_charge: Kilowatts,

    #[serde(rename = "battery_max_discharge_kw")]
    pub battery_max_discharge: Kilowatts,

    /// Charging efficiency, `(0, 1]`.
    pub battery_charge_efficiency: f64,

    /// Discharging efficiency, `(0, 1]`.
    pub battery_discharge_efficiency: f64,

    #[serde(rename = "electrolyzer_capacity_kw")]
    pub electrolyzer_capacity: Kilowatts,

    /// Electricity spent per kilogram of produced hydrogen.
    #[serde(rename = "electrolyzer_efficiency_kwh_per_kg")]
    pub electrolyzer_efficiency: KilowattHoursPerKilogram,

    #[serde(rename = "h2_storage_capacity_kg")]
    pub hydrogen_capacity: Kilograms,

    #[serde(rename = "fuel_cell_capacity_kw")]
    pub fuel_cell_capacity: Kilowatts,

    /// Hydrogen burnt per kilowatt-hour of produced electricity.
    #[serde(rename = "fuel_cell_efficiency_kg_per_kwh")]
    pub fuel_cell_efficiency: KilogramsPerKilowattHour,

    #[serde(rename = "time_step_h")]
    pub time_step: Hours,
}

impl Default for DessConfig {
    fn default() -> Self {
        Self {
            battery_capacity: KilowattHours(200.0),
            battery_max_charge: Kilowatts(50.0),
            battery_max_discharge: Kilowatts(50.0),
            battery_charge_efficiency: 0.95,
            battery_discharge_efficiency: 0.95,
            electrolyzer_capacity: Kilowatts(100.0),
            electrolyzer_efficiency: KilowattHoursPerKilogram(55.0),
            hydrogen_capacity: Kilograms(50.0),
            fuel_cell_capacity: Kilowatts(50.0),
            fuel_cell_efficiency: KilogramsPerKilowattHour(0.06),
            time_step: Hours::from_minutes(15),
        }
    }
}

impl DessConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        positive("battery_capacity_kwh", self.battery_capacity.0)?;
        positive("battery_max_charge_kw", self.battery_max_charge.0)?;
        positive("battery_max_discharge_kw", self.battery_max_discharge.0)?;
        efficiency("battery_charge_efficiency", self.battery_charge_efficiency)?;
        efficiency("battery_discharge_efficiency", self.battery_discharge_efficiency)?;
        positive("electrolyzer_capacity_kw", self.electrolyzer_capacity.0)?;
        positive("electrolyzer_efficiency_kwh_per_kg", self.electrolyzer_efficiency.0)?;
        positive("h2_storage_capacity_kg", self.hydrogen_capacity.0)?;
        positive("fuel_cell_capacity_kw", self.fuel_cell_capacity.0)?;
        positive("fuel_cell_efficiency_kg_per_kwh", self.fuel_cell_efficiency.0)?;
        positive("time_step_h", self.time_step.0)?;
        Ok(())
    }

    /// Battery power request for the normalized command, `-1..=1`.
    pub fn battery_setpoint(&self, command: f64) -> Kilowatts {
        if command > 0.0 {
            self.battery_max_charge * command
        } else if command < 0.0 {
            self.battery_max_discharge * command
        } else {
            Kilowatts::ZERO
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::NonPositive { field, value })
    }
}

fn efficiency(field: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigurationError::EfficiencyOutOfRange { field, value })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(DessConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_zero_capacity() {
        let config =
            DessConfig { battery_capacity: KilowattHours::ZERO, ..DessConfig::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::NonPositive { field: "battery_capacity_kwh", value: 0.0 })
        );
    }

    #[test]
    fn test_negative_fuel_cell_efficiency() {
        let config = DessConfig {
            fuel_cell_efficiency: KilogramsPerKilowattHour(-0.1),
            ..DessConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::NonPositive { field: "fuel_cell_efficiency_kg_per_kwh", .. })
        ));
    }

    #[test]
    fn test_efficiency_above_one() {
        let config = DessConfig { battery_discharge_efficiency: 1.2, ..DessConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::EfficiencyOutOfRange { .. })
        ));
    }

    #[test]
    fn test_battery_setpoint() {
        let config = DessConfig {
            battery_max_charge: Kilowatts(50.0),
            battery_max_discharge: Kilowatts(40.0),
            ..DessConfig::default()
        };
        assert_abs_diff_eq!(config.battery_setpoint(0.5).0, 25.0);
        assert_abs_diff_eq!(config.battery_setpoint(-0.5).0, -20.0);
        assert_abs_diff_eq!(config.battery_setpoint(0.0).0, 0.0);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: DessConfig = toml::from_str("battery_capacity_kwh = 500.0\ntime_step_h = 1.0")
            .unwrap();
        assert_abs_diff_eq!(config.battery_capacity.0, 500.0);
        assert_abs_diff_eq!(config.time_step.0, 1.0);
        assert_abs_diff_eq!(config.fuel_cell_capacity.0, 50.0);
    }
}
