use serde::Serialize;

use crate::{
    dess::{
        action::Action,
        battery::Battery,
        config::DessConfig,
        hydrogen::{HydrogenFlow, HydrogenPath},
        state::StorageState,
    },
    error::ConfigurationError,
    quantity::{Zero, power::Kilowatts},
};

/// Power requests derived from a normalized action.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct Setpoints {
    /// Positive charges, negative discharges.
    pub battery: Kilowatts,
    pub electrolyzer: Kilowatts,
    pub fuel_cell: Kilowatts,
}

/// Outcome of a single controller step.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Operation {
    pub requested: Setpoints,

    /// Actual battery power: positive charges, negative discharges.
    pub battery: Kilowatts,

    pub hydrogen: HydrogenFlow,

    /// Net power exchanged with the rest of the site.
    ///
    /// Positive when the storage is a net consumer, negative when it is a net supplier.
    pub net: Kilowatts,
}

impl Operation {
    /// Actual battery discharge power, never negative.
    pub fn battery_discharge(&self) -> Kilowatts {
        (-self.battery).max(Kilowatts::ZERO)
    }
}

/// Composes the battery and the hydrogen path into one physical step.
#[must_use]
#[derive(Clone, Debug)]
pub struct Controller {
    config: DessConfig,
    battery: Battery,
    hydrogen: HydrogenPath,
}

impl Controller {
    /// Validate the configuration and start with an empty battery and tank.
    pub fn try_new(config: DessConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            battery: Battery::from_config(&config),
            hydrogen: HydrogenPath::from_config(&config),
            config,
        })
    }

    /// Empty the battery and the tank.
    pub fn reset(&mut self) {
        self.battery = Battery::from_config(&self.config);
        self.hydrogen = HydrogenPath::from_config(&self.config);
    }

    pub const fn config(&self) -> &DessConfig {
        &self.config
    }

    /// Scale the normalized action by the rated capacities.
    pub fn setpoints(&self, action: Action) -> Setpoints {
        let action = action.clipped();
        Setpoints {
            battery: self.config.battery_setpoint(action.battery),
            electrolyzer: self.config.electrolyzer_capacity * action.electrolyzer,
            fuel_cell: self.config.fuel_cell_capacity * action.fuel_cell,
        }
    }

    /// Apply the action for one time step and return the resulting power flows.
    pub fn step(&mut self, action: Action) -> Operation {
        let requested = self.setpoints(action);
        let for_ = self.config.time_step;
        let battery = self.battery.apply(requested.battery, for_);
        let hydrogen = self.hydrogen.apply(requested.electrolyzer, requested.fuel_cell, for_);
        Operation {
            requested,
            battery,
            hydrogen,
            net: battery + hydrogen.electrolyzer - hydrogen.fuel_cell,
        }
    }

    pub fn state(&self) -> StorageState {
        StorageState {
            battery_energy: self.battery.residual_energy(),
            hydrogen_mass: self.hydrogen.mass(),
            battery_soc: self.battery.state_of_charge(),
            hydrogen_level: self.hydrogen.level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::quantity::{
        energy::KilowattHours,
        mass::{Kilograms, KilogramsPerKilowattHour, KilowattHoursPerKilogram},
        time::Hours,
    };

    fn config() -> DessConfig {
        DessConfig {
            battery_capacity: KilowattHours(200.0),
            battery_max_charge: Kilowatts(50.0),
            battery_max_discharge: Kilowatts(40.0),
            battery_charge_efficiency: 0.95,
            battery_discharge_efficiency: 0.95,
            electrolyzer_capacity: Kilowatts(100.0),
            electrolyzer_efficiency: KilowattHoursPerKilogram(55.0),
            hydrogen_capacity: Kilograms(10.0),
            fuel_cell_capacity: Kilowatts(50.0),
            fuel_cell_efficiency: KilogramsPerKilowattHour(0.06),
            time_step: Hours(1.0),
        }
    }

    #[test]
    fn test_invalid_config() {
        let config = DessConfig { hydrogen_capacity: Kilograms::ZERO, ..config() };
        assert!(Controller::try_new(config).is_err());
    }

    #[test]
    fn test_reset() {
        let mut controller = Controller::try_new(config()).unwrap();
        controller.step(Action::from(Action::HIGH));
        assert!(controller.state().battery_energy > KilowattHours::ZERO);
        controller.reset();
        assert_eq!(controller.state().battery_energy, KilowattHours::ZERO);
        assert_eq!(controller.state().hydrogen_mass, Kilograms::ZERO);
    }

    #[test]
    fn test_full_charge() {
        let mut controller = Controller::try_new(config()).unwrap();
        let operation = controller.step(Action::from([1.0, 0.0, 0.0]));
        assert_abs_diff_eq!(operation.net.0, 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(controller.state().battery_energy.0, 47.5, epsilon = 1e-9);
        assert_abs_diff_eq!(controller.state().battery_soc, 0.2375, epsilon = 1e-9);
    }

    #[test]
    fn test_setpoints_use_discharge_rating() {
        let controller = Controller::try_new(config()).unwrap();
        let setpoints = controller.setpoints(Action::from([-0.5, 0.5, 0.2]));
        assert_abs_diff_eq!(setpoints.battery.0, -20.0);
        assert_abs_diff_eq!(setpoints.electrolyzer.0, 50.0);
        assert_abs_diff_eq!(setpoints.fuel_cell.0, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_out_of_bounds_action_is_clipped() {
        let mut clipped = Controller::try_new(config()).unwrap();
        let mut rated = Controller::try_new(config()).unwrap();
        let clipped_operation = clipped.step(Action::from([7.0, 3.0, 2.0]));
        let rated_operation = rated.step(Action::from([1.0, 1.0, 1.0]));
        assert_eq!(clipped_operation.net, rated_operation.net);
        assert_eq!(clipped.state(), rated.state());
    }

    /// Net power sign: the storage supplies the site when discharging.
    #[test]
    fn test_net_power_sign() {
        let mut controller = Controller::try_new(config()).unwrap();
        controller.step(Action::from([1.0, 1.0, 0.0]));
        let operation = controller.step(Action::from([-1.0, 0.0, 1.0]));
        assert!(operation.net < Kilowatts::ZERO);
        assert_abs_diff_eq!(
            operation.net.0,
            operation.battery.0 + operation.hydrogen.electrolyzer.0
                - operation.hydrogen.fuel_cell.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(operation.battery_discharge().0, 40.0, epsilon = 1e-9);
    }

    #[test]
    fn test_levels_stay_within_bounds() {
        let mut controller = Controller::try_new(config()).unwrap();
        let actions = [[1.0, 1.0, 0.0], [1.0, 1.0, 1.0], [-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]];
        for _ in 0..20 {
            for action in actions {
                controller.step(Action::from(action));
                let state = controller.state();
                assert!((0.0..=1.0).contains(&state.battery_soc));
                assert!((0.0..=1.0).contains(&state.hydrogen_level));
                assert!(state.battery_energy >= KilowattHours::ZERO);
                assert!(state.hydrogen_mass >= Kilograms::ZERO);
            }
        }
    }
}
