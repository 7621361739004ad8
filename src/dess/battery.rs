use bon::Builder;

use crate::{
    dess::config::DessConfig,
    quantity::{Zero, energy::KilowattHours, power::Kilowatts, time::Hours},
};

#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct Battery {
    capacity: KilowattHours,
    max_charge: Kilowatts,
    max_discharge: Kilowatts,

    /// Charging efficiency, `0..=1`.
    charge_efficiency: f64,

    /// Discharging efficiency, `0..=1`.
    discharge_efficiency: f64,

    /// Current residual energy.
    #[builder(default = KilowattHours::ZERO)]
    residual_energy: KilowattHours,
}

impl Battery {
    /// Empty battery with the configured ratings.
    pub fn from_config(config: &DessConfig) -> Self {
        Self::builder()
            .capacity(config.battery_capacity)
            .max_charge(config.battery_max_charge)
            .max_discharge(config.battery_max_discharge)
            .charge_efficiency(config.battery_charge_efficiency)
            .discharge_efficiency(config.battery_discharge_efficiency)
            .build()
    }

    pub const fn residual_energy(&self) -> KilowattHours {
        self.residual_energy
    }

    /// Residual energy as a fraction of the capacity, `0..=1`.
    pub fn state_of_charge(&self) -> f64 {
        if self.capacity > KilowattHours::ZERO {
            (self.residual_energy / self.capacity).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Apply the requested power, update the residual energy and return the actual power.
    ///
    /// Positive power charges the battery, negative power discharges it. The request is capped
    /// by the power ratings first, and then by the available headroom or residual energy.
    /// The returned power is measured on the external side of the conversion, so it is
    /// what the rest of the site actually sees.
    pub fn apply(&mut self, requested_power: Kilowatts, for_: Hours) -> Kilowatts {
        if for_ <= Hours::ZERO || !requested_power.is_finite() {
            return Kilowatts::ZERO;
        }
        if requested_power > Kilowatts::ZERO {
            self.charge(requested_power.min(self.max_charge), for_)
        } else if requested_power < Kilowatts::ZERO {
            -self.discharge((-requested_power).min(self.max_discharge), for_)
        } else {
            Kilowatts::ZERO
        }
    }

    fn charge(&mut self, power: Kilowatts, for_: Hours) -> Kilowatts {
        let effective_duration = for_ * self.charge_efficiency;
        if effective_duration <= Hours::ZERO {
            return Kilowatts::ZERO;
        }
        let headroom = (self.capacity - self.residual_energy).max(KilowattHours::ZERO);
        let stored = (power * effective_duration).min(headroom);
        self.residual_energy = (self.residual_energy + stored).min(self.capacity);
        stored / effective_duration
    }

    fn discharge(&mut self, power: Kilowatts, for_: Hours) -> Kilowatts {
        if self.discharge_efficiency <= 0.0 {
            return Kilowatts::ZERO;
        }
        let drawn = (power * for_ / self.discharge_efficiency).min(self.residual_energy);
        self.residual_energy = (self.residual_energy - drawn).max(KilowattHours::ZERO);
        drawn * self.discharge_efficiency / for_
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn battery(charge_efficiency: f64, discharge_efficiency: f64) -> Battery {
        Battery::builder()
            .capacity(KilowattHours(200.0))
            .max_charge(Kilowatts(50.0))
            .max_discharge(Kilowatts(50.0))
            .charge_efficiency(charge_efficiency)
            .discharge_efficiency(discharge_efficiency)
            .build()
    }

    /// Full-power charge from empty for an hour.
    #[test]
    fn test_full_charge() {
        let mut battery = battery(0.95, 0.95);
        let actual = battery.apply(Kilowatts(50.0), Hours(1.0));
        assert_abs_diff_eq!(actual.0, 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(battery.residual_energy().0, 47.5, epsilon = 1e-9);
        assert_abs_diff_eq!(battery.state_of_charge(), 0.2375, epsilon = 1e-9);
    }

    #[test]
    fn test_charge_rating_clamp() {
        let mut capped = battery(0.95, 0.95);
        let mut rated = battery(0.95, 0.95);
        let capped_power = capped.apply(Kilowatts(500.0), Hours(1.0));
        let rated_power = rated.apply(Kilowatts(50.0), Hours(1.0));
        assert_abs_diff_eq!(capped_power.0, rated_power.0, epsilon = 1e-9);
        assert_abs_diff_eq!(capped.residual_energy().0, rated.residual_energy().0, epsilon = 1e-9);
    }

    #[test]
    fn test_discharge_rating_clamp() {
        let mut capped = battery(1.0, 0.9);
        let mut rated = battery(1.0, 0.9);
        capped.residual_energy = KilowattHours(150.0);
        rated.residual_energy = KilowattHours(150.0);
        let capped_power = capped.apply(Kilowatts(-1000.0), Hours(1.0));
        let rated_power = rated.apply(Kilowatts(-50.0), Hours(1.0));
        assert_abs_diff_eq!(capped_power.0, -50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(capped_power.0, rated_power.0, epsilon = 1e-9);
        assert_abs_diff_eq!(capped.residual_energy().0, rated.residual_energy().0, epsilon = 1e-9);
    }

    /// Charging caps at the headroom.
    #[test]
    fn test_overflow() {
        let mut battery = battery(1.0, 1.0);
        battery.residual_energy = KilowattHours(190.0);
        let actual = battery.apply(Kilowatts(50.0), Hours(1.0));
        assert_abs_diff_eq!(actual.0, 10.0);
        assert_abs_diff_eq!(battery.residual_energy().0, 200.0);
        assert_abs_diff_eq!(battery.state_of_charge(), 1.0);
    }

    /// Discharging caps at the residual energy.
    #[test]
    fn test_underflow() {
        let mut battery = battery(1.0, 0.5);
        battery.residual_energy = KilowattHours(10.0);
        let actual = battery.apply(Kilowatts(-50.0), Hours(1.0));
        assert_abs_diff_eq!(actual.0, -5.0);
        assert_abs_diff_eq!(battery.residual_energy().0, 0.0);
    }

    #[test]
    fn test_discharge_empty() {
        let mut battery = battery(0.95, 0.95);
        let actual = battery.apply(Kilowatts(-50.0), Hours(1.0));
        assert_abs_diff_eq!(actual.0, 0.0);
        assert_abs_diff_eq!(battery.residual_energy().0, 0.0);
    }

    /// Charging and immediately discharging loses both conversion efficiencies.
    #[test]
    fn test_round_trip_loss() {
        let mut battery = battery(0.9, 0.8);
        let charged = battery.apply(Kilowatts(40.0), Hours(1.0)) * Hours(1.0);
        let stored = battery.residual_energy();
        let returned = -(battery.apply(Kilowatts(-40.0), Hours(1.0)) * Hours(1.0));
        assert_abs_diff_eq!(stored.0, charged.0 * 0.9, epsilon = 1e-9);
        assert_abs_diff_eq!(returned.0, charged.0 * 0.9 * 0.8, epsilon = 1e-9);
        assert!(returned <= stored);
        assert_abs_diff_eq!(battery.residual_energy().0, 0.0);
    }

    #[test]
    fn test_zero_duration() {
        let mut battery = battery(0.95, 0.95);
        assert_abs_diff_eq!(battery.apply(Kilowatts(50.0), Hours::ZERO).0, 0.0);
        assert_abs_diff_eq!(battery.residual_energy().0, 0.0);
    }

    #[test]
    fn test_nan_request() {
        let mut battery = battery(0.95, 0.95);
        assert_abs_diff_eq!(battery.apply(Kilowatts(f64::NAN), Hours(1.0)).0, 0.0);
    }
}
