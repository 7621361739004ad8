use bon::Builder;
use serde::Serialize;

use crate::{
    dess::config::DessConfig,
    quantity::{
        Zero,
        mass::{Kilograms, KilogramsPerKilowattHour, KilowattHoursPerKilogram},
        power::Kilowatts,
        time::Hours,
    },
};

/// Electrolyzer and fuel cell sharing a single hydrogen tank.
#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct HydrogenPath {
    electrolyzer_capacity: Kilowatts,
    electrolyzer_efficiency: KilowattHoursPerKilogram,
    tank_capacity: Kilograms,
    fuel_cell_capacity: Kilowatts,
    fuel_cell_efficiency: KilogramsPerKilowattHour,

    #[builder(default = Kilograms::ZERO)]
    mass: Kilograms,
}

/// Actual conversion within a single step.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct HydrogenFlow {
    /// Power actually consumed by the electrolyzer.
    ///
    /// Curtailed by the free tank space, the surplus request is neither drawn nor billed.
    pub electrolyzer: Kilowatts,

    /// Power actually produced by the fuel cell.
    pub fuel_cell: Kilowatts,

    pub produced: Kilograms,
    pub consumed: Kilograms,
}

impl HydrogenPath {
    /// Empty tank with the configured ratings.
    pub fn from_config(config: &DessConfig) -> Self {
        Self::builder()
            .electrolyzer_capacity(config.electrolyzer_capacity)
            .electrolyzer_efficiency(config.electrolyzer_efficiency)
            .tank_capacity(config.hydrogen_capacity)
            .fuel_cell_capacity(config.fuel_cell_capacity)
            .fuel_cell_efficiency(config.fuel_cell_efficiency)
            .build()
    }

    pub const fn mass(&self) -> Kilograms {
        self.mass
    }

    /// Tank fill level, `0..=1`.
    pub fn level(&self) -> f64 {
        if self.tank_capacity > Kilograms::ZERO {
            (self.mass / self.tank_capacity).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Run both converters for the step and update the tank.
    ///
    /// The converters are independent: both see the tank content from the start of the step.
    /// Electrolysis is capped by the tank headroom, the surplus power is not drawn.
    /// The fuel cell output is scaled down when the tank cannot cover the consumption.
    ///
    /// Nothing prevents electrolysis and fuel cell generation within the same step.
    pub fn apply(
        &mut self,
        electrolyzer_power: Kilowatts,
        fuel_cell_power: Kilowatts,
        for_: Hours,
    ) -> HydrogenFlow {
        if for_ <= Hours::ZERO {
            return HydrogenFlow::default();
        }
        let initial_mass = self.mass;
        let (electrolyzer, produced) = self.electrolyze(electrolyzer_power, initial_mass, for_);
        let (fuel_cell, consumed) = self.burn(fuel_cell_power, initial_mass, for_);
        self.mass =
            (initial_mass + produced - consumed).max(Kilograms::ZERO).min(self.tank_capacity);
        HydrogenFlow { electrolyzer, fuel_cell, produced, consumed }
    }

    fn electrolyze(
        &self,
        requested_power: Kilowatts,
        initial_mass: Kilograms,
        for_: Hours,
    ) -> (Kilowatts, Kilograms) {
        let efficiency = self.electrolyzer_efficiency;
        if efficiency <= KilowattHoursPerKilogram::ZERO || !requested_power.is_finite() {
            return (Kilowatts::ZERO, Kilograms::ZERO);
        }
        let power = requested_power.max(Kilowatts::ZERO).min(self.electrolyzer_capacity);
        let headroom = (self.tank_capacity - initial_mass).max(Kilograms::ZERO);
        let produced = (power * for_ / efficiency).min(headroom);
        (produced * efficiency / for_, produced)
    }

    fn burn(
        &self,
        requested_power: Kilowatts,
        initial_mass: Kilograms,
        for_: Hours,
    ) -> (Kilowatts, Kilograms) {
        let efficiency = self.fuel_cell_efficiency;
        if efficiency <= KilogramsPerKilowattHour::ZERO || !requested_power.is_finite() {
            return (Kilowatts::ZERO, Kilograms::ZERO);
        }
        let power = requested_power.max(Kilowatts::ZERO).min(self.fuel_cell_capacity);
        let consumption = power * for_ * efficiency;
        if consumption > initial_mass {
            // Not enough hydrogen, scale the output down to whatever the tank holds:
            (power * (initial_mass / consumption), initial_mass)
        } else {
            (power, consumption)
        }
    }
}
