use serde::Serialize;

use crate::{
    dess::StorageState,
    quantity::{power::Kilowatts, price::MegawattHourPrice},
    scenario::ScenarioRow,
};

/// What the policy sees before deciding on an action.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct Observation {
    /// Hour of the day, scaled to `0..=1`.
    pub hour: f64,

    /// Day of the week, scaled to `0..=1`.
    pub day_of_week: f64,

    pub demand: Kilowatts,
    pub solar: Kilowatts,
    pub wind: Kilowatts,
    pub grid_price: MegawattHourPrice,
    pub battery_soc: f64,
    pub hydrogen_level: f64,
}

impl Observation {
    pub const N_DIMENSIONS: usize = 8;

    /// Zero observation, emitted once the scenario is exhausted.
    pub const EXHAUSTED: Self = Self {
        hour: 0.0,
        day_of_week: 0.0,
        demand: Kilowatts(0.0),
        solar: Kilowatts(0.0),
        wind: Kilowatts(0.0),
        grid_price: MegawattHourPrice(0.0),
        battery_soc: 0.0,
        hydrogen_level: 0.0,
    };

    pub fn new(row: &ScenarioRow, state: &StorageState) -> Self {
        Self {
            hour: f64::from(row.hour) / 23.0,
            day_of_week: f64::from(row.day_of_week) / 6.0,
            demand: row.demand,
            solar: row.solar,
            wind: row.wind,
            grid_price: row.grid_price,
            battery_soc: state.battery_soc,
            hydrogen_level: state.hydrogen_level,
        }
    }

    #[must_use]
    pub const fn to_array(&self) -> [f64; Self::N_DIMENSIONS] {
        [
            self.hour,
            self.day_of_week,
            self.demand.0,
            self.solar.0,
            self.wind.0,
            self.grid_price.0,
            self.battery_soc,
            self.hydrogen_level,
        ]
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::quantity::{energy::KilowattHours, mass::Kilograms};

    #[test]
    fn test_new() {
        let row = ScenarioRow {
            hour: 23,
            day_of_week: 3,
            demand: Kilowatts(500.0),
            solar: Kilowatts(10.0),
            wind: Kilowatts(20.0),
            grid_price: MegawattHourPrice(350.0),
        };
        let state = StorageState {
            battery_energy: KilowattHours(100.0),
            hydrogen_mass: Kilograms(5.0),
            battery_soc: 0.5,
            hydrogen_level: 0.1,
        };
        let observation = Observation::new(&row, &state).to_array();
        assert_abs_diff_eq!(observation[0], 1.0);
        assert_abs_diff_eq!(observation[1], 0.5);
        assert_abs_diff_eq!(observation[2], 500.0);
        assert_abs_diff_eq!(observation[5], 350.0);
        assert_abs_diff_eq!(observation[6], 0.5);
        assert_abs_diff_eq!(observation[7], 0.1);
    }

    #[test]
    fn test_exhausted() {
        assert_eq!(Observation::EXHAUSTED.to_array(), [0.0; Observation::N_DIMENSIONS]);
        assert_eq!(Observation::EXHAUSTED, Observation::default());
    }
}
