use serde::{Deserialize, Serialize};

/// Normalized control signals, each a fraction of the rated power.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Action {
    /// Battery command, `-1..=1`: negative discharges, positive charges.
    pub battery: f64,

    /// Electrolyzer command, `0..=1`.
    pub electrolyzer: f64,

    /// Fuel cell command, `0..=1`.
    pub fuel_cell: f64,
}

impl Action {
    pub const IDLE: Self = Self { battery: 0.0, electrolyzer: 0.0, fuel_cell: 0.0 };

    pub const LOW: [f64; 3] = [-1.0, 0.0, 0.0];
    pub const HIGH: [f64; 3] = [1.0, 1.0, 1.0];

    /// Clip every command into its bounds. Undefined commands are treated as idle.
    pub fn clipped(self) -> Self {
        Self {
            battery: clip(self.battery, Self::LOW[0], Self::HIGH[0]),
            electrolyzer: clip(self.electrolyzer, Self::LOW[1], Self::HIGH[1]),
            fuel_cell: clip(self.fuel_cell, Self::LOW[2], Self::HIGH[2]),
        }
    }
}

impl From<[f64; 3]> for Action {
    fn from([battery, electrolyzer, fuel_cell]: [f64; 3]) -> Self {
        Self { battery, electrolyzer, fuel_cell }
    }
}

fn clip(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(min, max) }
}
