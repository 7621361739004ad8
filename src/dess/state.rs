use serde::Serialize;

use crate::quantity::{energy::KilowattHours, mass::Kilograms};

/// Snapshot of both storage reservoirs.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct StorageState {
    #[serde(rename = "battery_energy_kwh")]
    pub battery_energy: KilowattHours,

    #[serde(rename = "hydrogen_mass_kg")]
    pub hydrogen_mass: Kilograms,

    /// Battery state of charge, `0..=1`.
    pub battery_soc: f64,

    /// Hydrogen tank level, `0..=1`.
    pub hydrogen_level: f64,
}
