use serde::Serialize;

use crate::quantity::{power::Kilowatts, price::MegawattHourPrice};

/// Exogenous conditions for a single epoch.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ScenarioRow {
    /// Hour of day, `0..=23`.
    pub hour: u8,

    /// Day of week, `0..=6`.
    pub day_of_week: u8,

    #[serde(rename = "industrial_consumption_kw")]
    pub demand: Kilowatts,

    #[serde(rename = "solar_generation_kw")]
    pub solar: Kilowatts,

    #[serde(rename = "wind_generation_kw")]
    pub wind: Kilowatts,

    pub grid_price: MegawattHourPrice,
}

impl ScenarioRow {
    pub fn on_site_generation(&self) -> Kilowatts {
        self.solar + self.wind
    }
}
