use serde::Serialize;

use crate::{
    dess::Operation,
    environment::Observation,
    quantity::{cost::Cost, power::Kilowatts, price::MegawattHourPrice},
    reward::Scores,
};

/// Fixed-shape per-step breakdown of the energy balance, cost, and reward.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Diagnostics {
    /// Index of the scenario row the step was applied to.
    pub step: usize,

    pub total_cost: Cost,
    pub grid_cost: Cost,
    pub operating_cost: Cost,

    #[serde(rename = "unmet_demand_kw")]
    pub unmet_demand: Kilowatts,

    #[serde(rename = "power_from_grid_kw")]
    pub grid_draw: Kilowatts,

    /// On-site generation less what the storage took, or plus what it supplied.
    #[serde(rename = "on_site_available_kw")]
    pub on_site_available: Kilowatts,

    pub trailing_mean_price: MegawattHourPrice,
    pub battery_soc: f64,
    pub hydrogen_level: f64,
    pub operation: Operation,
    pub scores: Scores,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct StepResult {
    /// Observation of the next row.
    pub observation: Observation,

    pub reward: f64,

    /// The scenario is exhausted.
    pub terminated: bool,

    /// The step limit is reached before the scenario is exhausted.
    pub truncated: bool,

    pub diagnostics: Diagnostics,
}

impl StepResult {
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}
