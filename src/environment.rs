//! Sequential dispatch problem: the controller driven through a scenario, one row per step.

mod config;
mod observation;
pub mod space;
mod step;

use bon::bon;

pub use self::{
    config::EnvironmentConfig,
    observation::Observation,
    step::{Diagnostics, StepResult},
};
use crate::{
    dess::{Action, Controller, DessConfig, StorageState},
    error::{ConfigurationError, StepError},
    prelude::*,
    quantity::{Zero, power::Kilowatts},
    reward::{Evaluator, Outcome, RewardEvaluator},
    scenario::Scenario,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The next scenario row awaits an action.
    Ready,

    /// The episode is over, only [`Environment::reset`] makes progress.
    Done,
}

#[must_use]
pub struct Environment<E = RewardEvaluator> {
    scenario: Scenario,
    config: EnvironmentConfig,
    controller: Controller,
    evaluator: E,

    /// Index of the next scenario row.
    index: usize,

    phase: Phase,
}

#[bon]
impl<E: Evaluator> Environment<E> {
    /// Validate the configuration and start a fresh episode.
    #[builder]
    pub fn new(
        scenario: Scenario,
        #[builder(default)] dess: DessConfig,
        #[builder(default)] config: EnvironmentConfig,
        evaluator: E,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        evaluator.validate()?;
        let controller = Controller::try_new(dess)?;
        Ok(Self { scenario, config, controller, evaluator, index: 0, phase: Phase::Ready })
    }
}

impl<E: Evaluator> Environment<E> {
    pub const fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub const fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    pub const fn dess_config(&self) -> &DessConfig {
        self.controller.config()
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of steps taken since the last reset.
    #[must_use]
    pub const fn n_steps(&self) -> usize {
        self.index
    }

    pub fn storage_state(&self) -> StorageState {
        self.controller.state()
    }

    /// Rewind to the first row with empty storage.
    #[instrument(skip_all)]
    pub fn reset(&mut self) -> (Observation, StorageState) {
        self.controller.reset();
        self.index = 0;
        self.phase = Phase::Ready;
        debug!(n_rows = self.scenario.len(), currency = self.scenario.currency(), "reset");
        (self.observe(), self.controller.state())
    }

    /// Current row together with the storage state, or zeros past the end of the scenario.
    pub fn observe(&self) -> Observation {
        self.scenario.get(self.index).map_or(Observation::EXHAUSTED, |row| {
            Observation::new(row, &self.controller.state())
        })
    }

    /// Apply the action to the current row and advance.
    pub fn step(&mut self, action: Action) -> Result<StepResult, StepError> {
        if self.phase == Phase::Done {
            return Err(StepError::EpisodeFinished);
        }
        let Some(row) = self.scenario.get(self.index).copied() else {
            self.phase = Phase::Done;
            return Err(StepError::EpisodeFinished);
        };
        let trailing_mean_price = self
            .scenario
            .trailing_mean_price(self.index, self.config.moving_average_window)
            .unwrap_or(row.grid_price);
        let time_step = self.controller.config().time_step;

        let operation = self.controller.step(action);
        let on_site_available = row.on_site_generation() - operation.net;
        let deficit = row.demand - on_site_available;
        let grid_draw = deficit.max(Kilowatts::ZERO);
        // The grid is unconstrained, so this stays zero:
        let unmet_demand = (deficit - grid_draw).max(Kilowatts::ZERO);

        let grid_cost = grid_draw * time_step * row.grid_price;
        let operating_cost = operation.net.abs() * self.config.operating_cost_per_kw;
        let total_cost = grid_cost + operating_cost;

        let state = self.controller.state();
        let scores = self.evaluator.evaluate(&Outcome {
            cost: total_cost,
            demand: row.demand,
            on_site_generation: row.on_site_generation(),
            grid_price: row.grid_price,
            trailing_mean_price,
            battery_soc: state.battery_soc,
            hydrogen_level: state.hydrogen_level,
            battery_discharge: operation.battery_discharge() * time_step,
            fuel_cell_output: operation.hydrogen.fuel_cell * time_step,
        });
        let reward = scores.total();
        trace!(
            step = self.index,
            ?operation.net,
            ?grid_draw,
            ?total_cost,
            battery_soc = state.battery_soc,
            hydrogen_level = state.hydrogen_level,
            reward,
            "stepped",
        );

        let diagnostics = Diagnostics {
            step: self.index,
            total_cost,
            grid_cost,
            operating_cost,
            unmet_demand,
            grid_draw,
            on_site_available,
            trailing_mean_price,
            battery_soc: state.battery_soc,
            hydrogen_level: state.hydrogen_level,
            operation,
            scores,
        };

        self.index += 1;
        let terminated = self.index >= self.scenario.len();
        let truncated =
            !terminated && self.config.max_steps.is_some_and(|max_steps| self.index >= max_steps);
        if terminated || truncated {
            self.phase = Phase::Done;
            debug!(n_steps = self.index, terminated, truncated, "episode finished");
        }

        Ok(StepResult { observation: self.observe(), reward, terminated, truncated, diagnostics })
    }
}
