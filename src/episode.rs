//! Episode driver and its typed per-step log.

use serde::Serialize;

use crate::{
    dess::Action,
    environment::{Diagnostics, Environment},
    error::StepError,
    policy::Policy,
    prelude::*,
    quantity::{Zero, cost::Cost, energy::KilowattHours, power::Kilowatts, time::Hours},
    reward::{Evaluator, Scores},
    scenario::ScenarioRow,
};

/// Everything known about a single step.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct StepRecord {
    #[serde(flatten)]
    pub row: ScenarioRow,

    /// Action as the policy returned it, before clipping.
    pub action: Action,

    pub reward: f64,

    #[serde(flatten)]
    pub diagnostics: Diagnostics,
}

/// Append-only log of an episode, indexed by step.
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct EpisodeLog {
    #[serde(rename = "time_step_h")]
    time_step: Hours,

    terminated: bool,
    truncated: bool,
    records: Vec<StepRecord>,
}

impl EpisodeLog {
    pub const fn new(time_step: Hours) -> Self {
        Self { time_step, terminated: false, truncated: false, records: Vec::new() }
    }

    pub fn push(&mut self, record: StepRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, step: usize) -> Option<&StepRecord> {
        self.records.get(step)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepRecord> {
        self.records.iter()
    }

    /// Running total of the step costs.
    pub fn cumulative_cost(&self) -> impl Iterator<Item = Cost> {
        self.records.iter().scan(Cost::ZERO, |total, record| {
            *total += record.diagnostics.total_cost;
            Some(*total)
        })
    }

    pub fn summary(&self) -> EpisodeSummary {
        let mut summary = EpisodeSummary {
            n_steps: self.records.len(),
            terminated: self.terminated,
            truncated: self.truncated,
            ..EpisodeSummary::default()
        };
        if self.records.is_empty() {
            return summary;
        }
        let mut covered_demand = Kilowatts::ZERO;
        let mut total_demand = Kilowatts::ZERO;
        let mut soc_sum = 0.0;
        let mut hydrogen_level_sum = 0.0;
        for record in &self.records {
            let diagnostics = &record.diagnostics;
            summary.total_cost += diagnostics.total_cost;
            summary.grid_cost += diagnostics.grid_cost;
            summary.operating_cost += diagnostics.operating_cost;
            summary.grid_energy += diagnostics.grid_draw * self.time_step;
            summary.unmet_energy += diagnostics.unmet_demand * self.time_step;
            summary.total_reward += record.reward;
            summary.scores += diagnostics.scores;
            covered_demand += record.row.on_site_generation().min(record.row.demand);
            total_demand += record.row.demand;
            soc_sum += diagnostics.battery_soc;
            hydrogen_level_sum += diagnostics.hydrogen_level;
        }
        #[expect(clippy::cast_precision_loss)]
        let n_steps = self.records.len() as f64;
        summary.mean_battery_soc = soc_sum / n_steps;
        summary.mean_hydrogen_level = hydrogen_level_sum / n_steps;
        if total_demand > Kilowatts::ZERO {
            summary.renewable_share = covered_demand / total_demand;
        }
        summary
    }
}

impl<'a> IntoIterator for &'a EpisodeLog {
    type Item = &'a StepRecord;
    type IntoIter = std::slice::Iter<'a, StepRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Episode totals and means.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct EpisodeSummary {
    pub n_steps: usize,
    pub terminated: bool,
    pub truncated: bool,
    pub total_cost: Cost,
    pub grid_cost: Cost,
    pub operating_cost: Cost,
    pub grid_energy: KilowattHours,
    pub unmet_energy: KilowattHours,

    /// Share of the total demand covered by on-site renewables.
    pub renewable_share: f64,

    pub mean_battery_soc: f64,
    pub mean_hydrogen_level: f64,
    pub total_reward: f64,
    pub scores: Scores,
}

/// Reset the environment and the policy, and step until the episode is over.
#[instrument(skip_all)]
pub fn run_episode<E, P>(
    environment: &mut Environment<E>,
    policy: &mut P,
) -> Result<EpisodeLog, StepError>
where
    E: Evaluator,
    P: Policy + ?Sized,
{
    let (mut observation, _) = environment.reset();
    policy.reset();
    let mut log = EpisodeLog::new(environment.dess_config().time_step);
    while let Some(row) = environment.scenario().get(environment.n_steps()).copied() {
        let action = policy.act(&observation);
        let result = environment.step(action)?;
        log.push(StepRecord {
            row,
            action,
            reward: result.reward,
            diagnostics: result.diagnostics,
        });
        observation = result.observation;
        if result.is_done() {
            log.terminated = result.terminated;
            log.truncated = result.truncated;
            break;
        }
    }
    info!(n_steps = log.len(), total_cost = ?log.summary().total_cost, "episode completed");
    Ok(log)
}
