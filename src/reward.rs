//! Multi-objective scoring of a dispatch step: cost, resilience, and sustainability.

mod policy;
mod weights;

use bon::Builder;
use derive_more::{Add, AddAssign, Sum};
use serde::{Deserialize, Serialize};

pub use self::{
    policy::{Band, ReservoirPolicy, RewardPolicy, StrategicPolicy, SustainabilityPolicy, Threshold},
    weights::RewardWeights,
};
use crate::{
    error::ConfigurationError,
    quantity::{
        Zero,
        cost::Cost,
        energy::KilowattHours,
        power::Kilowatts,
        price::MegawattHourPrice,
    },
};

/// Everything the evaluator may look at after a step has been applied.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Outcome {
    pub cost: Cost,
    pub demand: Kilowatts,

    /// Solar and wind.
    pub on_site_generation: Kilowatts,

    pub grid_price: MegawattHourPrice,
    pub trailing_mean_price: MegawattHourPrice,

    /// State of charge after the step.
    pub battery_soc: f64,

    /// Tank level after the step.
    pub hydrogen_level: f64,

    /// Energy actually delivered by the battery during the step.
    pub battery_discharge: KilowattHours,

    /// Energy actually delivered by the fuel cell during the step.
    pub fuel_cell_output: KilowattHours,
}

impl Outcome {
    #[must_use]
    pub fn is_price_peak(&self) -> bool {
        self.grid_price > self.trailing_mean_price
    }

    /// Share of the demand covered by on-site renewables, `0..=1`.
    ///
    /// Zero when there is no demand.
    #[must_use]
    pub fn renewable_share(&self) -> f64 {
        if self.demand > Kilowatts::ZERO {
            self.on_site_generation.min(self.demand).max(Kilowatts::ZERO) / self.demand
        } else {
            0.0
        }
    }
}

/// Weighted reward components. The reward is their sum.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Add, AddAssign, Sum, Serialize)]
pub struct Scores {
    pub cost: f64,
    pub resilience: f64,
    pub sustainability: f64,
}

impl Scores {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.cost + self.resilience + self.sustainability
    }
}

/// Turns a step outcome into reward components.
pub trait Evaluator {
    fn validate(&self) -> Result<(), ConfigurationError> {
        Ok(())
    }

    fn evaluate(&self, outcome: &Outcome) -> Scores;
}

/// Weighted sum over the configurable bonus and penalty table.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Builder, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RewardEvaluator {
    #[builder(default)]
    pub weights: RewardWeights,

    #[builder(default)]
    pub policy: RewardPolicy,
}

impl Evaluator for RewardEvaluator {
    fn validate(&self) -> Result<(), ConfigurationError> {
        self.weights.validate()
    }

    fn evaluate(&self, outcome: &Outcome) -> Scores {
        Scores {
            cost: -self.weights.cost * outcome.cost.0,
            resilience: self.weights.resilience * self.policy.resilience(outcome),
            sustainability: self.weights.sustainability * self.policy.sustainability(outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    /// Grid-only step at the trailing mean price with healthy reservoirs.
    fn outcome() -> Outcome {
        Outcome {
            cost: Cost(10.0),
            demand: Kilowatts(1000.0),
            on_site_generation: Kilowatts::ZERO,
            grid_price: MegawattHourPrice(400.0),
            trailing_mean_price: MegawattHourPrice(400.0),
            battery_soc: 0.5,
            hydrogen_level: 0.5,
            battery_discharge: KilowattHours::ZERO,
            fuel_cell_output: KilowattHours::ZERO,
        }
    }

    #[test]
    fn test_weighted_sum() {
        let scores = RewardEvaluator::default().evaluate(&outcome());
        assert_abs_diff_eq!(scores.cost, -10.0);
        // Both battery bands and the hydrogen band:
        assert_abs_diff_eq!(scores.resilience, 20.0 * 11.0);
        assert_abs_diff_eq!(scores.sustainability, 0.0);
        assert_abs_diff_eq!(scores.total(), 210.0);
    }

    #[test]
    fn test_empty_reservoirs() {
        let outcome = Outcome { battery_soc: 0.0, hydrogen_level: 0.0, ..outcome() };
        let scores = RewardEvaluator::default().evaluate(&outcome);
        assert_abs_diff_eq!(scores.resilience, 20.0 * (-14.0 - 6.0));
    }

    #[test]
    fn test_surplus_hydrogen_at_low_price() {
        let outcome = Outcome { hydrogen_level: 0.6, ..outcome() };
        let scores = RewardEvaluator::default().evaluate(&outcome);
        assert_abs_diff_eq!(scores.resilience, 20.0 * (8.0 + 3.0 - 2.0));
    }

    #[test]
    fn test_price_peak_bonuses() {
        let outcome = Outcome {
            grid_price: MegawattHourPrice(800.0),
            battery_discharge: KilowattHours(10.0),
            fuel_cell_output: KilowattHours(2.0),
            ..outcome()
        };
        let scores = RewardEvaluator::default().evaluate(&outcome);
        assert_abs_diff_eq!(scores.resilience, 20.0 * (8.0 + 3.0 + 80.0 + 22.0));
    }

    #[test]
    fn test_idle_reserves_at_price_peak() {
        let outcome = Outcome { grid_price: MegawattHourPrice(800.0), ..outcome() };
        let scores = RewardEvaluator::default().evaluate(&outcome);
        assert_abs_diff_eq!(scores.resilience, 20.0 * (8.0 + 3.0 - 10.0));
    }

    #[test]
    fn test_renewable_share() {
        let partial = Outcome { on_site_generation: Kilowatts(500.0), ..outcome() };
        assert_abs_diff_eq!(partial.renewable_share(), 0.5);
        let scores = RewardEvaluator::default().evaluate(&partial);
        assert_abs_diff_eq!(scores.sustainability, 10.0);

        let surplus = Outcome { on_site_generation: Kilowatts(1500.0), ..outcome() };
        assert_abs_diff_eq!(surplus.renewable_share(), 1.0);
        let scores = RewardEvaluator::default().evaluate(&surplus);
        assert_abs_diff_eq!(scores.sustainability, 10.0 * (2.0 + 3.0));

        let idle = Outcome { demand: Kilowatts::ZERO, ..surplus };
        assert_abs_diff_eq!(idle.renewable_share(), 0.0);
    }

    #[test]
    fn test_custom_weights() {
        let evaluator = RewardEvaluator::builder()
            .weights(RewardWeights { cost: 2.0, resilience: 0.0, sustainability: 0.0 })
            .build();
        let scores = evaluator.evaluate(&outcome());
        assert_abs_diff_eq!(scores.total(), -20.0);
    }

    #[test]
    fn test_scores_sum() {
        let scores = [
            Scores { cost: -1.0, resilience: 2.0, sustainability: 3.0 },
            Scores { cost: -2.0, resilience: 1.0, sustainability: 0.0 },
        ];
        let total: Scores = scores.into_iter().sum();
        assert_eq!(total, Scores { cost: -3.0, resilience: 3.0, sustainability: 3.0 });
    }
}
