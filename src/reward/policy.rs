use serde::{Deserialize, Serialize};

use crate::reward::Outcome;

/// Score granted while the level stays strictly inside `(above, below)`.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Band {
    pub above: f64,
    pub below: f64,
    pub score: f64,
}

impl Band {
    #[must_use]
    pub fn score(&self, level: f64) -> f64 {
        if self.above < level && level < self.below { self.score } else { 0.0 }
    }
}

/// Score granted once the level crosses `level`.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Threshold {
    pub level: f64,
    pub score: f64,
}

impl Threshold {
    #[must_use]
    pub fn below(&self, level: f64) -> f64 {
        if level < self.level { self.score } else { 0.0 }
    }

    #[must_use]
    pub fn above(&self, level: f64) -> f64 {
        if level > self.level { self.score } else { 0.0 }
    }
}

/// Scores of a single reservoir fill level. All matching entries add up.
///
/// Omitted lists are empty, so a configured reservoir section replaces the whole default table.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReservoirPolicy {
    pub healthy: Vec<Band>,

    /// Usually negative.
    pub depleted: Vec<Threshold>,

    /// Usually negative.
    pub saturated: Vec<Threshold>,
}

impl ReservoirPolicy {
    #[must_use]
    pub fn battery() -> Self {
        Self {
            healthy: vec![
                Band { above: 0.3, below: 0.8, score: 5.0 },
                Band { above: 0.2, below: 0.8, score: 3.0 },
            ],
            depleted: vec![
                Threshold { level: 0.05, score: -10.0 },
                Threshold { level: 0.1, score: -4.0 },
            ],
            saturated: vec![
                Threshold { level: 0.95, score: -2.0 },
                Threshold { level: 0.9, score: -2.0 },
            ],
        }
    }

    #[must_use]
    pub fn hydrogen() -> Self {
        Self {
            healthy: vec![Band { above: 0.2, below: 0.8, score: 3.0 }],
            depleted: vec![Threshold { level: 0.1, score: -6.0 }],
            saturated: vec![Threshold { level: 0.9, score: -2.0 }],
        }
    }

    #[must_use]
    pub fn score(&self, level: f64) -> f64 {
        let healthy: f64 = self.healthy.iter().map(|band| band.score(level)).sum();
        let depleted: f64 = self.depleted.iter().map(|threshold| threshold.below(level)).sum();
        let saturated: f64 = self.saturated.iter().map(|threshold| threshold.above(level)).sum();
        healthy + depleted + saturated
    }
}

/// Rewards releasing the reserves while the grid price sits above its trailing mean.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrategicPolicy {
    /// Per kilowatt-hour actually discharged from the battery during a price peak.
    pub battery_discharge_bonus: f64,

    /// Per kilowatt-hour actually produced by the fuel cell during a price peak.
    pub fuel_cell_bonus: f64,

    /// Applied during a price peak when neither reserve is used.
    pub idle_reserves_penalty: f64,

    /// Applied outside of a price peak when the hydrogen level is above the threshold.
    pub surplus_hydrogen: Threshold,
}

impl Default for StrategicPolicy {
    fn default() -> Self {
        Self {
            battery_discharge_bonus: 8.0,
            fuel_cell_bonus: 11.0,
            idle_reserves_penalty: -10.0,
            surplus_hydrogen: Threshold { level: 0.5, score: -2.0 },
        }
    }
}

impl StrategicPolicy {
    #[must_use]
    pub fn score(&self, outcome: &Outcome) -> f64 {
        if outcome.is_price_peak() {
            let discharge = outcome.battery_discharge.0;
            let fuel_cell = outcome.fuel_cell_output.0;
            let mut score =
                discharge * self.battery_discharge_bonus + fuel_cell * self.fuel_cell_bonus;
            if discharge <= 0.0 && fuel_cell <= 0.0 {
                score += self.idle_reserves_penalty;
            }
            score
        } else {
            self.surplus_hydrogen.above(outcome.hydrogen_level)
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SustainabilityPolicy {
    /// Multiplier of the renewable share of the demand, `0..=1`.
    pub per_share: f64,

    pub high_share: Threshold,
}

impl Default for SustainabilityPolicy {
    fn default() -> Self {
        Self { per_share: 2.0, high_share: Threshold { level: 0.8, score: 3.0 } }
    }
}

impl SustainabilityPolicy {
    #[must_use]
    pub fn score(&self, outcome: &Outcome) -> f64 {
        let share = outcome.renewable_share();
        share * self.per_share + self.high_share.above(share)
    }
}

/// Complete bonus and penalty table of the evaluator.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RewardPolicy {
    pub battery: ReservoirPolicy,
    pub hydrogen: ReservoirPolicy,
    pub strategic: StrategicPolicy,
    pub sustainability: SustainabilityPolicy,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            battery: ReservoirPolicy::battery(),
            hydrogen: ReservoirPolicy::hydrogen(),
            strategic: StrategicPolicy::default(),
            sustainability: SustainabilityPolicy::default(),
        }
    }
}

impl RewardPolicy {
    /// Unweighted resilience score.
    #[must_use]
    pub fn resilience(&self, outcome: &Outcome) -> f64 {
        self.battery.score(outcome.battery_soc)
            + self.hydrogen.score(outcome.hydrogen_level)
            + self.strategic.score(outcome)
    }

    /// Unweighted sustainability score.
    #[must_use]
    pub fn sustainability(&self, outcome: &Outcome) -> f64 {
        self.sustainability.score(outcome)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_band_is_open() {
        let band = Band { above: 0.2, below: 0.8, score: 3.0 };
        assert_abs_diff_eq!(band.score(0.2), 0.0);
        assert_abs_diff_eq!(band.score(0.5), 3.0);
        assert_abs_diff_eq!(band.score(0.8), 0.0);
    }

    #[test]
    fn test_battery_levels() {
        let policy = ReservoirPolicy::battery();
        assert_abs_diff_eq!(policy.score(0.0), -14.0);
        assert_abs_diff_eq!(policy.score(0.07), -4.0);
        assert_abs_diff_eq!(policy.score(0.25), 3.0);
        assert_abs_diff_eq!(policy.score(0.5), 8.0);
        assert_abs_diff_eq!(policy.score(0.85), 0.0);
        assert_abs_diff_eq!(policy.score(0.92), -2.0);
        assert_abs_diff_eq!(policy.score(1.0), -4.0);
    }

    #[test]
    fn test_hydrogen_levels() {
        let policy = ReservoirPolicy::hydrogen();
        assert_abs_diff_eq!(policy.score(0.0), -6.0);
        assert_abs_diff_eq!(policy.score(0.5), 3.0);
        assert_abs_diff_eq!(policy.score(1.0), -2.0);
    }

    #[test]
    fn test_deserialize_override() {
        let policy: RewardPolicy = toml::from_str(
            r"
            [strategic]
            fuel_cell_bonus = 1.5

            [[hydrogen.healthy]]
            above = 0.4
            below = 0.6
            score = 1.0
            ",
        )
        .unwrap();
        assert_abs_diff_eq!(policy.strategic.fuel_cell_bonus, 1.5);
        assert_abs_diff_eq!(policy.strategic.battery_discharge_bonus, 8.0);
        assert_eq!(policy.hydrogen.healthy, vec![Band { above: 0.4, below: 0.6, score: 1.0 }]);
        assert!(policy.hydrogen.depleted.is_empty());
        // Omitted sections fall back to the defaults:
        assert_eq!(policy.battery, ReservoirPolicy::battery());
    }
}
