//! Action sources that drive an episode: fixed baselines and pre-recorded sequences.

use bon::Builder;
use serde::Deserialize;

use crate::{dess::Action, environment::Observation};

pub trait Policy {
    /// Forget everything learnt during the previous episode.
    fn reset(&mut self) {}

    fn act(&mut self, observation: &Observation) -> Action;
}

/// Never touches the storage.
#[derive(Copy, Clone, Debug, Default)]
pub struct Idle;

impl Policy for Idle {
    fn act(&mut self, _observation: &Observation) -> Action {
        Action::IDLE
    }
}

/// Repeats the same action every step.
#[derive(Copy, Clone, Debug)]
pub struct Constant(pub Action);

impl Policy for Constant {
    fn act(&mut self, _observation: &Observation) -> Action {
        self.0
    }
}

/// Plays back a recorded action sequence, then stays idle.
#[must_use]
#[derive(Clone, Debug)]
pub struct Replay {
    actions: Vec<Action>,
    position: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordedAction {
    Array([f64; 3]),
    Object(Action),
}

impl From<RecordedAction> for Action {
    fn from(action: RecordedAction) -> Self {
        match action {
            RecordedAction::Array(array) => Self::from(array),
            RecordedAction::Object(action) => action,
        }
    }
}

impl Replay {
    pub const fn new(actions: Vec<Action>) -> Self {
        Self { actions, position: 0 }
    }

    /// Parse a JSON array of actions, each either `[battery, electrolyzer, fuel_cell]`
    /// or an object with the same field names.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let actions: Vec<RecordedAction> = serde_json::from_str(text)?;
        Ok(Self::new(actions.into_iter().map(Action::from).collect()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Policy for Replay {
    fn reset(&mut self) {
        self.position = 0;
    }

    fn act(&mut self, _observation: &Observation) -> Action {
        let action = self.actions.get(self.position).copied().unwrap_or(Action::IDLE);
        self.position += 1;
        action
    }
}

/// Rule-based baseline: releases both reserves when the grid price is above its running mean
/// by more than the margin, and fills them up when the price is below it by more than the margin.
#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct PriceThreshold {
    /// Fraction of the running mean price.
    #[builder(default = 0.1)]
    margin: f64,

    /// Command applied to every unit when acting.
    #[builder(default = 1.0)]
    intensity: f64,

    #[builder(skip)]
    mean_price: f64,

    #[builder(skip)]
    n_observations: u32,
}

impl PriceThreshold {
    fn update_mean(&mut self, price: f64) {
        self.n_observations += 1;
        self.mean_price += (price - self.mean_price) / f64::from(self.n_observations);
    }
}

impl Policy for PriceThreshold {
    fn reset(&mut self) {
        self.mean_price = 0.0;
        self.n_observations = 0;
    }

    fn act(&mut self, observation: &Observation) -> Action {
        let price = observation.grid_price.0;
        let action = if self.n_observations == 0 {
            Action::IDLE
        } else {
            let band = self.mean_price.abs() * self.margin;
            if price > self.mean_price + band {
                Action::from([-self.intensity, 0.0, self.intensity])
            } else if price < self.mean_price - band {
                Action::from([self.intensity, self.intensity, 0.0])
            } else {
                Action::IDLE
            }
        };
        self.update_mean(price);
        action
    }
}
