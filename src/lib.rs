//! Dispatch simulation of a battery and hydrogen energy storage system at an industrial site.
//!
//! The [`environment::Environment`] walks through a [`scenario::Scenario`] one row per step,
//! applies an [`dess::Action`] through the [`dess::Controller`], settles the shortfall with
//! the grid, and scores the step with a [`reward::Evaluator`].

pub mod dess;
pub mod environment;
pub mod episode;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod quantity;
pub mod reward;
pub mod scenario;
pub mod settings;
