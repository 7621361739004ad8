mod inspect;
mod simulate;

use std::{fs, path::PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use dess_dispatch::{
    dess::Action,
    policy::{Constant, Idle, Policy, PriceThreshold, Replay},
    prelude::*,
    scenario::Scenario,
    settings::Settings,
};

pub use self::{inspect::inspect, simulate::simulate};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a policy through the scenario and report the costs and rewards.
    #[clap(name = "simulate")]
    Simulate(Box<SimulateArgs>),

    /// Validate the scenario and print its overview.
    #[clap(name = "inspect")]
    Inspect(Box<InspectArgs>),
}

#[derive(Parser)]
pub struct InputArgs {
    /// Scenario JSON: an array of rows, or an object with the rows under `data`.
    #[clap(long = "scenario", env = "DESS_SCENARIO")]
    pub scenario_path: PathBuf,

    /// TOML settings, every section is optional.
    #[clap(long = "settings", env = "DESS_SETTINGS")]
    pub settings_path: Option<PathBuf>,
}

impl InputArgs {
    pub fn read_scenario(&self) -> Result<Scenario> {
        let path = &self.scenario_path;
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read the scenario from `{}`", path.display()))?;
        let scenario = Scenario::from_json(&text)
            .with_context(|| format!("invalid scenario `{}`", path.display()))?;
        info!(n_rows = scenario.len(), currency = scenario.currency(), "loaded the scenario");
        Ok(scenario)
    }

    pub fn read_settings(&self) -> Result<Settings> {
        self.settings_path.as_deref().map_or_else(|| Ok(Settings::default()), Settings::read_from)
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum PolicyKind {
    /// Keep the storage idle.
    Idle,

    /// Repeat `--action` every step.
    Constant,

    /// Release the reserves during price peaks and refill them during price dips.
    PriceThreshold,

    /// Play back the actions from `--actions`.
    Replay,
}

#[derive(Parser)]
pub struct PolicyArgs {
    #[clap(long = "policy", env = "DESS_POLICY", value_enum, default_value = "idle")]
    pub kind: PolicyKind,

    /// Battery, electrolyzer, and fuel cell commands for the constant policy.
    #[clap(
        long,
        num_args = 3,
        value_names = ["BATTERY", "ELECTROLYZER", "FUEL_CELL"],
        allow_negative_numbers = true
    )]
    pub action: Option<Vec<f64>>,

    /// JSON array of recorded actions for the replay policy.
    #[clap(long = "actions", env = "DESS_ACTIONS")]
    pub actions_path: Option<PathBuf>,

    /// Relative deviation from the running mean price that triggers the price threshold policy.
    #[clap(long, env = "DESS_PRICE_MARGIN", default_value = "0.1")]
    pub price_margin: f64,
}

impl PolicyArgs {
    pub fn build(&self) -> Result<Box<dyn Policy>> {
        match self.kind {
            PolicyKind::Idle => Ok(Box::new(Idle)),
            PolicyKind::Constant => {
                let Some([battery, electrolyzer, fuel_cell]) = self.action.as_deref() else {
                    bail!("the constant policy requires `--action` with three commands");
                };
                Ok(Box::new(Constant(Action::from([*battery, *electrolyzer, *fuel_cell]))))
            }
            PolicyKind::PriceThreshold => {
                ensure!(
                    self.price_margin.is_finite() && self.price_margin >= 0.0,
                    "invalid price margin: {}",
                    self.price_margin,
                );
                Ok(Box::new(PriceThreshold::builder().margin(self.price_margin).build()))
            }
            PolicyKind::Replay => {
                let Some(path) = &self.actions_path else {
                    bail!("the replay policy requires `--actions <PATH>`");
                };
                let text = fs::read_to_string(path).with_context(|| {
                    format!("failed to read the actions from `{}`", path.display())
                })?;
                let replay = Replay::from_json(&text).context("failed to parse the actions")?;
                info!(n_actions = replay.len(), "loaded the actions");
                Ok(Box::new(replay))
            }
        }
    }
}

#[derive(Parser)]
pub struct SimulateArgs {
    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub policy: PolicyArgs,

    /// Stop after this many steps, overrides the settings.
    #[clap(long, env = "DESS_MAX_STEPS")]
    pub max_steps: Option<usize>,

    /// Print every step.
    #[clap(long)]
    pub steps: bool,

    /// Write the episode log as JSON.
    #[clap(long = "output", env = "DESS_OUTPUT")]
    pub output_path: Option<PathBuf>,
}

#[derive(Parser)]
pub struct InspectArgs {
    #[clap(flatten)]
    pub input: InputArgs,
}
