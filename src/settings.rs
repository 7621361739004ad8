use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    dess::DessConfig,
    environment::EnvironmentConfig,
    prelude::*,
    reward::{Evaluator, RewardEvaluator},
};

/// Complete simulation settings, usually read from a TOML file.
///
/// Every section and every field is optional.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub dess: DessConfig,
    pub environment: EnvironmentConfig,
    pub reward: RewardEvaluator,
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read the settings from `{}`", path.display()))?;
        let settings = Self::from_toml(&text).context("failed to parse the settings")?;
        settings.validate()?;
        debug!("loaded");
        Ok(settings)
    }

    pub fn validate(&self) -> Result {
        self.dess.validate().context("invalid `[dess]` settings")?;
        self.environment.validate().context("invalid `[environment]` settings")?;
        self.reward.validate().context("invalid `[reward]` settings")?;
        Ok(())
    }
}
