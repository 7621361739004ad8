use thiserror::Error;

/// Invalid storage, environment, or reward configuration.
///
/// Raised at construction time, before any stepping occurs.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("`{field}` must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("`{field}` must be within `(0, 1]`, got {value}")]
    EfficiencyOutOfRange { field: &'static str, value: f64 },

    #[error("`{field}` must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("moving average window must span at least one step")]
    EmptyWindow,
}

/// Malformed or incomplete exogenous scenario data.
#[derive(Debug, Error)]
pub enum ScenarioFormatError {
    #[error("failed to parse the scenario")]
    Json(#[from] serde_json::Error),

    #[error("the scenario contains no rows")]
    Empty,

    #[error("malformed scenario: {0}")]
    Malformed(&'static str),

    #[error("row #{row}: missing field `{field}`")]
    MissingField { row: usize, field: String },

    #[error("row #{row}: field `{field}` is not a number")]
    NotANumber { row: usize, field: String },

    #[error("row #{row}: field `{field}` is out of range: {value}")]
    OutOfRange { row: usize, field: String, value: f64 },

    #[error("row #{row}: missing `grid_spot_price_<currency>_per_mwh` field")]
    MissingPrice { row: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StepError {
    #[error("the episode is over, reset the environment first")]
    EpisodeFinished,
}
