//! Exogenous time series driving the dispatch: demand, on-site generation, and grid price.

mod row;

use serde_json::{Map, Value};

pub use self::row::ScenarioRow;
use crate::{
    error::ScenarioFormatError,
    quantity::{power::Kilowatts, price::MegawattHourPrice},
};

const PRICE_PREFIX: &str = "grid_spot_price_";
const PRICE_SUFFIX: &str = "_per_mwh";

/// Validated, read-only sequence of scenario rows.
#[must_use]
#[derive(Clone, Debug)]
pub struct Scenario {
    rows: Vec<ScenarioRow>,

    /// Lowercase currency code taken from the price field name, for example `brl`.
    currency: String,
}

impl Scenario {
    pub fn try_new(
        rows: Vec<ScenarioRow>,
        currency: impl Into<String>,
    ) -> Result<Self, ScenarioFormatError> {
        if rows.is_empty() {
            return Err(ScenarioFormatError::Empty);
        }
        Ok(Self { rows, currency: currency.into() })
    }

    /// Parse the scenario from JSON.
    ///
    /// Accepts either a plain array of rows, or an object with the rows under `data`
    /// (the generator output format, where `metadata` sits alongside).
    pub fn from_json(text: &str) -> Result<Self, ScenarioFormatError> {
        let document: Value = serde_json::from_str(text)?;
        let rows = match document {
            Value::Array(rows) => rows,
            Value::Object(mut object) => match object.remove("data") {
                Some(Value::Array(rows)) => rows,
                _ => {
                    return Err(ScenarioFormatError::Malformed("`data` must be an array of rows"));
                }
            },
            _ => return Err(ScenarioFormatError::Malformed("expected an array or an object")),
        };
        let Some(first_row) = rows.first() else {
            return Err(ScenarioFormatError::Empty);
        };
        let currency = first_row
            .as_object()
            .and_then(detect_currency)
            .ok_or(ScenarioFormatError::MissingPrice { row: 0 })?;
        let price_field = format!("{PRICE_PREFIX}{currency}{PRICE_SUFFIX}");
        let rows = rows
            .iter()
            .enumerate()
            .map(|(index, row)| parse_row(index, row, &price_field))
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_new(rows, currency)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ScenarioRow> {
        self.rows.get(index)
    }

    #[must_use]
    pub fn rows(&self) -> &[ScenarioRow] {
        &self.rows
    }

    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Mean price over the trailing window, including the current row:
    /// rows `index - window ..= index`, truncated at the start of the scenario.
    ///
    /// Deviations are accumulated from the oldest price in the window,
    /// so a flat price yields exactly that price.
    #[must_use]
    pub fn trailing_mean_price(&self, index: usize, window: usize) -> Option<MegawattHourPrice> {
        let rows = self.rows.get(index.saturating_sub(window)..=index)?;
        let reference = rows.first()?.grid_price.0;
        #[expect(clippy::cast_precision_loss)]
        let n_rows = rows.len() as f64;
        let deviation = rows.iter().map(|row| row.grid_price.0 - reference).sum::<f64>();
        Some(MegawattHourPrice(reference + deviation / n_rows))
    }
}

fn detect_currency(row: &Map<String, Value>) -> Option<String> {
    row.keys().find_map(|key| {
        key.strip_prefix(PRICE_PREFIX)?
            .strip_suffix(PRICE_SUFFIX)
            .filter(|currency| !currency.is_empty())
            .map(str::to_string)
    })
}

fn parse_row(
    index: usize,
    row: &Value,
    price_field: &str,
) -> Result<ScenarioRow, ScenarioFormatError> {
    let Some(row) = row.as_object() else {
        return Err(ScenarioFormatError::Malformed("every row must be an object"));
    };
    let row = RowReader { index, row };
    Ok(ScenarioRow {
        hour: row.integer("hour", 23)?,
        day_of_week: row.integer("day_of_week", 6)?,
        demand: Kilowatts(row.non_negative("industrial_consumption_kw")?),
        solar: Kilowatts(row.non_negative("solar_generation_kw")?),
        wind: Kilowatts(row.non_negative("wind_generation_kw")?),
        grid_price: MegawattHourPrice(row.number(price_field)?),
    })
}

struct RowReader<'a> {
    index: usize,
    row: &'a Map<String, Value>,
}

impl RowReader<'_> {
    fn number(&self, field: &str) -> Result<f64, ScenarioFormatError> {
        let value = self.row.get(field).ok_or_else(|| ScenarioFormatError::MissingField {
            row: self.index,
            field: field.to_string(),
        })?;
        let value = value.as_f64().ok_or_else(|| ScenarioFormatError::NotANumber {
            row: self.index,
            field: field.to_string(),
        })?;
        if value.is_finite() { Ok(value) } else { Err(self.out_of_range(field, value)) }
    }

    fn non_negative(&self, field: &str) -> Result<f64, ScenarioFormatError> {
        let value = self.number(field)?;
        if value >= 0.0 { Ok(value) } else { Err(self.out_of_range(field, value)) }
    }

    fn integer(&self, field: &str, max: u8) -> Result<u8, ScenarioFormatError> {
        let value = self.number(field)?;
        if value.fract() == 0.0 && (0.0..=f64::from(max)).contains(&value) {
            #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let value = value as u8;
            Ok(value)
        } else {
            Err(self.out_of_range(field, value))
        }
    }

    fn out_of_range(&self, field: &str, value: f64) -> ScenarioFormatError {
        ScenarioFormatError::OutOfRange { row: self.index, field: field.to_string(), value }
    }
}
