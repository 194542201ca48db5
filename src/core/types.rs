use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::decimal_to_f64;
use crate::error::CalendarResult;

/// One labeled numeric data point recorded for a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub label: String,
    pub value: f64,
}

impl Observation {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    pub fn from_decimal(label: impl Into<String>, value: Decimal) -> CalendarResult<Self> {
        let label = label.into();
        let value = decimal_to_f64(value, &label)?;
        Ok(Self { label, value })
    }
}

/// Bar-chart row in the `name`/`value` shape chart renderers consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    pub name: String,
    pub value: f64,
}

impl From<&Observation> for ChartRow {
    fn from(observation: &Observation) -> Self {
        Self {
            name: observation.label.clone(),
            value: observation.value,
        }
    }
}

/// Reshapes observations into chart rows, keeping their order.
#[must_use]
pub fn chart_rows(observations: &[Observation]) -> Vec<ChartRow> {
    observations.iter().map(ChartRow::from).collect()
}
