use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{CalendarError, CalendarResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> CalendarResult<f64> {
    value.to_f64().ok_or_else(|| {
        CalendarError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Labels must carry at least one non-whitespace character.
#[must_use]
pub fn is_blank_label(label: &str) -> bool {
    label.trim().is_empty()
}
