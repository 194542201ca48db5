use chrono::NaiveDate;

use crate::core::{DateDataset, DateKey, Observation};

/// Returns data-bearing dates inside an inclusive day window, oldest first.
///
/// Reversed bounds are swapped.
#[must_use]
pub fn dates_in_window(
    dataset: &DateDataset,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<(&DateKey, &[Observation])> {
    let (first, last) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };

    let mut window: Vec<(&DateKey, &[Observation])> = dataset
        .iter()
        .filter(|(key, rows)| !rows.is_empty() && key.day() >= first && key.day() <= last)
        .collect();
    window.sort_by(|a, b| a.0.cmp(b.0));
    window
}
