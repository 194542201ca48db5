use chrono::{Months, NaiveDate};
use serde::Serialize;

use crate::core::{DateDataset, DateKey, dates_in_window};
use crate::error::{CalendarError, CalendarResult};

/// Calendar-grid marker for one data-bearing date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayMarker {
    pub key: DateKey,
    pub title: String,
    pub observation_count: usize,
}

impl DayMarker {
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.key.day()
    }
}

/// Styling class of a single grid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DayHighlight {
    Plain,
    HasData,
    /// The day whose detail view is open. Always has data.
    Selected,
}

/// Builds one marker per data-bearing date, oldest first.
#[must_use]
pub fn markers_for_dataset(dataset: &DateDataset, title: &str) -> Vec<DayMarker> {
    let mut markers: Vec<DayMarker> = dataset
        .iter()
        .filter(|(_, rows)| !rows.is_empty())
        .map(|(key, rows)| marker(key, rows.len(), title))
        .collect();
    markers.sort_by(|a, b| a.key.cmp(&b.key));
    markers
}

/// Builds markers for the data-bearing dates of one month.
pub fn markers_in_month(
    dataset: &DateDataset,
    year: i32,
    month: u32,
    title: &str,
) -> CalendarResult<Vec<DayMarker>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        CalendarError::InvalidData(format!("month {month} of year {year} is not representable"))
    })?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);

    Ok(dates_in_window(dataset, first, last)
        .into_iter()
        .map(|(key, rows)| marker(key, rows.len(), title))
        .collect())
}

#[must_use]
pub fn day_highlight(
    dataset: &DateDataset,
    selected: Option<&DateKey>,
    key: &DateKey,
) -> DayHighlight {
    if !dataset.has(key) {
        DayHighlight::Plain
    } else if selected == Some(key) {
        DayHighlight::Selected
    } else {
        DayHighlight::HasData
    }
}

fn marker(key: &DateKey, observation_count: usize, title: &str) -> DayMarker {
    DayMarker {
        key: key.clone(),
        title: title.to_owned(),
        observation_count,
    }
}
