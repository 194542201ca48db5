use std::fmt;

use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::core::{ChartRow, DatasetSource, DateDataset, Observation, chart_rows};
use crate::error::{CalendarError, CalendarResult, LoadError};
use crate::interaction::SelectionMode;

use super::SelectionController;
use super::controller::live_key;

pub const SELECTION_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable view of the controller for hosts that mirror it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    pub mode: SelectionMode,
    pub selected_key: Option<String>,
    pub detail_visible: bool,
    pub detail_title: Option<String>,
    pub rows: Vec<ChartRow>,
    pub dates_with_data: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: SelectionSnapshot,
}

impl SelectionSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> CalendarResult<String> {
        let payload = SelectionSnapshotJsonContractV1 {
            schema_version: SELECTION_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            CalendarError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    pub fn from_json_compat_str(input: &str) -> CalendarResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<SelectionSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: SelectionSnapshotJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                CalendarError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
            })?;
        if payload.schema_version != SELECTION_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(CalendarError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl DatasetSource {
    /// Parses a dataset object keyed by date.
    ///
    /// Rows may be single-field objects (`{"user_1": 1}`) or labeled objects
    /// (`{"label": "user_1", "value": 1}`). Keys are validated later, when the
    /// source is swapped in.
    pub fn from_json_str(input: &str) -> CalendarResult<Self> {
        let SourceEntries(entries) = serde_json::from_str(input)
            .map_err(|e| LoadError::MalformedSource(e.to_string()))?;

        let mut source = DatasetSource::new();
        for (key, rows) in entries {
            let rows = rows
                .into_iter()
                .enumerate()
                .map(|(index, row)| decode_row(&key, index, row))
                .collect::<Result<Vec<_>, _>>()?;
            source.push(key, rows);
        }
        Ok(source)
    }
}

impl DateDataset {
    /// Writes the dataset with labeled rows, in insertion order.
    pub fn to_json_pretty(&self) -> CalendarResult<String> {
        let payload: IndexMap<&str, &[Observation]> = self
            .iter()
            .map(|(key, rows)| (key.as_str(), rows))
            .collect();
        serde_json::to_string_pretty(&payload)
            .map_err(|e| CalendarError::InvalidData(format!("failed to serialize dataset: {e}")))
    }
}

impl SelectionController {
    /// Parses, validates and swaps in a JSON dataset, all or nothing.
    pub fn load_data_json(&mut self, input: &str) -> CalendarResult<()> {
        let source = DatasetSource::from_json_str(input)?;
        self.load_data(source)
    }

    #[must_use]
    pub fn snapshot(&self) -> SelectionSnapshot {
        let dataset = self.store.snapshot();
        let key = live_key(&self.selection, &dataset);
        SelectionSnapshot {
            mode: if key.is_some() {
                SelectionMode::Showing
            } else {
                SelectionMode::Idle
            },
            selected_key: key.map(ToString::to_string),
            detail_visible: key.is_some(),
            detail_title: key.map(|key| self.config.detail_title(key)),
            rows: key
                .map(|key| chart_rows(dataset.rows_for(key)))
                .unwrap_or_default(),
            dates_with_data: dataset.dates_with_data(),
        }
    }

    pub fn snapshot_json_contract_v1_pretty(&self) -> CalendarResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }

    /// Chart rows of the shown date as `[{"name": .., "value": ..}]`.
    pub fn chart_rows_json_pretty(&self) -> CalendarResult<String> {
        serde_json::to_string_pretty(&self.current_chart_rows())
            .map_err(|e| CalendarError::InvalidData(format!("failed to serialize chart rows: {e}")))
    }
}

fn decode_row(key: &str, index: usize, row: JsonValue) -> Result<Observation, LoadError> {
    let malformed = |reason: String| LoadError::MalformedObservation {
        key: key.to_owned(),
        index,
        reason,
    };

    let mut fields = match row {
        JsonValue::Object(fields) => fields,
        other => return Err(malformed(format!("expected an object, found `{other}`"))),
    };

    if fields.len() == 2 && fields.contains_key("label") && fields.contains_key("value") {
        let label = match fields.remove("label") {
            Some(JsonValue::String(label)) => label,
            _ => return Err(malformed("`label` must be a string".to_owned())),
        };
        let value = fields.remove("value").unwrap_or(JsonValue::Null);
        return numeric(key, index, label, &value);
    }

    if fields.len() != 1 {
        return Err(malformed(format!(
            "expected one `label: value` field, found {} fields",
            fields.len()
        )));
    }
    match fields.into_iter().next() {
        Some((label, value)) => numeric(key, index, label, &value),
        None => Err(malformed("empty object".to_owned())),
    }
}

fn numeric(
    key: &str,
    index: usize,
    label: String,
    value: &JsonValue,
) -> Result<Observation, LoadError> {
    match value.as_f64() {
        Some(value) => Ok(Observation::new(label, value)),
        None => Err(LoadError::NonNumericValue {
            key: key.to_owned(),
            label,
            index,
        }),
    }
}

/// Top-level dataset entries in document order, duplicates kept.
struct SourceEntries(Vec<(String, Vec<JsonValue>)>);

impl<'de> Deserialize<'de> for SourceEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = SourceEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping date keys to arrays of observations")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Vec<JsonValue>>()? {
                    entries.push(entry);
                }
                Ok(SourceEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
