use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::trace;

use crate::core::primitives::is_blank_label;
use crate::core::{DateKey, DateKeyFormat, DateKeyFormatter, Observation};
use crate::error::LoadError;

/// Unvalidated dataset as handed over by a loader.
///
/// Entries keep their supplied order, duplicates included, so validation can
/// report them instead of silently merging.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSource {
    entries: Vec<(String, Vec<Observation>)>,
}

impl DatasetSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_date(mut self, key: impl Into<String>, rows: Vec<Observation>) -> Self {
        self.push(key, rows);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, rows: Vec<Observation>) {
        self.entries.push((key.into(), rows));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[(String, Vec<Observation>)] {
        &self.entries
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<Observation>)> for DatasetSource {
    fn from_iter<I: IntoIterator<Item = (K, Vec<Observation>)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, rows)| (key.into(), rows))
                .collect(),
        }
    }
}

impl From<IndexMap<String, Vec<Observation>>> for DatasetSource {
    fn from(map: IndexMap<String, Vec<Observation>>) -> Self {
        map.into_iter().collect()
    }
}

/// Validated, immutable mapping from date key to ordered observations.
#[derive(Debug, Clone, PartialEq)]
pub struct DateDataset {
    key_format: DateKeyFormat,
    entries: IndexMap<DateKey, Vec<Observation>>,
}

impl DateDataset {
    #[must_use]
    pub fn empty(formatter: DateKeyFormatter) -> Self {
        Self {
            key_format: formatter.key_format(),
            entries: IndexMap::new(),
        }
    }

    /// Validates every key and observation of `source`.
    ///
    /// The first problem found rejects the whole source. Dates with zero rows
    /// are kept but do not count as having data.
    pub fn validate(source: DatasetSource, formatter: DateKeyFormatter) -> Result<Self, LoadError> {
        let mut entries = IndexMap::with_capacity(source.entries.len());
        for (text, rows) in source.entries {
            let key = formatter.parse(&text)?;
            validate_rows(&key, &rows)?;
            match entries.entry(key) {
                Entry::Occupied(_) => return Err(LoadError::DuplicateDate { key: text }),
                Entry::Vacant(slot) => {
                    trace!(key = %text, rows = rows.len(), "validated dataset entry");
                    slot.insert(rows);
                }
            }
        }
        Ok(Self {
            key_format: formatter.key_format(),
            entries,
        })
    }

    #[must_use]
    pub fn key_format(&self) -> DateKeyFormat {
        self.key_format
    }

    /// True iff at least one observation is stored for `key`.
    #[must_use]
    pub fn has<Q: AsRef<str> + ?Sized>(&self, key: &Q) -> bool {
        self.entries
            .get(key.as_ref())
            .is_some_and(|rows| !rows.is_empty())
    }

    /// Rows for `key` in insertion order; empty when the key is absent.
    #[must_use]
    pub fn rows_for<Q: AsRef<str> + ?Sized>(&self, key: &Q) -> &[Observation] {
        self.entries
            .get(key.as_ref())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of dates in the dataset, including dates with zero rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of dates that carry at least one observation.
    #[must_use]
    pub fn dates_with_data(&self) -> usize {
        self.entries.values().filter(|rows| !rows.is_empty()).count()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &[Observation])> {
        self.entries
            .iter()
            .map(|(key, rows)| (key, rows.as_slice()))
    }
}

fn validate_rows(key: &DateKey, rows: &[Observation]) -> Result<(), LoadError> {
    for (index, row) in rows.iter().enumerate() {
        if is_blank_label(&row.label) {
            return Err(LoadError::EmptyLabel {
                key: key.to_string(),
                index,
            });
        }
        if !row.value.is_finite() {
            return Err(LoadError::NonNumericValue {
                key: key.to_string(),
                label: row.label.clone(),
                index,
            });
        }
    }
    Ok(())
}
