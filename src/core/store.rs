use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::core::{DatasetSource, DateDataset, DateKeyFormatter, Observation};
use crate::error::CalendarResult;

/// Date-keyed observation store with whole-value replacement.
///
/// The current dataset sits behind an `Arc` that is swapped in one step, so a
/// reader holding a snapshot never sees rows from two different datasets.
#[derive(Debug)]
pub struct DateDataStore {
    formatter: DateKeyFormatter,
    current: RwLock<Arc<DateDataset>>,
}

impl DateDataStore {
    #[must_use]
    pub fn new(formatter: DateKeyFormatter) -> Self {
        Self {
            formatter,
            current: RwLock::new(Arc::new(DateDataset::empty(formatter))),
        }
    }

    pub fn from_source(formatter: DateKeyFormatter, source: DatasetSource) -> CalendarResult<Self> {
        let dataset = DateDataset::validate(source, formatter)?;
        Ok(Self {
            formatter,
            current: RwLock::new(Arc::new(dataset)),
        })
    }

    #[must_use]
    pub fn formatter(&self) -> DateKeyFormatter {
        self.formatter
    }

    /// Returns the dataset that is current right now.
    ///
    /// Use one snapshot for several reads that must agree with each other.
    #[must_use]
    pub fn snapshot(&self) -> Arc<DateDataset> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*current)
    }

    #[must_use]
    pub fn has<Q: AsRef<str> + ?Sized>(&self, key: &Q) -> bool {
        self.snapshot().has(key)
    }

    #[must_use]
    pub fn rows_for<Q: AsRef<str> + ?Sized>(&self, key: &Q) -> Vec<Observation> {
        self.snapshot().rows_for(key).to_vec()
    }

    /// Validates `source` and swaps it in as the whole dataset.
    ///
    /// On error the previous dataset stays current.
    pub fn replace_all(&self, source: DatasetSource) -> CalendarResult<Arc<DateDataset>> {
        let supplied = source.len();
        let dataset = match DateDataset::validate(source, self.formatter) {
            Ok(dataset) => Arc::new(dataset),
            Err(err) => {
                warn!(error = %err, supplied, "rejected dataset replacement");
                return Err(err.into());
            }
        };

        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *current = Arc::clone(&dataset);
        drop(current);

        debug!(
            dates = dataset.len(),
            dates_with_data = dataset.dates_with_data(),
            "replaced dataset"
        );
        Ok(dataset)
    }
}
