use thiserror::Error;

pub type CalendarResult<T> = Result<T, CalendarError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalendarError {
    #[error("dataset rejected: {0}")]
    Load(#[from] LoadError),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl CalendarError {
    /// Returns the load failure when this error came from dataset validation.
    #[must_use]
    pub fn as_load_error(&self) -> Option<&LoadError> {
        match self {
            Self::Load(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

/// Reasons a dataset replacement is refused as a whole.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("invalid date key `{key}`: {reason}")]
    InvalidDateKey { key: String, reason: String },

    #[error("date `{key}` appears more than once")]
    DuplicateDate { key: String },

    #[error("empty observation label for date `{key}` at row {index}")]
    EmptyLabel { key: String, index: usize },

    #[error("non-numeric value for `{label}` on date `{key}` at row {index}")]
    NonNumericValue {
        key: String,
        label: String,
        index: usize,
    },

    #[error("malformed observation for date `{key}` at row {index}: {reason}")]
    MalformedObservation {
        key: String,
        index: usize,
        reason: String,
    },

    #[error("malformed dataset source: {0}")]
    MalformedSource(String),
}
