use serde::{Deserialize, Serialize};

use crate::core::{DateKey, DateKeyFormat, DateKeyFormatter};
use crate::error::{CalendarError, CalendarResult};

/// Public controller bootstrap configuration.
///
/// Every field has a serde default, so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default)]
    pub key_format: DateKeyFormat,
    #[serde(default = "default_marker_title")]
    pub marker_title: String,
    #[serde(default = "default_detail_title_prefix")]
    pub detail_title_prefix: String,
    #[serde(default = "default_no_data_notice")]
    pub no_data_notice: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            key_format: DateKeyFormat::default(),
            marker_title: default_marker_title(),
            detail_title_prefix: default_detail_title_prefix(),
            no_data_notice: default_no_data_notice(),
        }
    }
}

impl CalendarConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the date key layout used for lookups and dataset validation.
    #[must_use]
    pub fn with_key_format(mut self, key_format: DateKeyFormat) -> Self {
        self.key_format = key_format;
        self
    }

    #[must_use]
    pub fn with_marker_title(mut self, title: impl Into<String>) -> Self {
        self.marker_title = title.into();
        self
    }

    #[must_use]
    pub fn with_detail_title_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.detail_title_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_no_data_notice(mut self, notice: impl Into<String>) -> Self {
        self.no_data_notice = notice.into();
        self
    }

    #[must_use]
    pub fn formatter(&self) -> DateKeyFormatter {
        DateKeyFormatter::new(self.key_format)
    }

    #[must_use]
    pub fn detail_title(&self, key: &DateKey) -> String {
        format!("{} {key}", self.detail_title_prefix)
    }

    pub fn validate(&self) -> CalendarResult<()> {
        if self.marker_title.trim().is_empty() {
            return Err(CalendarError::InvalidData(
                "marker title must not be empty".to_owned(),
            ));
        }
        if self.no_data_notice.trim().is_empty() {
            return Err(CalendarError::InvalidData(
                "no-data notice must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> CalendarResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CalendarError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> CalendarResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| CalendarError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_marker_title() -> String {
    "Data available".to_owned()
}

fn default_detail_title_prefix() -> String {
    "Data for".to_owned()
}

fn default_no_data_notice() -> String {
    "No data found for the selected date.".to_owned()
}
