use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::LoadError;

/// Anything that resolves to a single calendar day.
///
/// Time-of-day components are discarded. Zoned values resolve to the calendar
/// day in their own time zone.
pub trait CalendarDay {
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

impl<T: CalendarDay + ?Sized> CalendarDay for &T {
    fn calendar_day(&self) -> NaiveDate {
        (**self).calendar_day()
    }
}

/// Field order of a rendered date key.
///
/// Day and month are always two digits. The year is at least four digits with
/// a leading `-` for years before 1 CE, so every variant is injective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateKeyFormat {
    /// `DD-MM-YYYY`
    #[default]
    DayMonthYear,
    /// `YYYY-MM-DD`
    YearMonthDay,
}

impl DateKeyFormat {
    #[must_use]
    pub fn pattern(self) -> &'static str {
        match self {
            Self::DayMonthYear => "DD-MM-YYYY",
            Self::YearMonthDay => "YYYY-MM-DD",
        }
    }

    fn render(self, day: NaiveDate) -> String {
        match self {
            Self::DayMonthYear => {
                format!("{:02}-{:02}-{:04}", day.day(), day.month(), day.year())
            }
            Self::YearMonthDay => {
                format!("{:04}-{:02}-{:02}", day.year(), day.month(), day.day())
            }
        }
    }

    /// Splits into `(year, month, day)` fields. The year may carry a sign, so
    /// it is always the field that absorbs extra separators.
    fn split(self, text: &str) -> Option<(&str, &str, &str)> {
        match self {
            Self::DayMonthYear => {
                let mut parts = text.splitn(3, '-');
                let day = parts.next()?;
                let month = parts.next()?;
                let year = parts.next()?;
                Some((year, month, day))
            }
            Self::YearMonthDay => {
                let mut parts = text.rsplitn(3, '-');
                let day = parts.next()?;
                let month = parts.next()?;
                let year = parts.next()?;
                Some((year, month, day))
            }
        }
    }
}

/// Canonical string identifying one calendar day.
///
/// Keys are only produced by [`DateKeyFormatter`], so the text and the day
/// always agree. Equality and hashing use the text, which lets maps keyed by
/// `DateKey` be queried with a plain `&str`.
#[derive(Debug, Clone)]
pub struct DateKey {
    text: String,
    day: NaiveDate,
}

impl DateKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.day
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

impl PartialEq for DateKey {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for DateKey {}

impl Hash for DateKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for DateKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.day
            .cmp(&other.day)
            .then_with(|| self.text.cmp(&other.text))
    }
}

impl Borrow<str> for DateKey {
    fn borrow(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for DateKey {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl PartialEq<str> for DateKey {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for DateKey {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

/// Normalizes calendar days into [`DateKey`]s and validates key text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateKeyFormatter {
    key_format: DateKeyFormat,
}

impl DateKeyFormatter {
    #[must_use]
    pub fn new(key_format: DateKeyFormat) -> Self {
        Self { key_format }
    }

    #[must_use]
    pub fn key_format(self) -> DateKeyFormat {
        self.key_format
    }

    /// Formats the calendar day of `date`. Total and injective.
    #[must_use]
    pub fn format(self, date: impl CalendarDay) -> DateKey {
        let day = date.calendar_day();
        DateKey {
            text: self.key_format.render(day),
            day,
        }
    }

    /// Inverse of [`format`](Self::format).
    ///
    /// Accepts only text that `format` would produce for a real calendar day,
    /// so `"1-9-2025"` and `"31-02-2025"` are both rejected.
    pub fn parse(self, text: &str) -> Result<DateKey, LoadError> {
        let invalid = |reason: String| LoadError::InvalidDateKey {
            key: text.to_owned(),
            reason,
        };

        let (year, month, day) = self.key_format.split(text).ok_or_else(|| {
            invalid(format!(
                "expected three `-` separated fields ({})",
                self.key_format.pattern()
            ))
        })?;
        let year: i32 = year
            .parse()
            .map_err(|_| invalid(format!("year `{year}` is not a number")))?;
        let month: u32 = month
            .parse()
            .map_err(|_| invalid(format!("month `{month}` is not a number")))?;
        let day: u32 = day
            .parse()
            .map_err(|_| invalid(format!("day `{day}` is not a number")))?;

        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| invalid("not a real calendar day".to_owned()))?;
        let key = self.format(date);
        if key.text != text {
            return Err(invalid(format!(
                "not in canonical {} form (expected `{}`)",
                self.key_format.pattern(),
                key.text
            )));
        }
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{DateKeyFormat, DateKeyFormatter};
    use crate::error::LoadError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn year_month_day_splits_signed_years_from_the_right() {
        let formatter = DateKeyFormatter::new(DateKeyFormat::YearMonthDay);
        let key = formatter.format(date(-44, 3, 15));
        assert_eq!(key.as_str(), "-044-03-15");
        assert_eq!(formatter.parse("-044-03-15").expect("parse"), key);
    }

    #[test]
    fn day_month_year_keeps_signed_year_in_last_field() {
        let formatter = DateKeyFormatter::default();
        let key = formatter.format(date(-1, 12, 31));
        assert_eq!(key.as_str(), "31-12--001");
        assert_eq!(formatter.parse(key.as_str()).expect("parse").day(), key.day());
    }

    #[test]
    fn parse_rejects_explicit_plus_sign() {
        let err = DateKeyFormatter::default()
            .parse("01-09-+2025")
            .expect_err("plus sign is not canonical");
        assert!(matches!(err, LoadError::InvalidDateKey { .. }));
    }

    #[test]
    fn parse_reports_missing_fields() {
        let err = DateKeyFormatter::default()
            .parse("01-09")
            .expect_err("two fields");
        let LoadError::InvalidDateKey { key, reason } = err else {
            panic!("unexpected error kind");
        };
        assert_eq!(key, "01-09");
        assert!(reason.contains("DD-MM-YYYY"));
    }
}
