use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::CoreError;

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Inclusive `[start, end]` window over comment creation times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Default for DateRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl DateRange {
    pub fn unbounded() -> Self {
        Self {
            start: DateTime::<Utc>::MIN_UTC,
            end: DateTime::<Utc>::MAX_UTC,
        }
    }

    /// Blank or missing bounds widen to the representable extremes.
    pub fn parse(min: Option<&str>, max: Option<&str>) -> Result<Self, CoreError> {
        let start = match non_blank(min) {
            Some(raw) => parse_timestamp(raw)?,
            None => DateTime::<Utc>::MIN_UTC,
        };
        let end = match non_blank(max) {
            Some(raw) => parse_timestamp(raw)?,
            None => DateTime::<Utc>::MAX_UTC,
        };
        Ok(Self { start, end })
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, CoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(|date| NaiveDateTime::new(date, NaiveTime::MIN).and_utc())
        .map_err(|_| CoreError::InvalidDate(input.to_string()))
}
