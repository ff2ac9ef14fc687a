use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::error::{ProcessingError, Result};

/// Formats attempted when inferring how a timestamp column is encoded.
const KNOWN_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Parsing strategies, in the order they are attempted. Each one is applied
/// to the whole column: a single unparseable value rejects the stage and the
/// column falls through to the next, so every value in a column is always
/// interpreted the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// A single inferred format applied to every value
    Uniform,
    /// Per-value format inference
    Mixed,
    /// Strict ISO-8601
    Iso8601,
}

pub const STRATEGY_ORDER: [ParseStrategy; 3] = [
    ParseStrategy::Uniform,
    ParseStrategy::Mixed,
    ParseStrategy::Iso8601,
];

pub struct TimestampNormalizer;

impl TimestampNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize one timestamp column. Missing values stay missing; a column
    /// no strategy can parse is a fatal error naming the column.
    pub fn normalize_column(
        &self,
        column: &str,
        values: &[Option<String>],
    ) -> Result<Vec<Option<NaiveDateTime>>> {
        let mut last_error = String::from("no strategy attempted");

        for strategy in STRATEGY_ORDER {
            match self.apply_strategy(strategy, values) {
                Ok(parsed) => {
                    debug!(column, ?strategy, "timestamp column normalized");
                    return Ok(parsed);
                }
                Err(message) => last_error = message,
            }
        }

        Err(ProcessingError::TimestampColumn {
            column: column.to_string(),
            message: last_error,
        })
    }

    fn apply_strategy(
        &self,
        strategy: ParseStrategy,
        values: &[Option<String>],
    ) -> std::result::Result<Vec<Option<NaiveDateTime>>, String> {
        match strategy {
            ParseStrategy::Uniform => self.parse_uniform(values),
            ParseStrategy::Mixed => self.parse_column(values, parse_any_format),
            ParseStrategy::Iso8601 => self.parse_column(values, parse_iso8601),
        }
    }

    /// Infer one format from the first present value, then require it for
    /// every value in the column.
    fn parse_uniform(
        &self,
        values: &[Option<String>],
    ) -> std::result::Result<Vec<Option<NaiveDateTime>>, String> {
        let first = values
            .iter()
            .flatten()
            .map(|v| v.trim())
            .find(|v| !v.is_empty());

        let first = match first {
            Some(value) => value,
            // A column with no values at all normalizes trivially.
            None => return Ok(vec![None; values.len()]),
        };

        let format = KNOWN_FORMATS
            .iter()
            .find(|format| NaiveDateTime::parse_from_str(first, format).is_ok())
            .ok_or_else(|| format!("no known format matches '{}'", first))?;

        self.parse_column(values, |value| {
            NaiveDateTime::parse_from_str(value, format).ok()
        })
    }

    fn parse_column<F>(
        &self,
        values: &[Option<String>],
        parse: F,
    ) -> std::result::Result<Vec<Option<NaiveDateTime>>, String>
    where
        F: Fn(&str) -> Option<NaiveDateTime>,
    {
        let mut parsed = Vec::with_capacity(values.len());

        for value in values {
            let trimmed = value.as_deref().map(str::trim).filter(|v| !v.is_empty());
            match trimmed {
                None => parsed.push(None),
                Some(value) => match parse(value) {
                    Some(instant) => parsed.push(Some(instant)),
                    None => return Err(format!("value '{}' did not parse", value)),
                },
            }
        }

        Ok(parsed)
    }
}

impl Default for TimestampNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// First known format that parses the value, if any.
fn parse_any_format(value: &str) -> Option<NaiveDateTime> {
    KNOWN_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Strict ISO-8601: `T`-separated date-time with optional fraction, an
/// RFC 3339 instant with offset, or a bare date taken at midnight.
fn parse_iso8601(value: &str) -> Option<NaiveDateTime> {
    if let Ok(instant) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(instant);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.naive_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}
