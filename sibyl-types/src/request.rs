//! Request-side value types: ticker symbol, date range, forecast request.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SibylError;

/// Validated ticker symbol (trimmed, non-empty, no inner whitespace, upper-cased).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and canonicalize a ticker symbol.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the symbol is empty after trimming or contains
    /// whitespace.
    pub fn new(raw: &str) -> Result<Self, SibylError> {
        let s = raw.trim();
        if s.is_empty() {
            return Err(SibylError::InvalidInput("symbol must not be empty".into()));
        }
        if s.chars().any(char::is_whitespace) {
            return Err(SibylError::InvalidInput(format!(
                "symbol must not contain whitespace: {s:?}"
            )));
        }
        Ok(Self(s.to_ascii_uppercase()))
    }

    /// Returns the canonical symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = SibylError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = SibylError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Symbol> for String {
    fn from(s: Symbol) -> Self {
        s.0
    }
}

/// Calendar date range, start inclusive and end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a validated range.
    ///
    /// # Errors
    /// Returns `InvalidInput` if `start` is not strictly before `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, SibylError> {
        if start >= end {
            return Err(SibylError::InvalidInput(format!(
                "date range start {start} must be before end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// First date included in the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// First date past the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether the calendar date of `ts` (UTC) falls in the range.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        let d = ts.date_naive();
        self.start <= d && d < self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// One user-triggered forecast request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRequest {
    /// Ticker to fetch.
    pub symbol: Symbol,
    /// History window to fetch.
    pub range: DateRange,
    /// Only report aligned predictions on or after this date, if set.
    pub report_from: Option<NaiveDate>,
}

impl ForecastRequest {
    /// Build a request without a reporting cutoff.
    #[must_use]
    pub const fn new(symbol: Symbol, range: DateRange) -> Self {
        Self {
            symbol,
            range,
            report_from: None,
        }
    }

    /// Set the date from which aligned predictions are reported.
    #[must_use]
    pub const fn report_from(mut self, date: NaiveDate) -> Self {
        self.report_from = Some(date);
        self
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

impl Default for ForecastRequest {
    /// `AAPL` over 2015-01-01..2021-01-01, reported from 2021-01-02.
    fn default() -> Self {
        Self {
            symbol: Symbol("AAPL".to_string()),
            range: DateRange {
                start: ymd(2015, 1, 1),
                end: ymd(2021, 1, 1),
            },
            report_from: Some(ymd(2021, 1, 2)),
        }
    }
}
