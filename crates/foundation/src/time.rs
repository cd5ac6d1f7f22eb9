use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calendar date on which a survey was captured.
///
/// Serialised as `YYYY-MM-DD`, which is both the coverage wire format and the
/// value placed into tile and download URLs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaptureDate(NaiveDate);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError(pub String);

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid capture date {:?} (expected YYYY-MM-DD)", self.0)
    }
}

impl std::error::Error for DateParseError {}

impl CaptureDate {
    pub const FORMAT: &'static str = "%Y-%m-%d";

    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn parse(s: &str) -> Result<Self, DateParseError> {
        NaiveDate::parse_from_str(s.trim(), Self::FORMAT)
            .map(Self)
            .map_err(|_| DateParseError(s.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Absolute distance in whole days.
    pub fn days_between(self, other: CaptureDate) -> i64 {
        (self.0 - other.0).num_days().abs()
    }
}

impl FromStr for CaptureDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CaptureDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}
