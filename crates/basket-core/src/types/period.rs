//! History period tokens.
//!
//! A [`Period`] is kept exactly as the user typed it and handed to the price
//! loader untouched. Loaders that need a concrete window call
//! [`Period::lookback`].

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Opaque period token such as `1y`, `6mo` or `max`.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Period(String);

impl Period {
    /// Create a period from any token. No validation is performed.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into().trim().to_string())
    }

    /// Get the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interprets the token as a lookback window.
    ///
    /// Accepts `<n>d`, `<n>wk`, `<n>mo`, `<n>y`, `ytd` and `max`
    /// (case-insensitive).
    pub fn lookback(&self) -> CoreResult<Lookback> {
        let token = self.0.to_ascii_lowercase();
        match token.as_str() {
            "max" => return Ok(Lookback::Max),
            "ytd" => return Ok(Lookback::YearToDate),
            _ => {}
        }

        let split = token
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| self.invalid())?;
        let (count, unit) = token.split_at(split);
        let count: u32 = count.parse().map_err(|_| self.invalid())?;
        if count == 0 {
            return Err(self.invalid());
        }

        match unit {
            "d" => Ok(Lookback::Days(count)),
            "wk" | "w" => Ok(Lookback::Weeks(count)),
            "mo" | "m" => Ok(Lookback::Months(count)),
            "y" => Ok(Lookback::Years(count)),
            _ => Err(self.invalid()),
        }
    }

    fn invalid(&self) -> CoreError {
        CoreError::InvalidPeriod {
            token: self.0.clone(),
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::new("1y")
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Period {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Period {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Concrete lookback window derived from a [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookback {
    /// Calendar days.
    Days(u32),
    /// Calendar weeks.
    Weeks(u32),
    /// Calendar months.
    Months(u32),
    /// Calendar years.
    Years(u32),
    /// From January 1st of the anchor date's year.
    YearToDate,
    /// The full available history.
    Max,
}

impl Lookback {
    /// First date (inclusive) of the window ending at `end`.
    ///
    /// Returns `None` for [`Lookback::Max`] or when the start would fall
    /// before the representable calendar.
    #[must_use]
    pub fn start_from(&self, end: NaiveDate) -> Option<NaiveDate> {
        match *self {
            Lookback::Days(n) => end.checked_sub_days(Days::new(u64::from(n))),
            Lookback::Weeks(n) => end.checked_sub_days(Days::new(u64::from(n) * 7)),
            Lookback::Months(n) => end.checked_sub_months(Months::new(n)),
            Lookback::Years(n) => end.checked_sub_months(Months::new(n.saturating_mul(12))),
            Lookback::YearToDate => NaiveDate::from_ymd_opt(end.year(), 1, 1),
            Lookback::Max => None,
        }
    }
}
