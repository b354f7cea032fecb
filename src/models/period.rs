//! Budget period representation
//!
//! A period is the recurrence unit of a budget window: monthly or yearly.
//! The window itself is anchored to the budget's start date; this module
//! derives the matching inclusive end date.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The recurrence unit of a budget window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Window covers the start date's calendar month
    #[default]
    Monthly,

    /// Window covers the start date's calendar year
    Yearly,
}

impl Period {
    /// Derive the inclusive end date of a window beginning at `start`
    ///
    /// Monthly windows end on the last calendar day of the start date's month
    /// (leap years respected); yearly windows end on December 31 of the start
    /// date's year. Pure calendar arithmetic, no timezones involved.
    pub fn end_of_window(&self, start: NaiveDate) -> NaiveDate {
        match self {
            Self::Monthly => {
                let next_month = if start.month() == 12 {
                    NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
                };
                next_month.unwrap() - Duration::days(1)
            }
            Self::Yearly => NaiveDate::from_ymd_opt(start.year(), 12, 31).unwrap(),
        }
    }

    /// The natural window start for a given calendar date
    ///
    /// The first of the month for monthly windows, January 1 for yearly
    /// ones. Used when no explicit start date is given.
    pub fn start_of_window(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Monthly => NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap(),
            Self::Yearly => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap(),
        }
    }

    /// Human-friendly title for a window beginning at `start`
    ///
    /// "March 2025" for monthly windows, "2025" for yearly ones.
    pub fn window_title(&self, start: NaiveDate) -> String {
        match self {
            Self::Monthly => start.format("%B %Y").to_string(),
            Self::Yearly => start.format("%Y").to_string(),
        }
    }

    /// Parse a period string
    ///
    /// Accepts "monthly"/"month" and "yearly"/"year", case-insensitive.
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" => Ok(Self::Monthly),
            "yearly" | "year" => Ok(Self::Yearly),
            _ => Err(PeriodParseError::Unrecognized(s.to_string())),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl std::str::FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    Unrecognized(String),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::Unrecognized(s) => {
                write!(f, "Unrecognized period '{}' (expected monthly or yearly)", s)
            }
        }
    }
}

impl std::error::Error for PeriodParseError {}
