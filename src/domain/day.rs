//! Weekday keys for the weekly calendar
//!
//! The calendar is always a Monday-start week of exactly seven days. Days are
//! keyed by their short names (`Mon`..`Sun`) in persisted data, while the
//! schedule-generation contract uses full names (`Monday`..`Sunday`).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One of the seven fixed weekday slots, Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// All seven days in calendar order
    pub const ALL: [Weekday; 7] = [
        Self::Mon,
        Self::Tue,
        Self::Wed,
        Self::Thu,
        Self::Fri,
        Self::Sat,
        Self::Sun,
    ];

    /// Zero-based index with Monday = 0
    pub fn index(self) -> usize {
        self as usize
    }

    /// Day for a zero-based Monday-first index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Map a full weekday name ("Monday") to its slot
    ///
    /// Returns `None` for anything unrecognized so callers can skip entries
    /// a drifting model invents rather than fail the whole schedule.
    pub fn from_full_name(name: &str) -> Option<Self> {
        match name {
            "Monday" => Some(Self::Mon),
            "Tuesday" => Some(Self::Tue),
            "Wednesday" => Some(Self::Wed),
            "Thursday" => Some(Self::Thu),
            "Friday" => Some(Self::Fri),
            "Saturday" => Some(Self::Sat),
            "Sunday" => Some(Self::Sun),
            _ => None,
        }
    }

    /// Slot for a concrete calendar date
    pub fn from_date(date: NaiveDate) -> Self {
        // num_days_from_monday is 0..=6, always a valid index
        Self::ALL[date.weekday().num_days_from_monday() as usize]
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Mon => "Mon",
            Self::Tue => "Tue",
            Self::Wed => "Wed",
            Self::Thu => "Thu",
            Self::Fri => "Fri",
            Self::Sat => "Sat",
            Self::Sun => "Sun",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mon" => Ok(Self::Mon),
            "Tue" => Ok(Self::Tue),
            "Wed" => Ok(Self::Wed),
            "Thu" => Ok(Self::Thu),
            "Fri" => Ok(Self::Fri),
            "Sat" => Ok(Self::Sat),
            "Sun" => Ok(Self::Sun),
            _ => Err(format!("Unknown day key: {}", s)),
        }
    }
}
