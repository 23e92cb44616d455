//! Simulated calendar: a month index and a year, advanced one month per step.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const MONTHS_PER_YEAR: u8 = 12;

/// A month within a simulated year. `month` is zero-based (January = 0).
///
/// Ordering is chronological: year first, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimDate {
    pub year: i32,
    pub month: u8,
}

impl SimDate {
    pub fn new(year: i32, month: u8) -> Self {
        Self { year, month }
    }

    /// January of `year`.
    pub fn start_of(year: i32) -> Self {
        Self { year, month: 0 }
    }

    /// The following month, wrapping December into January of the next year.
    pub fn next(self) -> Self {
        if self.month + 1 >= MONTHS_PER_YEAR {
            Self {
                year: self.year + 1,
                month: 0,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Number of whole months from `self` up to (not including) `end`.
    /// Zero when `end` is not after `self`.
    pub fn months_until(self, end: SimDate) -> u64 {
        let from = self.ordinal();
        let to = end.ordinal();
        if to > from {
            (to - from) as u64
        } else {
            0
        }
    }

    pub fn is_valid(self) -> bool {
        self.month < MONTHS_PER_YEAR
    }

    fn ordinal(self) -> i64 {
        self.year as i64 * MONTHS_PER_YEAR as i64 + self.month as i64
    }
}

impl fmt::Display for SimDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month + 1)
    }
}
