use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// A calendar month, as picked by the `<input type="month">` controls.
///
/// Always stored as the first day of the month so that every value is a
/// valid date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Month(NaiveDate);

#[derive(Debug, Error, PartialEq)]
#[error("invalid month `{0}`, expected YYYY-MM")]
pub struct ParseMonthError(String);

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// The month a date falls in.
    pub fn of(date: NaiveDate) -> Self {
        Self(NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date))
    }

    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub fn days(&self) -> u32 {
        let next = if self.month() == 12 {
            NaiveDate::from_ymd_opt(self.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year(), self.month() + 1, 1)
        };

        next.map(|n| n.signed_duration_since(self.0).num_days() as u32)
            .unwrap_or(31)
    }

    /// Pay weeks in the month: partial weeks count as whole ones.
    pub fn weeks(&self) -> u32 {
        self.days().div_ceil(7)
    }

    /// Human label such as "January 2025".
    pub fn label(&self) -> String {
        self.0.format("%B %Y").to_string()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for Month {
    type Err = ParseMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (year, month) = s.split_once('-').ok_or_else(|| ParseMonthError(s.to_string()))?;
        if year.len() != 4 || month.len() != 2 {
            return Err(ParseMonthError(s.to_string()));
        }

        let year = year.parse::<i32>().map_err(|_| ParseMonthError(s.to_string()))?;
        let month = month.parse::<u32>().map_err(|_| ParseMonthError(s.to_string()))?;

        Self::new(year, month).ok_or_else(|| ParseMonthError(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Weeks used for payroll in the given month.
pub fn weeks_in_month(month: Month) -> u32 {
    month.weeks()
}
