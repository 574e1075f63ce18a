//! Inclusive calendar-date windows and their archive partition paths.

use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate};

/// Date format accepted on input and used for day directories.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Format of the year-month partition directory.
pub const MONTH_FORMAT: &str = "%Y-%m";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum DateWindowError {
    #[display("invalid date '{input}', expected YYYY-MM-DD")]
    InvalidDate {
        input: String,
        source: chrono::ParseError,
    },
    #[display("start date {start} is after end date {end}")]
    Reversed { start: NaiveDate, end: NaiveDate },
}

/// Inclusive range of calendar days, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateWindowError> {
        if start > end {
            return Err(DateWindowError::Reversed { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses two `YYYY-MM-DD` strings into a window.
    pub fn parse(start: &str, end: &str) -> Result<Self, DateWindowError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Iterates every day in the window, in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        std::iter::successors(Some(self.start), |day| day.checked_add_days(Days::new(1)))
            .take_while(move |day| *day <= end)
    }
}

pub fn parse_date(input: &str) -> Result<NaiveDate, DateWindowError> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|source| DateWindowError::InvalidDate {
        input: input.to_owned(),
        source,
    })
}

/// Directory holding one day's transcripts: `root/YYYY-MM/category/YYYY-MM-DD`.
#[must_use]
pub fn partition_dir(root: &Path, category: &str, day: NaiveDate) -> PathBuf {
    root.join(day.format(MONTH_FORMAT).to_string())
        .join(category)
        .join(day.format(DATE_FORMAT).to_string())
}
