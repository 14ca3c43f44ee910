use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar month a report covers. Stored as the first day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMonth(NaiveDate);

impl ReportMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Month containing today's local date.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self(today.with_day(1).unwrap_or(today))
    }

    /// Parse a `YYYY-MM` string.
    pub fn parse(input: &str) -> Option<Self> {
        let (year, month) = input.trim().split_once('-')?;
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    /// Human label, e.g. "October 2026".
    pub fn label(&self) -> String {
        self.0.format("%B %Y").to_string()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }
}

impl std::fmt::Display for ReportMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}
