//! Shared utility functions for farm dashboard crates.

/// Date utility functions
pub mod dates {
    use anyhow::Context;
    use chrono::{Days, NaiveDate};

    /// Format a NaiveDate as "YYYY-MM-DD", the form the record store uses.
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
    }

    /// Parse an optional date column; empty cells and `false` mean unset.
    pub fn parse_optional_date(s: &str) -> anyhow::Result<Option<NaiveDate>> {
        match s.trim() {
            "" | "false" => Ok(None),
            other => parse_date(other).map(Some),
        }
    }

    /// The `(from, to)` window covering the `days` days that end on `today`.
    pub fn lookback_window(today: NaiveDate, days: u32) -> anyhow::Result<(NaiveDate, NaiveDate)> {
        let from = today
            .checked_sub_days(Days::new(u64::from(days)))
            .with_context(|| format!("a {days} day look-back from {today} is out of range"))?;
        Ok((from, today))
    }

}
