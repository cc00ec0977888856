//! Daily report and cost entry counts per day over a recent window.

use chrono::{Days, NaiveDate};
use farm_core::{CostEntry, DailyReport, Filter};
use serde::Serialize;

/// Default span when the filter has no start date.
pub const ACTIVITY_DEFAULT_DAYS: u64 = 7;
/// Longest span charted; wider filters keep their latest days.
pub const ACTIVITY_MAX_DAYS: u64 = 366;

/// Inclusive day range the activity chart covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ActivityWindow {
    /// The filter's date range, ending today and starting a week earlier when
    /// a bound is open.
    pub fn for_filter(filter: &Filter, today: NaiveDate) -> Self {
        let to = filter.date_to.unwrap_or(today);
        let earliest = to
            .checked_sub_days(Days::new(ACTIVITY_MAX_DAYS - 1))
            .unwrap_or(NaiveDate::MIN);
        let from = match filter.date_from {
            Some(from) => from,
            None => to
                .checked_sub_days(Days::new(ACTIVITY_DEFAULT_DAYS))
                .unwrap_or(NaiveDate::MIN),
        };
        Self {
            from: from.max(earliest),
            to,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityDay {
    pub date: NaiveDate,
    pub daily_reports: usize,
    pub cost_entries: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivitySummary {
    /// Every day of the window, including days without records.
    pub days: Vec<ActivityDay>,
}

pub fn summarize_activity(reports: &[DailyReport], costs: &[CostEntry], window: ActivityWindow) -> ActivitySummary {
    let days = window
        .from
        .iter_days()
        .take_while(|date| *date <= window.to)
        .map(|date| ActivityDay {
            date,
            daily_reports: reports.iter().filter(|r| r.date == Some(date)).count(),
            cost_entries: costs.iter().filter(|c| c.date == Some(date)).count(),
        })
        .collect();
    ActivitySummary { days }
}
