//! Actual against budgeted cost per booking date.

use chrono::NaiveDate;
use farm_core::CostEntry;
use serde::Serialize;
use std::collections::BTreeMap;

/// Budgeted cost is drawn as the actual cost plus this margin.
pub const BUDGET_BUFFER: f64 = 1.1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostTrendPoint {
    pub date: NaiveDate,
    pub actual: f64,
    pub budgeted: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CostTrend {
    /// Ascending by date, one point per day with bookings.
    pub points: Vec<CostTrendPoint>,
}

/// Entries without a date are left out.
pub fn summarize_cost_trend(entries: &[CostEntry]) -> CostTrend {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for entry in entries {
        if let Some(date) = entry.date {
            *by_date.entry(date).or_default() += entry.amount;
        }
    }
    let points = by_date
        .into_iter()
        .map(|(date, actual)| CostTrendPoint {
            date,
            actual,
            budgeted: actual * BUDGET_BUFFER,
        })
        .collect();
    CostTrend { points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{cost, dated};

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn entries() -> Vec<CostEntry> {
        vec![
            dated(cost(1, 1, "seeds", 200.0), d(4, 2)),
            dated(cost(2, 1, "water", 100.0), d(3, 20)),
            dated(cost(3, 2, "labor", 50.0), d(4, 2)),
            cost(4, 2, "fuel", 999.0),
        ]
    }

    #[test]
    fn groups_by_day_in_date_order() {
        let t = summarize_cost_trend(&entries());
        let dates: Vec<NaiveDate> = t.points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d(3, 20), d(4, 2)]);
        assert_eq!(t.points[1].actual, 250.0);
        assert!((t.points[1].budgeted - 275.0).abs() < 1e-9);
    }

    #[test]
    fn undated_entries_are_skipped() {
        let t = summarize_cost_trend(&[cost(1, 1, "fuel", 10.0)]);
        assert!(t.points.is_empty());
    }

    #[test]
    fn summarizing_twice_is_identical() {
        assert_eq!(summarize_cost_trend(&entries()), summarize_cost_trend(&entries()));
    }
}
