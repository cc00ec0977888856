//! Filter State: the user-selected constraints applied to every fetch.
//!
//! A [`Filter`] is never mutated in place. Every update returns a new value,
//! which the controller swaps in as a whole before triggering a refresh.

use crate::reference::RecordId;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("date_from {from} is after date_to {to}")]
    InvertedRange { from: NaiveDate, to: NaiveDate },
    #[error("a {days} day look-back from {today} is out of range")]
    WindowOutOfRange { today: NaiveDate, days: u32 },
}

/// Date window plus farm, crop and project selections.
///
/// Empty id sets mean "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    #[serde(default)]
    pub farm_ids: BTreeSet<RecordId>,
    #[serde(default)]
    pub crop_ids: BTreeSet<RecordId>,
    #[serde(default)]
    pub project_ids: BTreeSet<RecordId>,
}

fn check_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<(), FilterError> {
    match (from, to) {
        (Some(from), Some(to)) if from > to => Err(FilterError::InvertedRange { from, to }),
        _ => Ok(()),
    }
}

fn toggled(set: &BTreeSet<RecordId>, id: RecordId) -> BTreeSet<RecordId> {
    let mut next = set.clone();
    if !next.remove(&id) {
        next.insert(id);
    }
    next
}

impl Filter {
    pub fn new(date_from: Option<NaiveDate>, date_to: Option<NaiveDate>) -> Result<Self, FilterError> {
        check_range(date_from, date_to)?;
        Ok(Self {
            date_from,
            date_to,
            ..Self::default()
        })
    }

    /// The default dashboard window: the `days` days ending on `today`.
    pub fn last_days(today: NaiveDate, days: u32) -> Result<Self, FilterError> {
        let from = today
            .checked_sub_days(Days::new(u64::from(days)))
            .ok_or(FilterError::WindowOutOfRange { today, days })?;
        Ok(Self {
            date_from: Some(from),
            date_to: Some(today),
            ..Self::default()
        })
    }

    pub fn with_date_from(&self, date_from: Option<NaiveDate>) -> Result<Self, FilterError> {
        check_range(date_from, self.date_to)?;
        Ok(Self {
            date_from,
            ..self.clone()
        })
    }

    pub fn with_date_to(&self, date_to: Option<NaiveDate>) -> Result<Self, FilterError> {
        check_range(self.date_from, date_to)?;
        Ok(Self {
            date_to,
            ..self.clone()
        })
    }

    pub fn toggle_farm(&self, id: RecordId) -> Self {
        Self {
            farm_ids: toggled(&self.farm_ids, id),
            ..self.clone()
        }
    }

    pub fn toggle_crop(&self, id: RecordId) -> Self {
        Self {
            crop_ids: toggled(&self.crop_ids, id),
            ..self.clone()
        }
    }

    pub fn toggle_project(&self, id: RecordId) -> Self {
        Self {
            project_ids: toggled(&self.project_ids, id),
            ..self.clone()
        }
    }

    /// Check the date ordering of a filter built field by field (e.g. deserialized).
    pub fn validate(&self) -> Result<(), FilterError> {
        check_range(self.date_from, self.date_to)
    }

    pub fn is_unrestricted(&self) -> bool {
        self.date_from.is_none()
            && self.date_to.is_none()
            && self.farm_ids.is_empty()
            && self.crop_ids.is_empty()
            && self.project_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn toggle_twice_restores_filter() {
        let f = Filter::new(Some(d(2024, 1, 1)), Some(d(2024, 2, 1))).unwrap();
        assert_eq!(f.toggle_farm(3).toggle_farm(3), f);
        assert_eq!(f.toggle_crop(7).toggle_crop(7), f);
        assert_eq!(f.toggle_project(11).toggle_project(11), f);
    }

    #[test]
    fn toggle_does_not_touch_original() {
        let f = Filter::default();
        let g = f.toggle_farm(1).toggle_crop(2);
        assert!(f.farm_ids.is_empty());
        assert!(g.farm_ids.contains(&1));
        assert!(g.crop_ids.contains(&2));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = Filter::new(Some(d(2024, 3, 1)), Some(d(2024, 2, 1))).unwrap_err();
        assert_eq!(
            err,
            FilterError::InvertedRange {
                from: d(2024, 3, 1),
                to: d(2024, 2, 1)
            }
        );

        let f = Filter::new(None, Some(d(2024, 2, 1))).unwrap();
        assert!(f.with_date_from(Some(d(2024, 2, 2))).is_err());
        assert!(f.with_date_from(Some(d(2024, 2, 1))).is_ok());
    }

    #[test]
    fn open_ended_bounds_are_valid() {
        let f = Filter::new(Some(d(2024, 3, 1)), None).unwrap();
        assert!(f.with_date_to(None).is_ok());
        assert!(Filter::default().is_unrestricted());
        assert!(!f.is_unrestricted());
    }

    #[test]
    fn last_days_window() {
        let f = Filter::last_days(d(2024, 3, 31), 30).unwrap();
        assert_eq!(f.date_from, Some(d(2024, 3, 1)));
        assert_eq!(f.date_to, Some(d(2024, 3, 31)));
        assert!(f.validate().is_ok());
    }

    #[test]
    fn huge_look_back_is_an_error() {
        let err = Filter::last_days(d(2024, 6, 1), 4_000_000_000).unwrap_err();
        assert_eq!(
            err,
            FilterError::WindowOutOfRange {
                today: d(2024, 6, 1),
                days: 4_000_000_000
            }
        );
        assert!(Filter::last_days(d(2024, 6, 1), 0).is_ok());
    }
}
