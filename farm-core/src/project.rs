//! Cultivation project snapshots.

use crate::reference::{number, optional, RecordId, RecordRef};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a cultivation project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectState {
    Draft,
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl ProjectState {
    /// Every state, in display order.
    pub const ALL: [ProjectState; 5] = [
        ProjectState::Draft,
        ProjectState::Planned,
        ProjectState::InProgress,
        ProjectState::Completed,
        ProjectState::Cancelled,
    ];

    /// The tag used by the record store.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectState::Draft => "draft",
            ProjectState::Planned => "planned",
            ProjectState::InProgress => "in_progress",
            ProjectState::Completed => "completed",
            ProjectState::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectState::Draft => "Draft",
            ProjectState::Planned => "Planned",
            ProjectState::InProgress => "In Progress",
            ProjectState::Completed => "Completed",
            ProjectState::Cancelled => "Cancelled",
        }
    }

    /// States of projects that no longer count as active.
    pub const CLOSED: [ProjectState; 2] = [ProjectState::Completed, ProjectState::Cancelled];

    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == tag)
    }

    pub fn is_active(&self) -> bool {
        !Self::CLOSED.contains(self)
    }
}

impl fmt::Display for ProjectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Harvest quality grade recorded on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YieldQuality {
    Excellent,
    Good,
    Average,
    Poor,
}

impl YieldQuality {
    pub fn label(&self) -> &'static str {
        match self {
            YieldQuality::Excellent => "Excellent",
            YieldQuality::Good => "Good",
            YieldQuality::Average => "Average",
            YieldQuality::Poor => "Poor",
        }
    }
}

/// A cultivation project as returned by the store. Never mutated.
///
/// Numeric fields decode `false`/`null`/missing as zero so that sums over a
/// project list never need a separate null check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "farm_id", default, deserialize_with = "optional")]
    pub farm: Option<RecordRef>,
    #[serde(rename = "crop_id", default, deserialize_with = "optional")]
    pub crop: Option<RecordRef>,
    #[serde(default, deserialize_with = "number")]
    pub field_area: f64,
    #[serde(default, deserialize_with = "number")]
    pub budget: f64,
    #[serde(default, deserialize_with = "number")]
    pub actual_cost: f64,
    #[serde(default, deserialize_with = "number")]
    pub revenue: f64,
    #[serde(default, deserialize_with = "number")]
    pub profit: f64,
    #[serde(default, deserialize_with = "number")]
    pub planned_yield: f64,
    #[serde(default, deserialize_with = "number")]
    pub actual_yield: f64,
    #[serde(default, deserialize_with = "optional")]
    pub yield_quality: Option<YieldQuality>,
    pub state: ProjectState,
    #[serde(default, deserialize_with = "optional")]
    pub start_date: Option<NaiveDate>,
}

impl Project {
    /// Display name of the crop, or an empty string when unset.
    pub fn crop_name(&self) -> &str {
        self.crop
            .as_ref()
            .map(|c| c.display_name.as_str())
            .unwrap_or("")
    }

    /// Whether any yield figure has been recorded.
    pub fn has_yield_data(&self) -> bool {
        self.planned_yield > 0.0 || self.actual_yield > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_store_record() {
        let record = json!({
            "id": 5,
            "name": "Spring maize",
            "farm_id": [1, "North Farm"],
            "crop_id": [2, "Maize"],
            "field_area": 12.5,
            "budget": 1000,
            "actual_cost": 800.0,
            "revenue": false,
            "profit": null,
            "planned_yield": 20,
            "actual_yield": 0,
            "yield_quality": false,
            "state": "in_progress",
            "start_date": "2024-03-01"
        });
        let p: Project = serde_json::from_value(record).unwrap();
        assert_eq!(p.farm.as_ref().unwrap().display_name, "North Farm");
        assert_eq!(p.crop_name(), "Maize");
        assert_eq!(p.revenue, 0.0);
        assert_eq!(p.profit, 0.0);
        assert_eq!(p.state, ProjectState::InProgress);
        assert!(p.yield_quality.is_none());
        assert_eq!(p.start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert!(p.has_yield_data());
    }

    #[test]
    fn rejects_unknown_state() {
        let record = json!({"id": 1, "name": "x", "state": "sowing"});
        assert!(serde_json::from_value::<Project>(record).is_err());
    }

    #[test]
    fn state_tags_round_trip() {
        for state in ProjectState::ALL {
            assert_eq!(ProjectState::parse(state.as_str()), Some(state));
        }
        assert_eq!(ProjectState::parse("harvest"), None);
    }

    #[test]
    fn closed_states_are_inactive() {
        let active: Vec<ProjectState> = ProjectState::ALL.into_iter().filter(|s| s.is_active()).collect();
        assert_eq!(active, vec![ProjectState::Draft, ProjectState::Planned, ProjectState::InProgress]);
    }
}
