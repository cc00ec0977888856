//! Per-farm area and active project counts.

use farm_core::{Farm, Project, RecordId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmStat {
    pub farm_id: RecordId,
    pub name: String,
    /// Hectares.
    pub area: f64,
    /// Projects in the current selection on this farm that are still open.
    pub active_projects: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FarmSummary {
    /// In the order the farms were fetched.
    pub rows: Vec<FarmStat>,
    pub total_area: f64,
}

pub fn summarize_farms(farms: &[Farm], projects: &[Project]) -> FarmSummary {
    let rows: Vec<FarmStat> = farms
        .iter()
        .map(|farm| FarmStat {
            farm_id: farm.id,
            name: farm.name.clone(),
            area: farm.area,
            active_projects: projects
                .iter()
                .filter(|p| p.state.is_active())
                .filter(|p| p.farm.as_ref().is_some_and(|f| f.id == farm.id))
                .count(),
        })
        .collect();
    let total_area = rows.iter().map(|r| r.area).sum();
    FarmSummary { rows, total_area }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{farm, project, with};
    use serde_json::json;

    fn projects() -> Vec<Project> {
        vec![
            with(project(1, "A", None, 0.0, 0.0), json!({"farm_id": [1, "North"], "state": "in_progress"})),
            with(project(2, "B", None, 0.0, 0.0), json!({"farm_id": [1, "North"], "state": "completed"})),
            with(project(3, "C", None, 0.0, 0.0), json!({"farm_id": [1, "North"], "state": "planned"})),
            with(project(4, "D", None, 0.0, 0.0), json!({"farm_id": [2, "South"], "state": "cancelled"})),
            project(5, "E", None, 0.0, 0.0),
        ]
    }

    #[test]
    fn counts_open_projects_per_farm() {
        let s = summarize_farms(&[farm(1, "North", 45.0), farm(2, "South", 20.0)], &projects());
        assert_eq!(s.rows.len(), 2);
        assert_eq!(s.rows[0].active_projects, 2);
        assert_eq!(s.rows[1].active_projects, 0);
        assert_eq!(s.rows[1].name, "South");
        assert_eq!(s.total_area, 65.0);
    }

    #[test]
    fn farm_without_projects_still_listed() {
        let s = summarize_farms(&[farm(7, "Empty", 0.0)], &[]);
        assert_eq!(s.rows[0].active_projects, 0);
        assert_eq!(s.total_area, 0.0);
    }

    #[test]
    fn summarizing_twice_is_identical() {
        let farms = [farm(1, "North", 45.0), farm(2, "South", 20.0)];
        assert_eq!(summarize_farms(&farms, &projects()), summarize_farms(&farms, &projects()));
    }
}
