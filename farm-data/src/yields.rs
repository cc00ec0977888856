//! Planned versus actual yield.

use crate::ratio::percentage;
use farm_core::{Project, RecordId, YieldQuality};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldRow {
    pub project_id: RecordId,
    pub project_name: String,
    pub crop_name: String,
    pub planned_yield: f64,
    pub actual_yield: f64,
    pub yield_variance: f64,
    pub yield_variance_percentage: f64,
    pub yield_quality: Option<YieldQuality>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct YieldSummary {
    /// Only projects with some yield recorded.
    pub rows: Vec<YieldRow>,
    pub total_planned_yield: f64,
    pub total_actual_yield: f64,
    pub total_yield_variance: f64,
}

pub fn summarize_yields(projects: &[Project]) -> YieldSummary {
    let rows = projects
        .iter()
        .filter(|p| p.has_yield_data())
        .map(|p| {
            let yield_variance = p.actual_yield - p.planned_yield;
            YieldRow {
                project_id: p.id,
                project_name: p.name.clone(),
                crop_name: p.crop_name().to_string(),
                planned_yield: p.planned_yield,
                actual_yield: p.actual_yield,
                yield_variance,
                yield_variance_percentage: percentage(yield_variance, p.planned_yield),
                yield_quality: p.yield_quality,
            }
        })
        .collect();

    let total_planned_yield: f64 = projects.iter().map(|p| p.planned_yield).sum();
    let total_actual_yield: f64 = projects.iter().map(|p| p.actual_yield).sum();

    YieldSummary {
        rows,
        total_planned_yield,
        total_actual_yield,
        total_yield_variance: total_actual_yield - total_planned_yield,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{project, with};
    use serde_json::json;

    #[test]
    fn rows_only_for_projects_with_yield() {
        let projects = vec![
            with(
                project(1, "Maize", Some((1, "Maize")), 0.0, 0.0),
                json!({"planned_yield": 20, "actual_yield": 25, "yield_quality": "good"}),
            ),
            project(2, "Idle", None, 0.0, 0.0),
            with(project(3, "Late", None, 0.0, 0.0), json!({"actual_yield": 4})),
        ];
        let s = summarize_yields(&projects);
        assert_eq!(s.rows.len(), 2);
        assert_eq!(s.rows[0].crop_name, "Maize");
        assert!((s.rows[0].yield_variance_percentage - 25.0).abs() < 0.01);
        assert_eq!(s.rows[0].yield_quality, Some(YieldQuality::Good));
        assert_eq!(s.rows[1].crop_name, "");
        assert_eq!(s.rows[1].yield_variance_percentage, 0.0);
        assert!((s.total_yield_variance - 9.0).abs() < 0.01);
    }

    #[test]
    fn same_projects_same_yields() {
        let projects = vec![
            with(project(1, "Maize", None, 0.0, 0.0), json!({"planned_yield": 20, "actual_yield": 18})),
            with(project(2, "Wheat", None, 0.0, 0.0), json!({"planned_yield": 40, "actual_yield": 44})),
        ];
        assert_eq!(summarize_yields(&projects), summarize_yields(&projects));
    }
}
