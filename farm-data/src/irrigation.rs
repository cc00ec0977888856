//! Irrigation hours and event counts per project.

use farm_core::{DailyReport, Project, RecordId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrrigationRow {
    pub project_id: RecordId,
    pub project_name: String,
    pub crop_name: String,
    pub total_irrigation_hours: f64,
    pub irrigation_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IrrigationSummary {
    pub total_irrigation_hours: f64,
    pub total_irrigation_count: usize,
    pub by_project: Vec<IrrigationRow>,
}

/// Group irrigation reports by project, in the order projects first appear
/// among the reports.
///
/// Reports without a project, or whose project is not in `projects`, are left
/// out of `by_project` but still counted in both totals.
pub fn summarize_irrigation(reports: &[DailyReport], projects: &[Project]) -> IrrigationSummary {
    let mut groups: Vec<(RecordId, f64, usize)> = Vec::new();
    for report in reports {
        let Some(project) = &report.project else {
            continue;
        };
        match groups.iter_mut().find(|(id, _, _)| *id == project.id) {
            Some((_, hours, count)) => {
                *hours += report.duration;
                *count += 1;
            }
            None => groups.push((project.id, report.duration, 1)),
        }
    }

    let by_project: Vec<IrrigationRow> = groups
        .into_iter()
        .filter_map(|(id, hours, count)| {
            let project = projects.iter().find(|p| p.id == id)?;
            Some(IrrigationRow {
                project_id: id,
                project_name: project.name.clone(),
                crop_name: project.crop_name().to_string(),
                total_irrigation_hours: hours,
                irrigation_count: count,
            })
        })
        .collect();

    let dropped = reports.len() - by_project.iter().map(|r| r.irrigation_count).sum::<usize>();
    if dropped > 0 {
        log::debug!("[farm] irrigation: {} reports without a listed project", dropped);
    }

    IrrigationSummary {
        total_irrigation_hours: reports.iter().map(|r| r.duration).sum(),
        total_irrigation_count: reports.len(),
        by_project,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{irrigation, project};

    #[test]
    fn groups_by_project_in_first_seen_order() {
        let projects = vec![
            project(1, "Maize", Some((1, "Maize")), 0.0, 0.0),
            project(2, "Rice", Some((3, "Rice")), 0.0, 0.0),
        ];
        let reports = vec![
            irrigation(1, Some(2), 4.0),
            irrigation(2, Some(1), 2.5),
            irrigation(3, Some(2), 1.0),
        ];
        let s = summarize_irrigation(&reports, &projects);
        assert_eq!(s.by_project.len(), 2);
        assert_eq!(s.by_project[0].project_name, "Rice");
        assert!((s.by_project[0].total_irrigation_hours - 5.0).abs() < 0.01);
        assert_eq!(s.by_project[0].irrigation_count, 2);
        assert_eq!(s.by_project[1].crop_name, "Maize");
    }

    #[test]
    fn orphan_reports_count_toward_totals_only() {
        let projects = vec![project(1, "Maize", None, 0.0, 0.0)];
        let reports = vec![
            irrigation(1, Some(1), 2.0),
            irrigation(2, None, 3.0),
            irrigation(3, Some(99), 1.5),
        ];
        let s = summarize_irrigation(&reports, &projects);
        assert_eq!(s.by_project.len(), 1);
        assert_eq!(s.total_irrigation_count, 3);
        assert!((s.total_irrigation_hours - 6.5).abs() < 0.01);
    }

    #[test]
    fn no_reports() {
        let s = summarize_irrigation(&[], &[]);
        assert_eq!(s, IrrigationSummary::default());
    }

    #[test]
    fn same_reports_same_summary() {
        let projects = vec![project(1, "Maize", None, 0.0, 0.0), project(2, "Rice", None, 0.0, 0.0)];
        let reports = vec![irrigation(1, Some(2), 4.0), irrigation(2, Some(1), 2.5), irrigation(3, None, 1.0)];
        assert_eq!(
            summarize_irrigation(&reports, &projects),
            summarize_irrigation(&reports, &projects)
        );
    }
}
