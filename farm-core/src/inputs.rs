use crate::{CostEntry, DailyReport, Farm, Project, ReportLine};
use serde::{Deserialize, Serialize};

/// Raw records for one refresh, as produced by the fetcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardInputs {
    pub projects: Vec<Project>,
    pub cost_entries: Vec<CostEntry>,
    /// Daily reports whose operation type is irrigation.
    pub irrigation_reports: Vec<DailyReport>,
    /// Every daily report for the selected projects.
    pub reports: Vec<DailyReport>,
    pub report_lines: Vec<ReportLine>,
    /// Farms in the farm selection, or every farm when none is selected.
    /// Empty when no project matches the filter.
    #[serde(default)]
    pub farms: Vec<Farm>,
}

impl DashboardInputs {
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
