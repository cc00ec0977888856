//! Portfolio-wide totals, lifecycle stage counts and crop distribution.

use crate::ratio::percentage;
use farm_core::{Project, ProjectState, RecordId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageCount {
    pub state: ProjectState,
    pub label: String,
    pub count: usize,
}

/// Projects per crop. `crop_id` is the first crop seen under this name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropCount {
    pub crop_id: RecordId,
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewSummary {
    pub total_projects: usize,
    pub total_area: f64,
    pub total_budget: f64,
    pub total_cost: f64,
    pub total_revenue: f64,
    pub total_profit: f64,
    pub budget_usage_percentage: f64,
    pub profit_margin: f64,
    /// Always one entry per [`ProjectState`], in enumeration order.
    pub stage_counts: Vec<StageCount>,
    pub crop_counts: Vec<CropCount>,
}

impl Default for OverviewSummary {
    fn default() -> Self {
        summarize_overview(&[])
    }
}

pub fn summarize_overview(projects: &[Project]) -> OverviewSummary {
    let total_area: f64 = projects.iter().map(|p| p.field_area).sum();
    let total_budget: f64 = projects.iter().map(|p| p.budget).sum();
    let total_cost: f64 = projects.iter().map(|p| p.actual_cost).sum();
    let total_revenue: f64 = projects.iter().map(|p| p.revenue).sum();
    let total_profit: f64 = projects.iter().map(|p| p.profit).sum();

    let stage_counts = ProjectState::ALL
        .iter()
        .map(|&state| StageCount {
            state,
            label: state.label().to_string(),
            count: projects.iter().filter(|p| p.state == state).count(),
        })
        .collect();

    let mut crop_counts: Vec<CropCount> = Vec::new();
    for crop in projects.iter().filter_map(|p| p.crop.as_ref()) {
        match crop_counts.iter_mut().find(|c| c.name == crop.display_name) {
            Some(existing) => existing.count += 1,
            None => crop_counts.push(CropCount {
                crop_id: crop.id,
                name: crop.display_name.clone(),
                count: 1,
            }),
        }
    }

    OverviewSummary {
        total_projects: projects.len(),
        total_area,
        total_budget,
        total_cost,
        total_revenue,
        total_profit,
        budget_usage_percentage: percentage(total_cost, total_budget),
        profit_margin: percentage(total_profit, total_revenue),
        stage_counts,
        crop_counts,
    }
}
