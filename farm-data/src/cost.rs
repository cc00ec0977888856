//! Cost distribution by type and budget versus actual per project.

use crate::ratio::percentage;
use crate::tally::Tally;
use farm_core::{CostEntry, CostType, Project, RecordId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetRow {
    pub project_id: RecordId,
    pub project_name: String,
    pub budget: f64,
    pub actual: f64,
    /// `budget - actual`; negative when over budget.
    pub variance: f64,
    pub variance_percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CostSummary {
    pub cost_by_type: Tally<CostType>,
    pub budget_vs_actual: Vec<BudgetRow>,
    pub total_budget: f64,
    pub total_actual: f64,
    pub total_variance: f64,
}

/// Totals come from the project list; cost entries only feed `cost_by_type`.
pub fn summarize_costs(entries: &[CostEntry], projects: &[Project]) -> CostSummary {
    let cost_by_type = entries.iter().map(|e| (e.cost_type, e.amount)).collect();

    let budget_vs_actual = projects
        .iter()
        .map(|p| {
            let variance = p.budget - p.actual_cost;
            BudgetRow {
                project_id: p.id,
                project_name: p.name.clone(),
                budget: p.budget,
                actual: p.actual_cost,
                variance,
                variance_percentage: percentage(variance, p.budget),
            }
        })
        .collect();

    let total_budget: f64 = projects.iter().map(|p| p.budget).sum();
    let total_actual: f64 = projects.iter().map(|p| p.actual_cost).sum();

    CostSummary {
        cost_by_type,
        budget_vs_actual,
        total_budget,
        total_actual,
        total_variance: total_budget - total_actual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{cost, project};

    #[test]
    fn budget_versus_actual_per_project() {
        let projects = vec![
            project(1, "A", None, 1000.0, 800.0),
            project(2, "B", None, 500.0, 600.0),
        ];
        let s = summarize_costs(&[], &projects);

        assert!((s.budget_vs_actual[0].variance - 200.0).abs() < 0.01);
        assert!((s.budget_vs_actual[0].variance_percentage - 20.0).abs() < 0.01);
        assert!((s.budget_vs_actual[1].variance + 100.0).abs() < 0.01);
        assert!((s.budget_vs_actual[1].variance_percentage + 20.0).abs() < 0.01);
        assert!((s.total_budget - 1500.0).abs() < 0.01);
        assert!((s.total_actual - 1400.0).abs() < 0.01);
        assert!((s.total_variance - 100.0).abs() < 0.01);
    }

    #[test]
    fn zero_budget_has_zero_variance_percentage() {
        let s = summarize_costs(&[], &[project(1, "A", None, 0.0, 250.0)]);
        assert_eq!(s.budget_vs_actual[0].variance_percentage, 0.0);
        assert!((s.budget_vs_actual[0].variance + 250.0).abs() < 0.01);
    }

    #[test]
    fn costs_grouped_by_type_in_first_seen_order() {
        let entries = vec![
            cost(1, 1, "water", 100.0),
            cost(2, 1, "seeds", 50.0),
            cost(3, 2, "water", 25.0),
        ];
        let s = summarize_costs(&entries, &[]);
        let keys: Vec<CostType> = s.cost_by_type.keys().copied().collect();
        assert_eq!(keys, vec![CostType::Water, CostType::Seeds]);
        assert_eq!(s.cost_by_type.get(&CostType::Water), Some(125.0));
        assert_eq!(s.total_budget, 0.0);
    }

    #[test]
    fn same_input_same_summary() {
        let projects = vec![project(1, "A", None, 10.0, 5.0)];
        let entries = vec![cost(1, 1, "labor", 5.0)];
        assert_eq!(summarize_costs(&entries, &projects), summarize_costs(&entries, &projects));
    }
}
