//! The combined dashboard summary.

use crate::{
    summarize_activity, summarize_cost_trend, summarize_costs, summarize_farms, summarize_irrigation,
    summarize_overview, summarize_resources, summarize_yields, ActivitySummary, ActivityWindow, CostSummary,
    CostTrend, FarmSummary, IrrigationSummary, OverviewSummary, ResourceSummary, YieldSummary,
};
use farm_core::{DashboardInputs, SummaryCards};
use serde::{Deserialize, Serialize};

/// Which optional dashboard sections are computed and charted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionToggles {
    pub show_cost_analysis: bool,
    pub show_yield_comparison: bool,
    pub show_irrigation_stats: bool,
    pub show_resource_usage: bool,
}

impl Default for SectionToggles {
    fn default() -> Self {
        Self {
            show_cost_analysis: true,
            show_yield_comparison: true,
            show_irrigation_stats: true,
            show_resource_usage: true,
        }
    }
}

/// Everything the charts are built from. A disabled section is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Counted by the store, see [`DashboardSummary::with_cards`].
    pub cards: SummaryCards,
    pub overview: OverviewSummary,
    pub farms: FarmSummary,
    pub activity: ActivitySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<CostSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_trend: Option<CostTrend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yields: Option<YieldSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irrigation: Option<IrrigationSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceSummary>,
}

impl DashboardSummary {
    pub fn with_cards(self, cards: SummaryCards) -> Self {
        Self { cards, ..self }
    }
}

/// Cards stay zeroed until [`DashboardSummary::with_cards`] fills them in.
pub fn summarize(inputs: &DashboardInputs, toggles: &SectionToggles, window: ActivityWindow) -> DashboardSummary {
    let projects = &inputs.projects;
    DashboardSummary {
        cards: SummaryCards::default(),
        overview: summarize_overview(projects),
        farms: summarize_farms(&inputs.farms, projects),
        activity: summarize_activity(&inputs.reports, &inputs.cost_entries, window),
        cost: toggles
            .show_cost_analysis
            .then(|| summarize_costs(&inputs.cost_entries, projects)),
        cost_trend: toggles
            .show_cost_analysis
            .then(|| summarize_cost_trend(&inputs.cost_entries)),
        yields: toggles
            .show_yield_comparison
            .then(|| summarize_yields(projects)),
        irrigation: toggles
            .show_irrigation_stats
            .then(|| summarize_irrigation(&inputs.irrigation_reports, projects)),
        resources: toggles
            .show_resource_usage
            .then(|| summarize_resources(&inputs.report_lines)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{cost, dated, farm, irrigation, line, project};
    use chrono::NaiveDate;

    fn window() -> ActivityWindow {
        ActivityWindow {
            from: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            to: NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
        }
    }

    fn inputs() -> DashboardInputs {
        DashboardInputs {
            projects: vec![
                project(1, "A", Some((1, "Maize")), 1000.0, 800.0),
                project(2, "B", None, 500.0, 600.0),
            ],
            cost_entries: vec![dated(
                cost(1, 1, "seeds", 300.0),
                NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            )],
            irrigation_reports: vec![irrigation(1, Some(1), 2.0)],
            reports: Vec::new(),
            report_lines: vec![line(1, Some((1, "Urea")), 4.0)],
            farms: vec![farm(1, "North", 45.0)],
        }
    }

    #[test]
    fn all_sections_by_default() {
        let s = summarize(&inputs(), &SectionToggles::default(), window());
        assert!(s.cost.is_some() && s.yields.is_some() && s.irrigation.is_some() && s.resources.is_some());
        assert_eq!(s.overview.total_projects, 2);
        assert_eq!(s.farms.rows.len(), 1);
        assert_eq!(s.activity.days.len(), 7);
        assert_eq!(s.activity.days[1].cost_entries, 1);
        assert_eq!(s.cost_trend.as_ref().map(|t| t.points.len()), Some(1));
    }

    #[test]
    fn disabled_sections_are_skipped() {
        let toggles = SectionToggles {
            show_cost_analysis: false,
            show_resource_usage: false,
            ..SectionToggles::default()
        };
        let s = summarize(&inputs(), &toggles, window());
        assert!(s.cost.is_none());
        assert!(s.cost_trend.is_none());
        assert!(s.resources.is_none());
        assert!(s.irrigation.is_some());
        let json = serde_json::to_value(&s).unwrap();
        assert!(json.get("cost").is_none());
        assert!(json.get("cost_trend").is_none());
    }

    #[test]
    fn cards_are_attached_after_summarizing() {
        let cards = SummaryCards {
            total_farms: 2,
            active_projects: 3,
            daily_reports: 5,
            total_costs: 1800.0,
        };
        let s = summarize(&inputs(), &SectionToggles::default(), window());
        assert_eq!(s.cards, SummaryCards::default());
        let s = s.with_cards(cards.clone());
        assert_eq!(s.cards, cards);
        assert_eq!(s.overview.total_projects, 2);
    }

    #[test]
    fn summarizing_twice_is_identical() {
        let toggles = SectionToggles::default();
        assert_eq!(summarize(&inputs(), &toggles, window()), summarize(&inputs(), &toggles, window()));
    }

    #[test]
    fn empty_inputs_give_zeroed_summary() {
        let s = summarize(&DashboardInputs::default(), &SectionToggles::default(), window());
        assert_eq!(s.overview.total_projects, 0);
        assert!(s.cost.as_ref().is_some_and(|c| c.budget_vs_actual.is_empty()));
        assert_eq!(s.overview.budget_usage_percentage, 0.0);
    }

    #[test]
    fn toggles_default_when_missing_from_json() {
        let t: SectionToggles = serde_json::from_str(r#"{"show_yield_comparison": false}"#).unwrap();
        assert!(!t.show_yield_comparison);
        assert!(t.show_cost_analysis);
    }
}
