//! The fixed set of chart positions on the dashboard.

use farm_data::SectionToggles;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartSlot {
    ProjectStage,
    ProjectCrop,
    FarmStats,
    CostDistribution,
    BudgetActual,
    CostTrend,
    YieldComparison,
    Irrigation,
    ResourceCategory,
    ResourceProduct,
    RecentActivity,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 11] = [
        ChartSlot::ProjectStage,
        ChartSlot::ProjectCrop,
        ChartSlot::FarmStats,
        ChartSlot::CostDistribution,
        ChartSlot::BudgetActual,
        ChartSlot::CostTrend,
        ChartSlot::YieldComparison,
        ChartSlot::Irrigation,
        ChartSlot::ResourceCategory,
        ChartSlot::ResourceProduct,
        ChartSlot::RecentActivity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartSlot::ProjectStage => "project-stage",
            ChartSlot::ProjectCrop => "project-crop",
            ChartSlot::FarmStats => "farm-stats",
            ChartSlot::CostDistribution => "cost-distribution",
            ChartSlot::BudgetActual => "budget-actual",
            ChartSlot::CostTrend => "cost-trend",
            ChartSlot::YieldComparison => "yield-comparison",
            ChartSlot::Irrigation => "irrigation",
            ChartSlot::ResourceCategory => "resource-category",
            ChartSlot::ResourceProduct => "resource-product",
            ChartSlot::RecentActivity => "recent-activity",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.as_str() == s)
    }

    /// Surface the host page binds this chart to unless configured otherwise.
    pub fn default_surface(&self) -> &'static str {
        match self {
            ChartSlot::ProjectStage => "projectStageChart",
            ChartSlot::ProjectCrop => "projectCropChart",
            ChartSlot::FarmStats => "farmStatsChart",
            ChartSlot::CostDistribution => "costDistributionChart",
            ChartSlot::BudgetActual => "budgetActualChart",
            ChartSlot::CostTrend => "costTrendChart",
            ChartSlot::YieldComparison => "yieldComparisonChart",
            ChartSlot::Irrigation => "irrigationChart",
            ChartSlot::ResourceCategory => "resourceCategoryChart",
            ChartSlot::ResourceProduct => "resourceProductChart",
            ChartSlot::RecentActivity => "recentActivityChart",
        }
    }

    /// Whether the section this chart belongs to is switched on.
    /// Overview, farm and activity charts are always shown.
    pub fn is_enabled(&self, toggles: &SectionToggles) -> bool {
        match self {
            ChartSlot::ProjectStage | ChartSlot::ProjectCrop | ChartSlot::FarmStats | ChartSlot::RecentActivity => {
                true
            }
            ChartSlot::CostDistribution | ChartSlot::BudgetActual | ChartSlot::CostTrend => toggles.show_cost_analysis,
            ChartSlot::YieldComparison => toggles.show_yield_comparison,
            ChartSlot::Irrigation => toggles.show_irrigation_stats,
            ChartSlot::ResourceCategory | ChartSlot::ResourceProduct => toggles.show_resource_usage,
        }
    }
}

impl fmt::Display for ChartSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
