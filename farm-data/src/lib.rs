//! Aggregation of raw farm records into dashboard summaries.
//!
//! Every aggregator is a pure function of its input slices: the same records
//! always produce the same summary, and nothing here performs I/O.

pub mod activity;
pub mod cost;
pub mod farms;
pub mod irrigation;
pub mod overview;
pub mod resource;
pub mod summary;
pub mod tally;
pub mod trend;
pub mod yields;

pub use activity::{summarize_activity, ActivityDay, ActivitySummary, ActivityWindow};
pub use cost::{summarize_costs, BudgetRow, CostSummary};
pub use farms::{summarize_farms, FarmStat, FarmSummary};
pub use irrigation::{summarize_irrigation, IrrigationRow, IrrigationSummary};
pub use overview::{summarize_overview, CropCount, OverviewSummary, StageCount};
pub use resource::{summarize_resources, ProductUsage, ResourceSummary};
pub use summary::{summarize, DashboardSummary, SectionToggles};
pub use tally::Tally;
pub use trend::{summarize_cost_trend, CostTrend, CostTrendPoint, BUDGET_BUFFER};
pub use yields::{summarize_yields, YieldRow, YieldSummary};

/// Ratio helpers guarded against empty denominators.
pub mod ratio {
    /// `part / whole * 100`, or 0 when `whole` is zero.
    pub fn percentage(part: f64, whole: f64) -> f64 {
        if whole == 0.0 || !whole.is_finite() {
            0.0
        } else {
            part / whole * 100.0
        }
    }

}
