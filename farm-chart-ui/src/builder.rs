//! Builds one [`ChartSpec`] per enabled slot from a [`DashboardSummary`].

use crate::navigation::NavTarget;
use crate::palette::{self, cycle};
use crate::slot::ChartSlot;
use crate::spec::{ChartOptions, ChartSpec, ChartType, ClickMapping, Colors, Dataset, IndexAxis, Position, Scale};
use farm_data::{
    ActivitySummary, CostSummary, CostTrend, DashboardSummary, FarmSummary, IrrigationSummary, OverviewSummary,
    ProductUsage, ResourceSummary, YieldSummary,
};

pub const TOP_PRODUCTS: usize = 10;

/// Specs for every section present in `summary`, in [`ChartSlot::ALL`]
/// order. Overview, farm and activity charts are always built; a section
/// missing from the summary was switched off.
pub fn build_charts(summary: &DashboardSummary) -> Vec<ChartSpec> {
    let mut specs = vec![
        stage_chart(&summary.overview),
        crop_chart(&summary.overview),
        farm_chart(&summary.farms),
    ];
    if let Some(cost) = &summary.cost {
        specs.push(cost_chart(cost));
        specs.push(budget_chart(cost));
    }
    if let Some(trend) = &summary.cost_trend {
        specs.push(cost_trend_chart(trend));
    }
    if let Some(yields) = &summary.yields {
        specs.push(yield_chart(yields));
    }
    if let Some(irrigation) = &summary.irrigation {
        specs.push(irrigation_chart(irrigation));
    }
    if let Some(resources) = &summary.resources {
        specs.push(category_chart(resources));
        specs.push(product_chart(resources));
    }
    specs.push(activity_chart(&summary.activity));
    log::info!("[farm] builder: built {} chart specs", specs.len());
    specs
}

pub(crate) fn radial(
    slot: ChartSlot,
    chart_type: ChartType,
    title: &str,
    labels: Vec<String>,
    data: Vec<f64>,
    colors: &[&str],
    clicks: ClickMapping,
) -> ChartSpec {
    let background = Colors::PerPoint(cycle(colors, data.len()));
    ChartSpec {
        slot,
        chart_type,
        title: title.to_string(),
        labels,
        datasets: vec![Dataset::new(title, data, background)],
        options: ChartOptions {
            legend: Position::Right,
            ..ChartOptions::default()
        },
        clicks,
    }
}

pub fn stage_chart(overview: &OverviewSummary) -> ChartSpec {
    let stages = &overview.stage_counts;
    radial(
        ChartSlot::ProjectStage,
        ChartType::Doughnut,
        "Projects by Stage",
        stages.iter().map(|s| s.label.clone()).collect(),
        stages.iter().map(|s| s.count as f64).collect(),
        palette::SLICES,
        stages.iter().map(|s| Some(NavTarget::ProjectsInState(s.state))).collect(),
    )
}

pub fn crop_chart(overview: &OverviewSummary) -> ChartSpec {
    let crops = &overview.crop_counts;
    radial(
        ChartSlot::ProjectCrop,
        ChartType::Pie,
        "Projects by Crop",
        crops.iter().map(|c| c.name.clone()).collect(),
        crops.iter().map(|c| c.count as f64).collect(),
        palette::CROP_SLICES,
        crops.iter().map(|c| Some(NavTarget::Crop(c.crop_id))).collect(),
    )
}

pub fn cost_chart(cost: &CostSummary) -> ChartSpec {
    radial(
        ChartSlot::CostDistribution,
        ChartType::Doughnut,
        "Cost Distribution",
        cost.cost_by_type.keys().map(|t| t.label().to_string()).collect(),
        cost.cost_by_type.values().collect(),
        palette::SLICES,
        cost.cost_by_type.keys().map(|t| Some(NavTarget::CostEntries(Some(*t)))).collect(),
    )
}

pub fn farm_chart(farms: &FarmSummary) -> ChartSpec {
    let rows = &farms.rows;
    farm_spec(
        rows.iter().map(|r| r.name.clone()).collect(),
        rows.iter().map(|r| r.area).collect(),
        rows.iter().map(|r| r.active_projects as f64).collect(),
        rows.iter().map(|r| Some(NavTarget::Farm(r.farm_id))).collect(),
    )
}

/// Area against the left axis, open project counts against the right one.
pub(crate) fn farm_spec(labels: Vec<String>, area: Vec<f64>, active: Vec<f64>, clicks: ClickMapping) -> ChartSpec {
    ChartSpec {
        slot: ChartSlot::FarmStats,
        chart_type: ChartType::Bar,
        title: "Farm Statistics".into(),
        labels,
        datasets: vec![
            Dataset::new("Total Area (hectares)", area, Colors::Single(palette::TEAL.into()))
                .with_border(palette::TEAL_BORDER)
                .on_axis("y"),
            Dataset::new("Active Projects", active, Colors::Single(palette::BLUE.into()))
                .with_border(palette::BLUE_BORDER)
                .on_axis("y1"),
        ],
        options: ChartOptions {
            scales: vec![
                Scale {
                    title: Some("Hectares".into()),
                    ..Scale::value_axis("y")
                },
                Scale {
                    position: Position::Right,
                    title: Some("Projects".into()),
                    grid: false,
                    ..Scale::value_axis("y1")
                },
            ],
            ..ChartOptions::default()
        },
        clicks,
    }
}

/// Two datasets side by side over the same labels.
fn paired_bars(
    slot: ChartSlot,
    title: &str,
    labels: Vec<String>,
    first: Dataset,
    second: Dataset,
    y_title: &str,
    clicks: ClickMapping,
) -> ChartSpec {
    ChartSpec {
        slot,
        chart_type: ChartType::Bar,
        title: title.to_string(),
        labels,
        datasets: vec![first, second],
        options: ChartOptions {
            scales: vec![Scale {
                title: Some(y_title.to_string()),
                ..Scale::value_axis("y")
            }],
            ..ChartOptions::default()
        },
        clicks,
    }
}

pub fn budget_chart(cost: &CostSummary) -> ChartSpec {
    let rows = &cost.budget_vs_actual;
    budget_spec(
        rows.iter().map(|r| r.project_name.clone()).collect(),
        rows.iter().map(|r| r.budget).collect(),
        rows.iter().map(|r| r.actual).collect(),
        rows.iter().map(|r| Some(NavTarget::Project(r.project_id))).collect(),
    )
}

pub(crate) fn budget_spec(labels: Vec<String>, budget: Vec<f64>, actual: Vec<f64>, clicks: ClickMapping) -> ChartSpec {
    paired_bars(
        ChartSlot::BudgetActual,
        "Budget vs Actual Cost",
        labels,
        Dataset::new("Budget", budget, Colors::Single(palette::BLUE.into())).with_border(palette::BLUE_BORDER),
        Dataset::new("Actual", actual, Colors::Single(palette::RED.into())).with_border(palette::RED_BORDER),
        "Amount",
        clicks,
    )
}

pub fn cost_trend_chart(trend: &CostTrend) -> ChartSpec {
    let points = &trend.points;
    cost_trend_spec(
        points.iter().map(|p| p.date.format("%Y-%m-%d").to_string()).collect(),
        points.iter().map(|p| p.actual).collect(),
        points.iter().map(|p| p.budgeted).collect(),
    )
}

/// Every point opens the full cost entry list.
pub(crate) fn cost_trend_spec(labels: Vec<String>, actual: Vec<f64>, budgeted: Vec<f64>) -> ChartSpec {
    let clicks = labels.iter().map(|_| Some(NavTarget::CostEntries(None))).collect();
    ChartSpec {
        slot: ChartSlot::CostTrend,
        chart_type: ChartType::Line,
        title: "Cost Analysis".into(),
        labels,
        datasets: vec![
            Dataset::new("Actual Costs", actual, Colors::Single(palette::RED.into())).with_border(palette::RED_BORDER),
            Dataset::new("Budgeted Costs", budgeted, Colors::Single(palette::BLUE.into()))
                .with_border(palette::BLUE_BORDER),
        ],
        options: ChartOptions {
            scales: vec![Scale {
                title: Some("Amount".into()),
                ..Scale::value_axis("y")
            }],
            ..ChartOptions::default()
        },
        clicks,
    }
}

pub fn yield_chart(yields: &YieldSummary) -> ChartSpec {
    let rows = &yields.rows;
    yield_spec(
        rows.iter().map(|r| r.project_name.clone()).collect(),
        rows.iter().map(|r| r.planned_yield).collect(),
        rows.iter().map(|r| r.actual_yield).collect(),
        rows.iter().map(|r| Some(NavTarget::Project(r.project_id))).collect(),
    )
}

pub(crate) fn yield_spec(labels: Vec<String>, planned: Vec<f64>, actual: Vec<f64>, clicks: ClickMapping) -> ChartSpec {
    paired_bars(
        ChartSlot::YieldComparison,
        "Planned vs Actual Yield",
        labels,
        Dataset::new("Planned Yield", planned, Colors::Single(palette::TEAL.into())).with_border(palette::TEAL_BORDER),
        Dataset::new("Actual Yield", actual, Colors::Single(palette::YELLOW.into()))
            .with_border(palette::YELLOW_BORDER),
        "Yield",
        clicks,
    )
}

pub fn irrigation_chart(irrigation: &IrrigationSummary) -> ChartSpec {
    let rows = &irrigation.by_project;
    irrigation_spec(
        rows.iter().map(|r| r.project_name.clone()).collect(),
        rows.iter().map(|r| r.total_irrigation_hours).collect(),
        rows.iter().map(|r| r.irrigation_count as f64).collect(),
        rows.iter().map(|r| Some(NavTarget::Project(r.project_id))).collect(),
    )
}

/// Hours as bars on the primary axis, counts as a line on a secondary one.
pub(crate) fn irrigation_spec(labels: Vec<String>, hours: Vec<f64>, counts: Vec<f64>, clicks: ClickMapping) -> ChartSpec {
    ChartSpec {
        slot: ChartSlot::Irrigation,
        chart_type: ChartType::Bar,
        title: "Irrigation by Project".into(),
        labels,
        datasets: vec![
            Dataset::new("Total Hours", hours, Colors::Single(palette::BLUE.into()))
                .with_border(palette::BLUE_BORDER)
                .on_axis("y"),
            Dataset::new("Number of Irrigations", counts, Colors::Single(palette::PURPLE.into()))
                .with_border(palette::PURPLE_BORDER)
                .with_type(ChartType::Line)
                .on_axis("y1"),
        ],
        options: ChartOptions {
            scales: vec![
                Scale {
                    title: Some("Hours".into()),
                    ..Scale::value_axis("y")
                },
                Scale {
                    position: Position::Right,
                    title: Some("Count".into()),
                    grid: false,
                    ..Scale::value_axis("y1")
                },
            ],
            ..ChartOptions::default()
        },
        clicks,
    }
}

pub fn category_chart(resources: &ResourceSummary) -> ChartSpec {
    let usage = &resources.usage_by_category;
    radial(
        ChartSlot::ResourceCategory,
        ChartType::Doughnut,
        "Resource Usage by Category",
        usage.keys().cloned().collect(),
        usage.values().collect(),
        palette::CATEGORY_SLICES,
        ClickMapping::none(),
    )
}

/// Products ordered by quantity, largest first. Ties keep aggregation order.
pub fn top_products(usage: &[ProductUsage], limit: usize) -> Vec<&ProductUsage> {
    let mut ranked: Vec<&ProductUsage> = usage.iter().collect();
    ranked.sort_by(|a, b| b.quantity.total_cmp(&a.quantity));
    ranked.truncate(limit);
    ranked
}

pub fn product_chart(resources: &ResourceSummary) -> ChartSpec {
    let top = top_products(&resources.usage_by_product, TOP_PRODUCTS);
    product_spec(
        top.iter().map(|p| p.name.clone()).collect(),
        top.iter().map(|p| p.quantity).collect(),
        top.iter().map(|p| Some(NavTarget::Product(p.product_id))).collect(),
    )
}

pub(crate) fn product_spec(labels: Vec<String>, data: Vec<f64>, clicks: ClickMapping) -> ChartSpec {
    ChartSpec {
        slot: ChartSlot::ResourceProduct,
        chart_type: ChartType::Bar,
        title: "Top Products Used".into(),
        labels,
        datasets: vec![Dataset::new("Quantity Used", data, Colors::Single(palette::TEAL.into()))
            .with_border(palette::TEAL_BORDER)],
        options: ChartOptions {
            index_axis: IndexAxis::Y,
            scales: vec![Scale::value_axis("x")],
            ..ChartOptions::default()
        },
        clicks,
    }
}

pub fn activity_chart(activity: &ActivitySummary) -> ChartSpec {
    let days = &activity.days;
    activity_spec(
        days.iter().map(|d| d.date.format("%m/%d").to_string()).collect(),
        days.iter().map(|d| d.daily_reports as f64).collect(),
        days.iter().map(|d| d.cost_entries as f64).collect(),
    )
}

pub(crate) fn activity_spec(labels: Vec<String>, reports: Vec<f64>, costs: Vec<f64>) -> ChartSpec {
    let clicks = labels.iter().map(|_| Some(NavTarget::DailyReports)).collect();
    paired_bars(
        ChartSlot::RecentActivity,
        "Recent Activity",
        labels,
        Dataset::new("Daily Reports", reports, Colors::Single(palette::TEAL.into())).with_border(palette::TEAL_BORDER),
        Dataset::new("Cost Entries", costs, Colors::Single(palette::PURPLE.into()))
            .with_border(palette::PURPLE_BORDER),
        "Records",
        clicks,
    )
}
