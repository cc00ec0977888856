//! The `render`, `summary` and `options` commands.

use crate::source::{build_filter, load_config, open_store};
use crate::terminal::{TerminalRenderer, DEFAULT_WIDTH};
use crate::{FilterArgs, SourceArgs};
use anyhow::Context;
use chrono::Local;
use farm_chart_ui::{
    BundledLibrary, ChartLibrary, ChartSlot, DashboardController, DashboardStatus, RefreshOutcome, SeedSet,
};
use farm_core::SummaryCards;
use farm_data::{summarize, ActivityWindow};
use farm_store::{fetch_dashboard_inputs, fetch_filter_options, fetch_summary_cards};
use log::info;
use std::rc::Rc;

/// Parse a `slot:index` click such as `budget-actual:0`.
pub fn parse_click(s: &str) -> anyhow::Result<(ChartSlot, usize)> {
    let (slot, index) = s
        .split_once(':')
        .with_context(|| format!("expected <slot>:<index>, got {s:?}"))?;
    let slot = ChartSlot::parse(slot.trim()).with_context(|| format!("unknown chart slot {slot:?}"))?;
    let index = index.trim().parse().with_context(|| format!("bad element index {index:?}"))?;
    Ok((slot, index))
}

pub async fn run_render(
    source: &SourceArgs,
    filter_args: &FilterArgs,
    seeds_path: Option<&str>,
    click: Option<&str>,
) -> anyhow::Result<()> {
    let click = click.map(parse_click).transpose()?;
    let config = load_config(filter_args)?;
    let filter = build_filter(filter_args, &config, Local::now().date_naive())?;
    let store = open_store(source)?;

    let renderer = Rc::new(TerminalRenderer::new(DEFAULT_WIDTH));
    let library = Rc::new(ChartLibrary::new(BundledLibrary {
        name: "terminal",
        version: env!("CARGO_PKG_VERSION"),
    }));
    let controller =
        DashboardController::new(store, library, renderer.clone(), config, Local::now().date_naive())?
            .with_filter(filter)?;

    if let Some(path) = seeds_path {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
        let seeds: SeedSet = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
        if controller.render_seeds(&seeds).await? {
            println!("{}", renderer.take_output());
            info!("Rendered {} seeded charts", controller.live_charts());
        }
    }

    let outcome = controller.on_start().await;
    let state = controller.state();
    if outcome != Some(RefreshOutcome::Applied) || state.status != DashboardStatus::Ready {
        anyhow::bail!(
            "dashboard refresh failed: {}",
            state.error.unwrap_or_else(|| "unknown error".into())
        );
    }
    if let Some(cards) = state.summary.as_ref().map(|s| &s.cards) {
        println!("{}", card_line(cards));
    }
    print!("{}", renderer.take_output());

    if let Some(overview) = state.summary.as_ref().map(|s| &s.overview) {
        println!(
            "projects: {}  area: {}  budget used: {:.1}%  margin: {:.1}%",
            overview.total_projects, overview.total_area, overview.budget_usage_percentage, overview.profit_margin
        );
    }

    if let Some((slot, index)) = click {
        match controller.on_chart_click(slot, index) {
            Some(request) => println!("{}", serde_json::to_string_pretty(&request)?),
            None => println!("{slot}:{index} links nowhere"),
        }
    }

    controller.on_stop();
    Ok(())
}

pub fn card_line(cards: &SummaryCards) -> String {
    format!(
        "farms: {}  active projects: {}  daily reports: {}  total costs: {:.2}",
        cards.total_farms, cards.active_projects, cards.daily_reports, cards.total_costs
    )
}

pub async fn run_summary(source: &SourceArgs, filter_args: &FilterArgs) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let config = load_config(filter_args)?;
    let filter = build_filter(filter_args, &config, today)?;
    let store = open_store(source)?;

    let (inputs, cards) = futures::try_join!(
        fetch_dashboard_inputs(store.as_ref(), &filter),
        fetch_summary_cards(store.as_ref(), &filter)
    )?;
    let window = ActivityWindow::for_filter(&filter, today);
    let summary = summarize(&inputs, &config.sections, window).with_cards(cards);
    info!("Summarized {} projects", summary.overview.total_projects);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

pub async fn run_options(source: &SourceArgs) -> anyhow::Result<()> {
    let store = open_store(source)?;
    let options = fetch_filter_options(store.as_ref()).await?;
    for (title, refs) in [("Farms", &options.farms), ("Crops", &options.crops), ("Projects", &options.projects)] {
        println!("{title}:");
        for r in refs {
            println!("  {:>4}  {}", r.id, r.display_name);
        }
    }
    Ok(())
}
