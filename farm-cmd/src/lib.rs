//! Command implementations for the farm CLI.
//!
//! Provides subcommands for rendering the dashboard in a terminal, dumping
//! the aggregated summary as JSON and listing the filter picker options,
//! against CSV fixtures or (feature `rpc`) a remote record store.

use clap::{Args, Subcommand};

pub mod dashboard;
pub mod source;
pub mod terminal;

/// Where records are read from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Directory holding farms.csv, crops.csv, products.csv, projects.csv,
    /// cost_entries.csv, daily_reports.csv and report_lines.csv.
    /// Defaults to the bundled sample data.
    #[arg(short = 'f', long)]
    pub fixtures: Option<String>,

    /// Base URL of a remote record store
    #[cfg(feature = "rpc")]
    #[arg(long, conflicts_with = "fixtures")]
    pub url: Option<String>,

    /// Session cookie for the remote record store
    #[cfg(feature = "rpc")]
    #[arg(long, requires = "url")]
    pub session: Option<String>,
}

/// Filter selection. Without any date flag the configured look-back window
/// ending today is used.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Earliest project start date (YYYY-MM-DD)
    #[arg(long)]
    pub date_from: Option<String>,

    /// Latest project start date (YYYY-MM-DD)
    #[arg(long)]
    pub date_to: Option<String>,

    /// Look back this many days from today instead of the configured window
    #[arg(long, conflicts_with_all = ["date_from", "date_to", "all_dates"])]
    pub days: Option<u32>,

    /// Do not restrict by date
    #[arg(long, conflicts_with_all = ["date_from", "date_to"])]
    pub all_dates: bool,

    /// Restrict to these farm ids (repeatable)
    #[arg(long = "farm")]
    pub farms: Vec<i64>,

    /// Restrict to these crop ids (repeatable)
    #[arg(long = "crop")]
    pub crops: Vec<i64>,

    /// Restrict to these project ids (repeatable)
    #[arg(long = "project")]
    pub projects: Vec<i64>,

    /// Dashboard configuration JSON file
    #[arg(short = 'c', long)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render every dashboard chart as text
    Render {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// JSON file of chart seeds keyed by slot, drawn before the fetch
        #[arg(long)]
        seeds: Option<String>,

        /// Simulate a click on a chart element, e.g. `project-stage:2`
        #[arg(long)]
        click: Option<String>,
    },

    /// Print the aggregated dashboard summary as JSON
    Summary {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List the farms, crops and projects available to filter on
    Options {
        #[command(flatten)]
        source: SourceArgs,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Render {
            source,
            filter,
            seeds,
            click,
        } => dashboard::run_render(&source, &filter, seeds.as_deref(), click.as_deref()).await,
        Command::Summary { source, filter } => dashboard::run_summary(&source, &filter).await,
        Command::Options { source } => dashboard::run_options(&source).await,
    }
}
