//! Sample farm data compiled into the binary, used by the CLI when no
//! fixture directory is given and by tests across the workspace.

use crate::Database;

pub const FARMS_CSV: &str = include_str!("../../fixtures/farms.csv");
pub const CROPS_CSV: &str = include_str!("../../fixtures/crops.csv");
pub const PRODUCTS_CSV: &str = include_str!("../../fixtures/products.csv");
pub const PROJECTS_CSV: &str = include_str!("../../fixtures/projects.csv");
pub const COST_ENTRIES_CSV: &str = include_str!("../../fixtures/cost_entries.csv");
pub const DAILY_REPORTS_CSV: &str = include_str!("../../fixtures/daily_reports.csv");
pub const REPORT_LINES_CSV: &str = include_str!("../../fixtures/report_lines.csv");

/// CSV text for every table, in load order.
#[derive(Debug, Clone, Copy)]
pub struct FixtureSet<'a> {
    pub farms: &'a str,
    pub crops: &'a str,
    pub products: &'a str,
    pub projects: &'a str,
    pub cost_entries: &'a str,
    pub daily_reports: &'a str,
    pub report_lines: &'a str,
}

impl FixtureSet<'static> {
    pub fn sample() -> Self {
        Self {
            farms: FARMS_CSV,
            crops: CROPS_CSV,
            products: PRODUCTS_CSV,
            projects: PROJECTS_CSV,
            cost_entries: COST_ENTRIES_CSV,
            daily_reports: DAILY_REPORTS_CSV,
            report_lines: REPORT_LINES_CSV,
        }
    }
}

impl Database {
    /// Load every table from a fixture set.
    pub fn load_fixtures(&self, set: &FixtureSet<'_>) -> anyhow::Result<()> {
        self.load_farms(set.farms)?;
        self.load_crops(set.crops)?;
        self.load_products(set.products)?;
        self.load_projects(set.projects)?;
        self.load_cost_entries(set.cost_entries)?;
        self.load_daily_reports(set.daily_reports)?;
        self.load_report_lines(set.report_lines)?;
        Ok(())
    }

    /// A fresh database holding the bundled sample data.
    pub fn with_sample_data() -> anyhow::Result<Self> {
        let db = Self::new()?;
        db.load_fixtures(&FixtureSet::sample())?;
        Ok(db)
    }
}
