//! CSV data loading functions for populating the in-memory SQLite database.
//!
//! Each loader method parses CSV data from a string slice and inserts rows
//! into the corresponding table. All formats carry a header row. Empty cells
//! and the literal `false` are stored as NULL, which the store reports back
//! as `false`.
//!
//! # CSV Formats
//!
//! - **Farms**: `id,name,area` (area may be left out)
//! - **Crops / products**: `id,name`
//! - **Projects**: `id,name,farm_id,crop_id,field_area,budget,actual_cost,revenue,profit,planned_yield,actual_yield,yield_quality,state,start_date`
//! - **Cost entries**: `id,project_id,cost_type,cost_amount,date`
//! - **Daily reports**: `id,name,project_id,operation_type,date,irrigation_duration`
//! - **Report lines**: `id,report_id,product_id,quantity`

use crate::Database;
use farm_utils::dates::{format_date, parse_optional_date};
use rusqlite::params;

fn reader(csv_data: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes())
}

fn cell(r: &csv::StringRecord, i: usize) -> &str {
    r.get(i).unwrap_or("").trim()
}

fn is_unset(s: &str) -> bool {
    s.is_empty() || s == "false"
}

fn opt_i64(s: &str) -> anyhow::Result<Option<i64>> {
    if is_unset(s) {
        return Ok(None);
    }
    Ok(Some(s.parse()?))
}

fn opt_f64(s: &str) -> anyhow::Result<Option<f64>> {
    if is_unset(s) {
        return Ok(None);
    }
    Ok(Some(s.parse()?))
}

fn opt_text(s: &str) -> Option<&str> {
    (!is_unset(s)).then_some(s)
}

/// Normalizes the date to `YYYY-MM-DD`, rejecting anything unparseable.
fn opt_date(s: &str) -> anyhow::Result<Option<String>> {
    Ok(parse_optional_date(s)?.map(|d| format_date(&d)))
}

impl Database {
    fn load_named(&self, table: &str, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = reader(csv_data);
        let sql = format!("INSERT OR REPLACE INTO {table} (id, name) VALUES (?1, ?2)");

        let mut count = 0u32;
        for result in rdr.records() {
            let r = result?;
            let id: i64 = cell(&r, 0).parse()?;
            let name = cell(&r, 1);
            conn.execute(&sql, params![id, name])?;
            count += 1;
        }
        log::info!("[farm] loader: Loaded {} {}", count, table);
        Ok(())
    }

    /// Load farms from CSV string (`id,name,area`).
    pub fn load_farms(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = reader(csv_data);

        let mut count = 0u32;
        for result in rdr.records() {
            let r = result?;
            let id: i64 = cell(&r, 0).parse()?;
            let name = cell(&r, 1);
            let area = opt_f64(cell(&r, 2))?;
            conn.execute(
                "INSERT OR REPLACE INTO farms (id, name, area) VALUES (?1, ?2, ?3)",
                params![id, name, area],
            )?;
            count += 1;
        }
        log::info!("[farm] loader: Loaded {} farms", count);
        Ok(())
    }

    /// Load crops from CSV string (`id,name`).
    pub fn load_crops(&self, csv_data: &str) -> anyhow::Result<()> {
        self.load_named("crops", csv_data)
    }

    /// Load products from CSV string (`id,name`).
    pub fn load_products(&self, csv_data: &str) -> anyhow::Result<()> {
        self.load_named("products", csv_data)
    }

    /// Load cultivation projects from CSV string.
    ///
    /// # Example CSV
    /// ```text
    /// id,name,farm_id,crop_id,field_area,budget,actual_cost,revenue,profit,planned_yield,actual_yield,yield_quality,state,start_date
    /// 1,Spring Maize,1,1,12.5,1000,800,1500,700,20,18,good,in_progress,2024-03-01
    /// ```
    ///
    /// A blank `state` is stored as `draft`. Other values are stored verbatim
    /// and validated when the records are decoded.
    pub fn load_projects(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = reader(csv_data);

        let mut count = 0u32;
        for result in rdr.records() {
            let r = result?;
            let id: i64 = cell(&r, 0).parse()?;
            let name = cell(&r, 1);
            let farm_id = opt_i64(cell(&r, 2))?;
            let crop_id = opt_i64(cell(&r, 3))?;
            let field_area = opt_f64(cell(&r, 4))?;
            let budget = opt_f64(cell(&r, 5))?;
            let actual_cost = opt_f64(cell(&r, 6))?;
            let revenue = opt_f64(cell(&r, 7))?;
            let profit = opt_f64(cell(&r, 8))?;
            let planned_yield = opt_f64(cell(&r, 9))?;
            let actual_yield = opt_f64(cell(&r, 10))?;
            let yield_quality = opt_text(cell(&r, 11));
            let state = opt_text(cell(&r, 12)).unwrap_or("draft");
            let start_date = opt_date(cell(&r, 13))?;

            conn.execute(
                "INSERT OR REPLACE INTO projects
                 (id, name, farm_id, crop_id, field_area, budget, actual_cost, revenue, profit,
                  planned_yield, actual_yield, yield_quality, state, start_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                params![
                    id,
                    name,
                    farm_id,
                    crop_id,
                    field_area,
                    budget,
                    actual_cost,
                    revenue,
                    profit,
                    planned_yield,
                    actual_yield,
                    yield_quality,
                    state,
                    start_date
                ],
            )?;
            count += 1;
        }
        log::info!("[farm] loader: Loaded {} projects", count);
        Ok(())
    }

    /// Load cost entries from CSV string (`id,project_id,cost_type,cost_amount,date`).
    pub fn load_cost_entries(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = reader(csv_data);

        let mut count = 0u32;
        for result in rdr.records() {
            let r = result?;
            let id: i64 = cell(&r, 0).parse()?;
            let project_id = opt_i64(cell(&r, 1))?;
            let cost_type = opt_text(cell(&r, 2)).unwrap_or("other");
            let amount = opt_f64(cell(&r, 3))?;
            let date = opt_date(cell(&r, 4))?;

            conn.execute(
                "INSERT OR REPLACE INTO cost_entries (id, project_id, cost_type, cost_amount, date)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, project_id, cost_type, amount, date],
            )?;
            count += 1;
        }
        log::info!("[farm] loader: Loaded {} cost entries", count);
        Ok(())
    }

    /// Load daily reports from CSV string
    /// (`id,name,project_id,operation_type,date,irrigation_duration`).
    pub fn load_daily_reports(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = reader(csv_data);

        let mut count = 0u32;
        for result in rdr.records() {
            let r = result?;
            let id: i64 = cell(&r, 0).parse()?;
            let name = cell(&r, 1);
            let project_id = opt_i64(cell(&r, 2))?;
            let operation_type = opt_text(cell(&r, 3));
            let date = opt_date(cell(&r, 4))?;
            let duration = opt_f64(cell(&r, 5))?;

            conn.execute(
                "INSERT OR REPLACE INTO daily_reports
                 (id, name, project_id, operation_type, date, irrigation_duration)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![id, name, project_id, operation_type, date, duration],
            )?;
            count += 1;
        }
        log::info!("[farm] loader: Loaded {} daily reports", count);
        Ok(())
    }

    /// Load daily report lines from CSV string (`id,report_id,product_id,quantity`).
    pub fn load_report_lines(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = reader(csv_data);

        let mut count = 0u32;
        for result in rdr.records() {
            let r = result?;
            let id: i64 = cell(&r, 0).parse()?;
            let report_id = opt_i64(cell(&r, 1))?;
            let product_id = opt_i64(cell(&r, 2))?;
            let quantity = opt_f64(cell(&r, 3))?;

            conn.execute(
                "INSERT OR REPLACE INTO report_lines (id, report_id, product_id, quantity)
                 VALUES (?1, ?2, ?3, ?4)",
                params![id, report_id, product_id, quantity],
            )?;
            count += 1;
        }
        log::info!("[farm] loader: Loaded {} report lines", count);
        Ok(())
    }
}
