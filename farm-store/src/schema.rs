//! SQL schema definitions for the in-memory SQLite record store.
//!
//! Each table backs one store entity. Reference columns (`*_id`) point at the
//! `id` of another table whose `name` column supplies the display name.
//! Dates are stored as `YYYY-MM-DD` text so range conditions compare lexically.

/// Returns the full SQL schema as a single batch string.
///
/// This creates the following tables:
///
/// **Reference tables:** `farms` (id, name, area), `crops`, `products` (id, name)
///
/// **Operational tables:**
/// - `projects` - Cultivation projects with budget, yield and lifecycle state
/// - `cost_entries` - Costs booked against a project
/// - `daily_reports` - Field operation reports (irrigation carries a duration)
/// - `report_lines` - Products consumed by a daily report
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS farms (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        area REAL
    );

    CREATE TABLE IF NOT EXISTS crops (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS projects (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        farm_id INTEGER,
        crop_id INTEGER,
        field_area REAL,
        budget REAL,
        actual_cost REAL,
        revenue REAL,
        profit REAL,
        planned_yield REAL,
        actual_yield REAL,
        yield_quality TEXT,
        state TEXT NOT NULL DEFAULT 'draft',
        start_date TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_projects_start ON projects(start_date);

    CREATE TABLE IF NOT EXISTS cost_entries (
        id INTEGER PRIMARY KEY,
        project_id INTEGER,
        cost_type TEXT NOT NULL,
        cost_amount REAL,
        date TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_costs_project ON cost_entries(project_id);

    CREATE TABLE IF NOT EXISTS daily_reports (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        project_id INTEGER,
        operation_type TEXT,
        date TEXT,
        irrigation_duration REAL
    );
    CREATE INDEX IF NOT EXISTS idx_reports_project ON daily_reports(project_id);

    CREATE TABLE IF NOT EXISTS report_lines (
        id INTEGER PRIMARY KEY,
        report_id INTEGER,
        product_id INTEGER,
        quantity REAL
    );
    CREATE INDEX IF NOT EXISTS idx_lines_report ON report_lines(report_id);
    "#
}
