//! Record store and filter construction from command line arguments.

use crate::{FilterArgs, SourceArgs};
use anyhow::Context;
use chrono::NaiveDate;
use farm_chart_ui::DashboardConfig;
use farm_core::Filter;
use farm_store::fixtures::FixtureSet;
use farm_store::{Database, RecordStore};
use farm_utils::dates::{lookback_window, parse_date};
use std::path::Path;
use std::rc::Rc;

const FIXTURE_FILES: [&str; 7] = [
    "farms.csv",
    "crops.csv",
    "products.csv",
    "projects.csv",
    "cost_entries.csv",
    "daily_reports.csv",
    "report_lines.csv",
];

/// Load a fixture directory into a fresh database.
pub fn load_fixture_dir(dir: &Path) -> anyhow::Result<Database> {
    let mut texts = Vec::with_capacity(FIXTURE_FILES.len());
    for name in FIXTURE_FILES {
        let path = dir.join(name);
        let text = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        texts.push(text);
    }
    let set = FixtureSet {
        farms: &texts[0],
        crops: &texts[1],
        products: &texts[2],
        projects: &texts[3],
        cost_entries: &texts[4],
        daily_reports: &texts[5],
        report_lines: &texts[6],
    };
    let db = Database::new()?;
    db.load_fixtures(&set)?;
    log::info!("[farm] source: loaded fixtures from {}", dir.display());
    Ok(db)
}

#[cfg(feature = "rpc")]
fn remote_store(args: &SourceArgs) -> Option<Rc<dyn RecordStore>> {
    let url = args.url.as_ref()?;
    let mut store = farm_store::RpcStore::new(url.as_str());
    if let Some(session) = &args.session {
        store = store.with_session(session.as_str());
    }
    log::info!("[farm] source: using remote store at {}", url);
    Some(Rc::new(store))
}

#[cfg(not(feature = "rpc"))]
fn remote_store(_args: &SourceArgs) -> Option<Rc<dyn RecordStore>> {
    None
}

pub fn open_store(args: &SourceArgs) -> anyhow::Result<Rc<dyn RecordStore>> {
    if let Some(store) = remote_store(args) {
        return Ok(store);
    }

    let db = match &args.fixtures {
        Some(dir) => load_fixture_dir(Path::new(dir))?,
        None => {
            log::info!("[farm] source: using bundled sample data");
            Database::with_sample_data()?
        }
    };
    Ok(Rc::new(db))
}

pub fn load_config(args: &FilterArgs) -> anyhow::Result<DashboardConfig> {
    match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            DashboardConfig::from_json(&text).with_context(|| format!("parsing {path}"))
        }
        None => Ok(DashboardConfig::default()),
    }
}

/// Build the filter for a command. Explicit dates win over `--days`, which
/// wins over the configured look-back window.
pub fn build_filter(args: &FilterArgs, config: &DashboardConfig, today: NaiveDate) -> anyhow::Result<Filter> {
    let date_from = args.date_from.as_deref().map(parse_date).transpose()?;
    let date_to = args.date_to.as_deref().map(parse_date).transpose()?;

    let mut filter = if args.all_dates {
        Filter::default()
    } else if date_from.is_some() || date_to.is_some() {
        Filter::new(date_from, date_to)?
    } else if let Some(days) = args.days {
        let (from, to) = lookback_window(today, days)?;
        Filter::new(Some(from), Some(to))?
    } else {
        config.initial_filter(today)?
    };

    for &id in &args.farms {
        filter = filter.toggle_farm(id);
    }
    for &id in &args.crops {
        filter = filter.toggle_crop(id);
    }
    for &id in &args.projects {
        filter = filter.toggle_project(id);
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn default_filter_uses_config_window() {
        let config = DashboardConfig {
            lookback_days: 10,
            ..DashboardConfig::default()
        };
        let filter = build_filter(&FilterArgs::default(), &config, today()).unwrap();
        assert_eq!(filter.date_from, NaiveDate::from_ymd_opt(2024, 6, 20));
        assert_eq!(filter.date_to, Some(today()));
    }

    #[test]
    fn explicit_selection() {
        let args = FilterArgs {
            date_from: Some("2024-03-01".into()),
            farms: vec![2, 2, 1],
            crops: vec![3],
            ..FilterArgs::default()
        };
        let filter = build_filter(&args, &DashboardConfig::default(), today()).unwrap();
        assert_eq!(filter.date_from, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(filter.date_to, None);
        // Repeating an id toggles it off again.
        assert_eq!(filter.farm_ids.into_iter().collect::<Vec<_>>(), vec![1]);
        assert!(filter.crop_ids.contains(&3));
    }

    #[test]
    fn days_and_all_dates() {
        let args = FilterArgs {
            days: Some(7),
            ..FilterArgs::default()
        };
        let filter = build_filter(&args, &DashboardConfig::default(), today()).unwrap();
        assert_eq!(filter.date_from, NaiveDate::from_ymd_opt(2024, 6, 23));

        let args = FilterArgs {
            all_dates: true,
            ..FilterArgs::default()
        };
        assert!(build_filter(&args, &DashboardConfig::default(), today())
            .unwrap()
            .is_unrestricted());
    }

    #[test]
    fn out_of_range_days_are_rejected() {
        let args = FilterArgs {
            days: Some(u32::MAX),
            ..FilterArgs::default()
        };
        let err = build_filter(&args, &DashboardConfig::default(), today()).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn inverted_dates_are_rejected() {
        let args = FilterArgs {
            date_from: Some("2024-05-01".into()),
            date_to: Some("2024-04-01".into()),
            ..FilterArgs::default()
        };
        assert!(build_filter(&args, &DashboardConfig::default(), today()).is_err());
    }

    #[test]
    fn missing_fixture_dir_is_an_error() {
        let err = load_fixture_dir(Path::new("/nonexistent/farm-fixtures")).err().unwrap();
        assert!(err.to_string().contains("farms.csv"));
    }
}
