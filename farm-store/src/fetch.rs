//! The Data Fetcher: turns the current [`Filter`] into a typed
//! [`DashboardInputs`] bundle.
//!
//! Projects are read first. Their ids scope the cost, irrigation and report
//! queries, which run concurrently with the farm read; report lines follow
//! once report ids are known. Any failure aborts the whole fetch.

use crate::domain::{Condition, Domain, Operator};
use crate::error::{Result, StoreError};
use crate::store::{Record, RecordStore};
use farm_core::{
    entity, CostEntry, DailyReport, DashboardInputs, Farm, Filter, Project, RecordId, RecordRef, ReportLine,
};
use farm_utils::dates::format_date;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub const PROJECT_FIELDS: &[&str] = &[
    "name",
    "farm_id",
    "crop_id",
    "field_area",
    "budget",
    "actual_cost",
    "revenue",
    "profit",
    "planned_yield",
    "actual_yield",
    "yield_quality",
    "state",
    "start_date",
];
pub const COST_FIELDS: &[&str] = &["project_id", "cost_type", "cost_amount", "date"];
pub const IRRIGATION_FIELDS: &[&str] = &["project_id", "operation_type", "date", "irrigation_duration"];
pub const REPORT_FIELDS: &[&str] = &["project_id", "operation_type", "date"];
pub const LINE_FIELDS: &[&str] = &["report_id", "product_id", "quantity"];
pub const FARM_FIELDS: &[&str] = &["name", "area"];

/// Project search domain for a filter. Absent bounds and empty id sets add
/// no condition.
pub fn project_domain(filter: &Filter) -> Domain {
    let mut domain = Domain::new();
    if let Some(from) = filter.date_from {
        domain.push(Condition::new("start_date", Operator::Ge, format_date(&from)));
    }
    if let Some(to) = filter.date_to {
        domain.push(Condition::new("start_date", Operator::Le, format_date(&to)));
    }
    if !filter.farm_ids.is_empty() {
        domain.push(Condition::any_of("farm_id", filter.farm_ids.iter().copied()));
    }
    if !filter.crop_ids.is_empty() {
        domain.push(Condition::any_of("crop_id", filter.crop_ids.iter().copied()));
    }
    if !filter.project_ids.is_empty() {
        domain.push(Condition::any_of("id", filter.project_ids.iter().copied()));
    }
    domain
}

/// Farm search domain: the selected farms, or every farm.
pub fn farm_domain(filter: &Filter) -> Domain {
    let mut domain = Domain::new();
    if !filter.farm_ids.is_empty() {
        domain.push(Condition::any_of("id", filter.farm_ids.iter().copied()));
    }
    domain
}

/// Decode raw store records into typed snapshots.
pub fn decode<T: DeserializeOwned>(entity: &str, records: Vec<Record>) -> Result<Vec<T>> {
    records
        .into_iter()
        .map(|record| {
            serde_json::from_value(Value::Object(record)).map_err(|source| StoreError::Decode {
                entity: entity.to_string(),
                source,
            })
        })
        .collect()
}

pub(crate) async fn read<S, T>(store: &S, entity: &str, domain: Domain, fields: &[&str]) -> Result<Vec<T>>
where
    S: RecordStore + ?Sized,
    T: DeserializeOwned,
{
    let records = store.search_read(entity, &domain, fields).await?;
    decode(entity, records)
}

/// Fetch everything one dashboard refresh needs.
pub async fn fetch_dashboard_inputs<S>(store: &S, filter: &Filter) -> Result<DashboardInputs>
where
    S: RecordStore + ?Sized,
{
    let projects: Vec<Project> = read(store, entity::PROJECT, project_domain(filter), PROJECT_FIELDS).await?;
    if projects.is_empty() {
        log::info!("[farm] fetch: no projects match the filter");
        return Ok(DashboardInputs::default());
    }

    let project_ids: Vec<RecordId> = projects.iter().map(|p| p.id).collect();
    let scoped = || Domain::new().with(Condition::any_of("project_id", project_ids.iter().copied()));

    let (cost_entries, irrigation_reports, reports, farms) = futures::try_join!(
        read::<S, CostEntry>(store, entity::COST_ENTRY, scoped(), COST_FIELDS),
        read::<S, DailyReport>(
            store,
            entity::DAILY_REPORT,
            scoped().with(Condition::new("operation_type", Operator::Eq, "irrigation")),
            IRRIGATION_FIELDS,
        ),
        read::<S, DailyReport>(store, entity::DAILY_REPORT, scoped(), REPORT_FIELDS),
        read::<S, Farm>(store, entity::FARM, farm_domain(filter), FARM_FIELDS),
    )?;

    let report_lines: Vec<ReportLine> = if reports.is_empty() {
        Vec::new()
    } else {
        let domain = Domain::new().with(Condition::any_of("report_id", reports.iter().map(|r| r.id)));
        read(store, entity::REPORT_LINE, domain, LINE_FIELDS).await?
    };

    log::info!(
        "[farm] fetch: {} projects, {} farms, {} cost entries, {} irrigation reports, {} reports, {} lines",
        projects.len(),
        farms.len(),
        cost_entries.len(),
        irrigation_reports.len(),
        reports.len(),
        report_lines.len()
    );

    Ok(DashboardInputs {
        projects,
        cost_entries,
        irrigation_reports,
        reports,
        report_lines,
        farms,
    })
}

/// Picker lists for the filter bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub farms: Vec<RecordRef>,
    pub crops: Vec<RecordRef>,
    pub projects: Vec<RecordRef>,
}

/// Load every farm, crop and project as `{id, display_name}` references.
pub async fn fetch_filter_options<S>(store: &S) -> Result<FilterOptions>
where
    S: RecordStore + ?Sized,
{
    let (farms, crops, projects) = futures::try_join!(
        read::<S, RecordRef>(store, entity::FARM, Domain::new(), &["name"]),
        read::<S, RecordRef>(store, entity::CROP, Domain::new(), &["name"]),
        read::<S, RecordRef>(store, entity::PROJECT, Domain::new(), &["name"]),
    )?;
    Ok(FilterOptions {
        farms,
        crops,
        projects,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_database;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use farm_core::ProjectState;
    use serde_json::json;
    use std::cell::RefCell;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    /// Records every query and answers from a wrapped store.
    struct Recording<S> {
        inner: S,
        log: RefCell<Vec<(String, Domain)>>,
        fail_on: Option<&'static str>,
    }

    impl<S> Recording<S> {
        fn new(inner: S) -> Self {
            Self {
                inner,
                log: RefCell::new(Vec::new()),
                fail_on: None,
            }
        }

        fn entities(&self) -> Vec<String> {
            self.log.borrow().iter().map(|(e, _)| e.clone()).collect()
        }
    }

    #[async_trait(?Send)]
    impl<S: RecordStore> RecordStore for Recording<S> {
        async fn search_read(&self, entity: &str, domain: &Domain, fields: &[&str]) -> Result<Vec<Record>> {
            self.log.borrow_mut().push((entity.to_string(), domain.clone()));
            if self.fail_on.is_some_and(|f| f == entity) {
                return Err(StoreError::Remote("boom".into()));
            }
            self.inner.search_read(entity, domain, fields).await
        }

        async fn call(&self, entity: &str, method: &str, kwargs: Value) -> Result<Value> {
            self.inner.call(entity, method, kwargs).await
        }
    }

    #[test]
    fn empty_filter_has_empty_domain() {
        assert!(project_domain(&Filter::default()).is_empty());
    }

    #[test]
    fn empty_farm_set_adds_no_farm_condition() {
        let filter = Filter::new(Some(d(2024, 1, 1)), Some(d(2024, 12, 31))).unwrap();
        let domain = project_domain(&filter);
        assert!(!domain.mentions("farm_id"));
        assert_eq!(
            serde_json::to_value(&domain).unwrap(),
            json!([["start_date", ">=", "2024-01-01"], ["start_date", "<=", "2024-12-31"]])
        );
    }

    #[test]
    fn selections_become_in_conditions() {
        let filter = Filter::default().toggle_farm(2).toggle_crop(1).toggle_project(9);
        let domain = serde_json::to_value(project_domain(&filter)).unwrap();
        assert_eq!(
            domain,
            json!([["farm_id", "in", [2]], ["crop_id", "in", [1]], ["id", "in", [9]]])
        );
    }

    #[tokio::test]
    async fn fetches_full_bundle() {
        let store = Recording::new(sample_database());
        let inputs = fetch_dashboard_inputs(&store, &Filter::default()).await.unwrap();
        assert_eq!(inputs.projects.len(), 4);
        assert_eq!(inputs.cost_entries.len(), 7);
        assert_eq!(inputs.irrigation_reports.len(), 3);
        assert!(inputs.irrigation_reports.iter().all(|r| r.is_irrigation()));
        assert_eq!(inputs.reports.len(), 5);
        assert_eq!(inputs.report_lines.len(), 5);
        assert_eq!(inputs.projects[1].state, ProjectState::Completed);
        assert_eq!(inputs.farms.len(), 2);
        assert_eq!(inputs.farms[0].area, 45.0);
        assert_eq!(store.entities().last().map(String::as_str), Some(entity::REPORT_LINE));
    }

    #[tokio::test]
    async fn farm_selection_limits_farms() {
        let store = Recording::new(sample_database());
        let inputs = fetch_dashboard_inputs(&store, &Filter::default().toggle_farm(2)).await.unwrap();
        assert_eq!(inputs.farms.len(), 1);
        assert_eq!(inputs.farms[0].name, "South Farm");
        assert!(inputs.projects.iter().all(|p| p.farm.as_ref().is_some_and(|f| f.id == 2)));
    }

    #[tokio::test]
    async fn no_projects_short_circuits() {
        let store = Recording::new(sample_database());
        let filter = Filter::new(Some(d(2030, 1, 1)), None).unwrap();
        let inputs = fetch_dashboard_inputs(&store, &filter).await.unwrap();
        assert!(inputs.is_empty());
        assert_eq!(store.entities(), vec![entity::PROJECT.to_string()]);
    }

    #[tokio::test]
    async fn report_lines_skipped_without_reports() {
        let store = Recording::new(sample_database());
        let filter = Filter::default().toggle_project(4);
        let inputs = fetch_dashboard_inputs(&store, &filter).await.unwrap();
        assert_eq!(inputs.projects.len(), 1);
        assert!(inputs.reports.is_empty());
        assert!(!store.entities().iter().any(|e| e == entity::REPORT_LINE));
    }

    #[tokio::test]
    async fn any_failure_aborts_fetch() {
        let mut store = Recording::new(sample_database());
        store.fail_on = Some(entity::COST_ENTRY);
        let err = fetch_dashboard_inputs(&store, &Filter::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::Remote(_)));
    }

    #[tokio::test]
    async fn invalid_state_is_a_decode_error() {
        let db = crate::Database::new().unwrap();
        db.load_projects(
            "id,name,farm_id,crop_id,field_area,budget,actual_cost,revenue,profit,planned_yield,actual_yield,yield_quality,state,start_date\n\
             1,Odd,,,,,,,,,,,sowing,\n",
        )
        .unwrap();
        let err = fetch_dashboard_inputs(&db, &Filter::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }

    #[tokio::test]
    async fn filter_options_list_every_record() {
        let db = sample_database();
        let options = fetch_filter_options(&db).await.unwrap();
        assert_eq!(options.farms, vec![RecordRef::new(1, "North Farm"), RecordRef::new(2, "South Farm")]);
        assert_eq!(options.crops.len(), 3);
        assert_eq!(options.projects.len(), 4);
    }
}
