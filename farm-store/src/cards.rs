//! Headline counts for the dashboard summary cards.
//!
//! Farms, active projects and daily reports are counted by the store with
//! `search_count`; total costs sum the matching cost entries. Cost entries and
//! daily reports are selected by their own `date` and reach the farm, crop and
//! project selections through their project reference.

use crate::domain::{Condition, Domain, Operator};
use crate::error::{Result, StoreError};
use crate::fetch::{farm_domain, project_domain, read};
use crate::store::RecordStore;
use farm_core::reference::number;
use farm_core::{entity, Filter, ProjectState, SummaryCards};
use farm_utils::dates::format_date;
use serde::Deserialize;
use serde_json::json;

/// Domain for records booked against a project on a given `date`.
pub fn activity_domain(filter: &Filter) -> Domain {
    let mut domain = Domain::new();
    if let Some(from) = filter.date_from {
        domain.push(Condition::new("date", Operator::Ge, format_date(&from)));
    }
    if let Some(to) = filter.date_to {
        domain.push(Condition::new("date", Operator::Le, format_date(&to)));
    }
    if !filter.farm_ids.is_empty() {
        domain.push(Condition::any_of("project_id.farm_id", filter.farm_ids.iter().copied()));
    }
    if !filter.crop_ids.is_empty() {
        domain.push(Condition::any_of("project_id.crop_id", filter.crop_ids.iter().copied()));
    }
    if !filter.project_ids.is_empty() {
        domain.push(Condition::any_of("project_id", filter.project_ids.iter().copied()));
    }
    domain
}

/// Projects in the filter that are neither completed nor cancelled.
pub fn active_project_domain(filter: &Filter) -> Domain {
    let closed: Vec<&str> = ProjectState::CLOSED.iter().map(|s| s.as_str()).collect();
    project_domain(filter).with(Condition::new("state", Operator::NotIn, json!(closed)))
}

/// Number of `entity` records matching `domain`, counted by the store.
pub async fn search_count<S>(store: &S, entity: &str, domain: &Domain) -> Result<u64>
where
    S: RecordStore + ?Sized,
{
    let value = store
        .call(entity, "search_count", json!({ "domain": domain }))
        .await?;
    serde_json::from_value(value).map_err(|source| StoreError::Decode {
        entity: entity.to_string(),
        source,
    })
}

#[derive(Deserialize)]
struct CostAmount {
    #[serde(default, deserialize_with = "number")]
    cost_amount: f64,
}

async fn total_costs<S>(store: &S, domain: Domain) -> Result<f64>
where
    S: RecordStore + ?Sized,
{
    let amounts: Vec<CostAmount> = read(store, entity::COST_ENTRY, domain, &["cost_amount"]).await?;
    Ok(amounts.iter().map(|c| c.cost_amount).sum())
}

/// Load the four summary card figures concurrently.
pub async fn fetch_summary_cards<S>(store: &S, filter: &Filter) -> Result<SummaryCards>
where
    S: RecordStore + ?Sized,
{
    let farms = farm_domain(filter);
    let projects = active_project_domain(filter);
    let activity = activity_domain(filter);
    let (total_farms, active_projects, daily_reports, total_costs) = futures::try_join!(
        search_count(store, entity::FARM, &farms),
        search_count(store, entity::PROJECT, &projects),
        search_count(store, entity::DAILY_REPORT, &activity),
        total_costs(store, activity.clone()),
    )?;
    log::info!(
        "[farm] cards: {} farms, {} active projects, {} reports, {:.2} total cost",
        total_farms,
        active_projects,
        daily_reports,
        total_costs
    );
    Ok(SummaryCards {
        total_farms,
        active_projects,
        daily_reports,
        total_costs,
    })
}
