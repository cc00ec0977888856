//! Charts built from pre-serialized summary fragments.
//!
//! A host page may embed a JSON "seed" per chart, produced server side, so
//! charts can be drawn before the first fetch completes. Seeds are untrusted:
//! each one is parsed on its own and a malformed seed only fails its slot.
//!
//! Seed shapes:
//! - project-stage: `{"<state>": {"name": "...", "count": n}}`
//! - cost-distribution: `{"<cost type>": amount}`
//! - project-crop, resource-category, resource-product: `{"<name>": n}`
//! - budget-actual: `[{"project_name", "budget", "actual"}]`
//! - yield-comparison: `[{"project_name", "planned_yield", "actual_yield"}]`
//! - irrigation: `[{"project_name", "total_irrigation_hours", "irrigation_count"}]`
//! - farm-stats: `[{"name", "area", "active_projects"}]`
//! - cost-trend: `[{"date", "actual", "budgeted"}]`
//! - recent-activity: `[{"date", "daily_reports", "cost_entries"}]`
//!
//! Project rows may also carry a `project_id`, and farm rows a `farm_id`,
//! which becomes the click target. Seed dates are used as labels verbatim.

use crate::builder::{self, TOP_PRODUCTS};
use crate::navigation::NavTarget;
use crate::palette;
use crate::slot::ChartSlot;
use crate::spec::{ChartSpec, ChartType, ClickMapping};
use farm_core::reference::number;
use farm_core::{CostType, ProjectState, RecordId};
use farm_data::SectionToggles;
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use thiserror::Error;

/// Budget and yield seeds show at most this many projects.
pub const SEED_ROW_LIMIT: usize = 8;

#[derive(Debug, Error)]
pub enum ChartError {
    /// The seed for a slot is not valid JSON of the expected shape.
    #[error("malformed seed for {slot}: {source}")]
    MalformedSeed {
        slot: ChartSlot,
        #[source]
        source: serde_json::Error,
    },
}

/// A JSON object read in document order.
struct Ordered<V>(Vec<(String, V)>);

struct OrderedVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
    type Value = Ordered<V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((k, v)) = map.next_entry::<String, V>()? {
            entries.push((k, v));
        }
        Ok(Ordered(entries))
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Ordered<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}

/// A numeric seed value; `null` and `false` read as zero.
#[derive(Deserialize)]
#[serde(transparent)]
struct Amount(#[serde(deserialize_with = "number")] f64);

#[derive(Deserialize)]
struct StageSeed {
    name: String,
    #[serde(default, deserialize_with = "number")]
    count: f64,
}

#[derive(Deserialize)]
struct BudgetSeed {
    #[serde(default)]
    project_id: Option<RecordId>,
    project_name: String,
    #[serde(default, deserialize_with = "number")]
    budget: f64,
    #[serde(default, deserialize_with = "number")]
    actual: f64,
}

#[derive(Deserialize)]
struct YieldSeed {
    #[serde(default)]
    project_id: Option<RecordId>,
    project_name: String,
    #[serde(default, deserialize_with = "number")]
    planned_yield: f64,
    #[serde(default, deserialize_with = "number")]
    actual_yield: f64,
}

#[derive(Deserialize)]
struct IrrigationSeed {
    #[serde(default)]
    project_id: Option<RecordId>,
    project_name: String,
    #[serde(default, deserialize_with = "number")]
    total_irrigation_hours: f64,
    #[serde(default, deserialize_with = "number")]
    irrigation_count: f64,
}

#[derive(Deserialize)]
struct FarmSeed {
    #[serde(default)]
    farm_id: Option<RecordId>,
    name: String,
    #[serde(default, deserialize_with = "number")]
    area: f64,
    #[serde(default, deserialize_with = "number")]
    active_projects: f64,
}

#[derive(Deserialize)]
struct TrendSeed {
    date: String,
    #[serde(default, deserialize_with = "number")]
    actual: f64,
    #[serde(default, deserialize_with = "number")]
    budgeted: f64,
}

#[derive(Deserialize)]
struct ActivitySeed {
    date: String,
    #[serde(default, deserialize_with = "number")]
    daily_reports: f64,
    #[serde(default, deserialize_with = "number")]
    cost_entries: f64,
}

fn parse<T: DeserializeOwned>(slot: ChartSlot, seed: &str) -> Result<T, ChartError> {
    serde_json::from_str(seed).map_err(|source| ChartError::MalformedSeed { slot, source })
}

fn projects(ids: impl Iterator<Item = Option<RecordId>>) -> ClickMapping {
    ids.map(|id| id.map(NavTarget::Project)).collect()
}

fn empty(slot: ChartSlot) -> Result<ChartSpec, ChartError> {
    let seed = match slot {
        ChartSlot::BudgetActual
        | ChartSlot::YieldComparison
        | ChartSlot::Irrigation
        | ChartSlot::FarmStats
        | ChartSlot::CostTrend
        | ChartSlot::RecentActivity => "[]",
        _ => "{}",
    };
    build_from_seed(slot, seed)
}

/// Build the chart for `slot` from its seed. A blank seed gives an empty chart.
pub fn build_from_seed(slot: ChartSlot, seed: &str) -> Result<ChartSpec, ChartError> {
    if seed.trim().is_empty() {
        return empty(slot);
    }
    let spec = match slot {
        ChartSlot::ProjectStage => {
            let Ordered(stages) = parse::<Ordered<StageSeed>>(slot, seed)?;
            builder::radial(
                slot,
                ChartType::Doughnut,
                "Projects by Stage",
                stages.iter().map(|(_, s)| s.name.clone()).collect(),
                stages.iter().map(|(_, s)| s.count).collect(),
                palette::SLICES,
                stages
                    .iter()
                    .map(|(tag, _)| ProjectState::parse(tag).map(NavTarget::ProjectsInState))
                    .collect(),
            )
        }
        ChartSlot::ProjectCrop => {
            let Ordered(crops) = parse::<Ordered<Amount>>(slot, seed)?;
            builder::radial(
                slot,
                ChartType::Pie,
                "Projects by Crop",
                crops.iter().map(|(name, _)| name.clone()).collect(),
                crops.iter().map(|(_, n)| n.0).collect(),
                palette::CROP_SLICES,
                ClickMapping::none(),
            )
        }
        ChartSlot::CostDistribution => {
            let Ordered(costs) = parse::<Ordered<Amount>>(slot, seed)?;
            builder::radial(
                slot,
                ChartType::Doughnut,
                "Cost Distribution",
                costs
                    .iter()
                    .map(|(tag, _)| CostType::parse(tag).map_or_else(|| tag.clone(), |t| t.label().to_string()))
                    .collect(),
                costs.iter().map(|(_, n)| n.0).collect(),
                palette::SLICES,
                costs
                    .iter()
                    .map(|(tag, _)| CostType::parse(tag).map(|t| NavTarget::CostEntries(Some(t))))
                    .collect(),
            )
        }
        ChartSlot::BudgetActual => {
            let mut rows = parse::<Vec<BudgetSeed>>(slot, seed)?;
            rows.truncate(SEED_ROW_LIMIT);
            builder::budget_spec(
                rows.iter().map(|r| r.project_name.clone()).collect(),
                rows.iter().map(|r| r.budget).collect(),
                rows.iter().map(|r| r.actual).collect(),
                projects(rows.iter().map(|r| r.project_id)),
            )
        }
        ChartSlot::YieldComparison => {
            let mut rows = parse::<Vec<YieldSeed>>(slot, seed)?;
            rows.truncate(SEED_ROW_LIMIT);
            builder::yield_spec(
                rows.iter().map(|r| r.project_name.clone()).collect(),
                rows.iter().map(|r| r.planned_yield).collect(),
                rows.iter().map(|r| r.actual_yield).collect(),
                projects(rows.iter().map(|r| r.project_id)),
            )
        }
        ChartSlot::Irrigation => {
            let rows = parse::<Vec<IrrigationSeed>>(slot, seed)?;
            builder::irrigation_spec(
                rows.iter().map(|r| r.project_name.clone()).collect(),
                rows.iter().map(|r| r.total_irrigation_hours).collect(),
                rows.iter().map(|r| r.irrigation_count).collect(),
                projects(rows.iter().map(|r| r.project_id)),
            )
        }
        ChartSlot::FarmStats => {
            let rows = parse::<Vec<FarmSeed>>(slot, seed)?;
            builder::farm_spec(
                rows.iter().map(|r| r.name.clone()).collect(),
                rows.iter().map(|r| r.area).collect(),
                rows.iter().map(|r| r.active_projects).collect(),
                rows.iter().map(|r| r.farm_id.map(NavTarget::Farm)).collect(),
            )
        }
        ChartSlot::CostTrend => {
            let rows = parse::<Vec<TrendSeed>>(slot, seed)?;
            builder::cost_trend_spec(
                rows.iter().map(|r| r.date.clone()).collect(),
                rows.iter().map(|r| r.actual).collect(),
                rows.iter().map(|r| r.budgeted).collect(),
            )
        }
        ChartSlot::RecentActivity => {
            let rows = parse::<Vec<ActivitySeed>>(slot, seed)?;
            builder::activity_spec(
                rows.iter().map(|r| r.date.clone()).collect(),
                rows.iter().map(|r| r.daily_reports).collect(),
                rows.iter().map(|r| r.cost_entries).collect(),
            )
        }
        ChartSlot::ResourceCategory => {
            let Ordered(usage) = parse::<Ordered<Amount>>(slot, seed)?;
            builder::radial(
                slot,
                ChartType::Doughnut,
                "Resource Usage by Category",
                usage.iter().map(|(name, _)| name.clone()).collect(),
                usage.iter().map(|(_, n)| n.0).collect(),
                palette::CATEGORY_SLICES,
                ClickMapping::none(),
            )
        }
        ChartSlot::ResourceProduct => {
            let Ordered(mut usage) = parse::<Ordered<Amount>>(slot, seed)?;
            usage.sort_by(|a, b| b.1 .0.total_cmp(&a.1 .0));
            usage.truncate(TOP_PRODUCTS);
            builder::product_spec(
                usage.iter().map(|(name, _)| name.clone()).collect(),
                usage.iter().map(|(_, n)| n.0).collect(),
                ClickMapping::none(),
            )
        }
    };
    Ok(spec)
}

/// Seeds keyed by slot, as embedded in a host page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SeedSet(pub BTreeMap<ChartSlot, String>);

impl SeedSet {
    pub fn insert(&mut self, slot: ChartSlot, seed: impl Into<String>) {
        self.0.insert(slot, seed.into());
    }

    /// Build every enabled seeded chart. Failures are returned per slot and
    /// do not stop the others.
    pub fn build(&self, toggles: &SectionToggles) -> (Vec<ChartSpec>, Vec<ChartError>) {
        let mut specs = Vec::new();
        let mut errors = Vec::new();
        for (slot, seed) in self.0.iter().filter(|(slot, _)| slot.is_enabled(toggles)) {
            match build_from_seed(*slot, seed) {
                Ok(spec) => specs.push(spec),
                Err(e) => {
                    log::warn!("[farm] seed: skipping {}: {}", slot, e);
                    errors.push(e);
                }
            }
        }
        (specs, errors)
    }
}
