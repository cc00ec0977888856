//! Cost entries booked against a project.

use crate::reference::{number, optional, RecordId, RecordRef};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category tag of a cost entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostType {
    Seeds,
    Fertilizer,
    Pesticide,
    Herbicide,
    Water,
    Labor,
    Machinery,
    Rent,
    Fuel,
    Maintenance,
    Services,
    Transportation,
    Storage,
    Certification,
    Testing,
    Other,
}

impl CostType {
    pub const ALL: [CostType; 16] = [
        CostType::Seeds,
        CostType::Fertilizer,
        CostType::Pesticide,
        CostType::Herbicide,
        CostType::Water,
        CostType::Labor,
        CostType::Machinery,
        CostType::Rent,
        CostType::Fuel,
        CostType::Maintenance,
        CostType::Services,
        CostType::Transportation,
        CostType::Storage,
        CostType::Certification,
        CostType::Testing,
        CostType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CostType::Seeds => "seeds",
            CostType::Fertilizer => "fertilizer",
            CostType::Pesticide => "pesticide",
            CostType::Herbicide => "herbicide",
            CostType::Water => "water",
            CostType::Labor => "labor",
            CostType::Machinery => "machinery",
            CostType::Rent => "rent",
            CostType::Fuel => "fuel",
            CostType::Maintenance => "maintenance",
            CostType::Services => "services",
            CostType::Transportation => "transportation",
            CostType::Storage => "storage",
            CostType::Certification => "certification",
            CostType::Testing => "testing",
            CostType::Other => "other",
        }
    }

    /// Human-readable label used on chart legends.
    pub fn label(&self) -> &'static str {
        match self {
            CostType::Seeds => "Seeds/Seedlings",
            CostType::Fertilizer => "Fertilizers",
            CostType::Pesticide => "Pesticides",
            CostType::Herbicide => "Herbicides",
            CostType::Water => "Irrigation Water",
            CostType::Labor => "Labor/Workforce",
            CostType::Machinery => "Machinery/Equipment",
            CostType::Rent => "Land Rent",
            CostType::Fuel => "Fuel",
            CostType::Maintenance => "Maintenance",
            CostType::Services => "Services",
            CostType::Transportation => "Transportation",
            CostType::Storage => "Storage",
            CostType::Certification => "Certification",
            CostType::Testing => "Laboratory Testing",
            CostType::Other => "Other",
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }
}

impl fmt::Display for CostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single booked cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEntry {
    pub id: RecordId,
    #[serde(rename = "project_id", default, deserialize_with = "optional")]
    pub project: Option<RecordRef>,
    pub cost_type: CostType,
    #[serde(alias = "cost_amount", default, deserialize_with = "number")]
    pub amount: f64,
    #[serde(default, deserialize_with = "optional")]
    pub date: Option<NaiveDate>,
}
