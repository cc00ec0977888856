//! Farms and the headline counts shown on the dashboard cards.

use crate::reference::{number, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farm {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    /// Total area in hectares.
    #[serde(default, deserialize_with = "number")]
    pub area: f64,
}

/// Counts for the summary cards above the charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryCards {
    pub total_farms: u64,
    /// Projects that are neither completed nor cancelled.
    pub active_projects: u64,
    pub daily_reports: u64,
    pub total_costs: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn farm_without_area_reads_zero() {
        let farm: Farm = serde_json::from_value(json!({"id": 2, "name": "South Farm", "area": false})).unwrap();
        assert_eq!(farm.area, 0.0);
        assert_eq!(farm.name, "South Farm");
    }
}
