//! Daily field reports and their product-usage lines.

use crate::reference::{number, optional, RecordId, RecordRef};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of field operation a daily report records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Preparation,
    Planting,
    Fertilizer,
    Pesticide,
    Irrigation,
    Weeding,
    Harvesting,
    Maintenance,
    Inspection,
    Other,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Preparation => "preparation",
            OperationType::Planting => "planting",
            OperationType::Fertilizer => "fertilizer",
            OperationType::Pesticide => "pesticide",
            OperationType::Irrigation => "irrigation",
            OperationType::Weeding => "weeding",
            OperationType::Harvesting => "harvesting",
            OperationType::Maintenance => "maintenance",
            OperationType::Inspection => "inspection",
            OperationType::Other => "other",
        }
    }
}

/// A daily report filed against a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub id: RecordId,
    #[serde(rename = "project_id", default, deserialize_with = "optional")]
    pub project: Option<RecordRef>,
    /// Absent when the report was fetched without its operation type.
    #[serde(default, deserialize_with = "optional")]
    pub operation_type: Option<OperationType>,
    #[serde(default, deserialize_with = "optional")]
    pub date: Option<NaiveDate>,
    /// Irrigation duration in hours.
    #[serde(alias = "irrigation_duration", default, deserialize_with = "number")]
    pub duration: f64,
}

impl DailyReport {
    pub fn is_irrigation(&self) -> bool {
        self.operation_type == Some(OperationType::Irrigation)
    }
}

/// A product consumed during a daily report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLine {
    pub id: RecordId,
    #[serde(rename = "report_id", default, deserialize_with = "optional")]
    pub report: Option<RecordRef>,
    #[serde(rename = "product_id", default, deserialize_with = "optional")]
    pub product: Option<RecordRef>,
    #[serde(default, deserialize_with = "number")]
    pub quantity: f64,
    /// Product category, only present when the store resolves it.
    #[serde(rename = "product_category_id", default, deserialize_with = "optional")]
    pub category: Option<RecordRef>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn irrigation_report_reads_duration_alias() {
        let report: DailyReport = serde_json::from_value(json!({
            "id": 1,
            "project_id": [4, "Rice"],
            "operation_type": "irrigation",
            "date": "2024-05-01",
            "irrigation_duration": 2.5
        }))
        .unwrap();
        assert!(report.is_irrigation());
        assert_eq!(report.duration, 2.5);
    }

    #[test]
    fn report_without_operation_type() {
        let report: DailyReport = serde_json::from_value(json!({"id": 2, "project_id": false})).unwrap();
        assert!(report.project.is_none());
        assert!(!report.is_irrigation());
    }

    #[test]
    fn line_without_category() {
        let line: ReportLine = serde_json::from_value(json!({
            "id": 3,
            "report_id": [1, "R/001"],
            "product_id": [8, "Urea"],
            "quantity": 40
        }))
        .unwrap();
        assert!(line.category.is_none());
        assert_eq!(line.quantity, 40.0);
    }
}
