//! Material consumption from daily report lines.

use crate::tally::Tally;
use farm_core::{RecordId, ReportLine};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductUsage {
    /// First product id seen under this name.
    pub product_id: RecordId,
    pub name: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceSummary {
    pub usage_by_product: Vec<ProductUsage>,
    /// Only lines carrying a category reference contribute.
    pub usage_by_category: Tally<String>,
}

pub fn summarize_resources(lines: &[ReportLine]) -> ResourceSummary {
    let mut usage_by_product: Vec<ProductUsage> = Vec::new();
    let mut usage_by_category = Tally::new();

    for line in lines {
        if let Some(product) = &line.product {
            match usage_by_product.iter_mut().find(|u| u.name == product.display_name) {
                Some(usage) => usage.quantity += line.quantity,
                None => usage_by_product.push(ProductUsage {
                    product_id: product.id,
                    name: product.display_name.clone(),
                    quantity: line.quantity,
                }),
            }
        }
        if let Some(category) = &line.category {
            usage_by_category.add(category.display_name.clone(), line.quantity);
        }
    }

    ResourceSummary {
        usage_by_product,
        usage_by_category,
    }
}
