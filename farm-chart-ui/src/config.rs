use crate::slot::ChartSlot;
use crate::surface::SurfaceMap;
use chrono::NaiveDate;
use farm_core::{Filter, FilterError};
use farm_data::SectionToggles;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;
/// A century of history.
pub const MAX_LOOKBACK_DAYS: u32 = 36_525;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid dashboard config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("lookback_days {0} exceeds the maximum of {max}", max = MAX_LOOKBACK_DAYS)]
    LookbackTooLong(u32),
}

/// Dashboard settings, usually read from a JSON file. Every field is
/// optional.
///
/// ```json
/// {"lookback_days": 90, "show_resource_usage": false,
///  "surfaces": {"irrigation": "waterCanvas"}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub lookback_days: u32,
    #[serde(flatten)]
    pub sections: SectionToggles,
    pub surfaces: BTreeMap<ChartSlot, String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            sections: SectionToggles::default(),
            surfaces: BTreeMap::new(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.lookback_days > MAX_LOOKBACK_DAYS {
            return Err(ConfigError::LookbackTooLong(config.lookback_days));
        }
        Ok(config)
    }

    /// The filter a freshly opened dashboard starts with.
    pub fn initial_filter(&self, today: NaiveDate) -> Result<Filter, FilterError> {
        Filter::last_days(today, self.lookback_days)
    }

    pub fn surface_map(&self) -> SurfaceMap {
        SurfaceMap::new(self.surfaces.clone())
    }
}
