//! Core types shared by every farm dashboard crate.
//!
//! This crate provides:
//! - `reference`: typed `{id, display_name}` references and lenient field decoders
//! - `project`, `cost`, `report`, `farm`: read-only record snapshots as returned by the store
//! - `filter`: the immutable Filter State driving each refresh
//! - `inputs`: the raw record bundle handed from the fetcher to the aggregators
//! - `entity`: record store model names

pub mod cost;
pub mod entity;
pub mod farm;
pub mod filter;
pub mod inputs;
pub mod project;
pub mod reference;
pub mod report;

pub use cost::{CostEntry, CostType};
pub use farm::{Farm, SummaryCards};
pub use filter::{Filter, FilterError};
pub use inputs::DashboardInputs;
pub use project::{Project, ProjectState, YieldQuality};
pub use reference::{RecordId, RecordRef};
pub use report::{DailyReport, OperationType, ReportLine};
