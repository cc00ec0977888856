//! Dashboard state and its transitions.
//!
//! `DashboardState` bundles the current filter, the last applied summary and
//! the load status. The controller is the only writer.

use farm_core::Filter;
use farm_data::DashboardSummary;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardStatus {
    Idle,
    Loading,
    Ready,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardState {
    pub status: DashboardStatus,
    /// Filter of the most recent refresh request
    pub filter: Filter,
    /// Last successfully applied summary
    pub summary: Option<DashboardSummary>,
    /// Error message if the last refresh failed
    pub error: Option<String>,
}

impl DashboardState {
    pub fn new(filter: Filter) -> Self {
        Self {
            status: DashboardStatus::Idle,
            filter,
            summary: None,
            error: None,
        }
    }

    /// Enter `Loading`. The previous summary stays visible until replaced.
    pub fn begin_loading(&mut self) {
        self.status = DashboardStatus::Loading;
        self.error = None;
    }

    pub fn apply_summary(&mut self, summary: DashboardSummary) {
        self.summary = Some(summary);
        self.status = DashboardStatus::Ready;
        self.error = None;
    }

    /// Enter `Error`, keeping whatever summary was last applied.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = DashboardStatus::Error;
        self.error = Some(message.into());
    }

    /// Back to `Idle` after the dashboard is torn down. Any refresh still in
    /// flight will be dropped, so nothing is loading any more.
    pub fn stop(&mut self) {
        self.status = DashboardStatus::Idle;
        self.error = None;
    }

    pub fn is_loading(&self) -> bool {
        self.status == DashboardStatus::Loading
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(Filter::default())
    }
}
