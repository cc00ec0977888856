//! Drill-down targets and the navigation service interface.

use farm_core::{entity, CostType, ProjectState, RecordId};
use farm_store::{Condition, Domain, Operator};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Form,
    List,
}

/// A request to open a record or a filtered list in the host application.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationRequest {
    pub entity: &'static str,
    pub entity_id: Option<RecordId>,
    pub domain: Domain,
    pub view_mode: ViewMode,
}

impl NavigationRequest {
    pub fn form(entity: &'static str, id: RecordId) -> Self {
        Self {
            entity,
            entity_id: Some(id),
            domain: Domain::new(),
            view_mode: ViewMode::Form,
        }
    }

    pub fn list(entity: &'static str, domain: Domain) -> Self {
        Self {
            entity,
            entity_id: None,
            domain,
            view_mode: ViewMode::List,
        }
    }
}

/// What a chart element links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Farm(RecordId),
    Crop(RecordId),
    Project(RecordId),
    ProjectsInState(ProjectState),
    /// All cost entries, or those of one type.
    CostEntries(Option<CostType>),
    Product(RecordId),
    DailyReports,
}

impl NavTarget {
    pub fn request(&self) -> NavigationRequest {
        match *self {
            NavTarget::Farm(id) => NavigationRequest::form(entity::FARM, id),
            NavTarget::Crop(id) => NavigationRequest::form(entity::CROP, id),
            NavTarget::Project(id) => NavigationRequest::form(entity::PROJECT, id),
            NavTarget::Product(id) => NavigationRequest::form(entity::PRODUCT, id),
            NavTarget::ProjectsInState(state) => NavigationRequest::list(
                entity::PROJECT,
                Domain::new().with(Condition::new("state", Operator::Eq, state.as_str())),
            ),
            NavTarget::CostEntries(cost_type) => {
                let domain = match cost_type {
                    Some(t) => Domain::new().with(Condition::new("cost_type", Operator::Eq, t.as_str())),
                    None => Domain::new(),
                };
                NavigationRequest::list(entity::COST_ENTRY, domain)
            }
            NavTarget::DailyReports => NavigationRequest::list(entity::DAILY_REPORT, Domain::new()),
        }
    }
}

/// Summary cards that open an unfiltered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Farms,
    Projects,
    DailyReports,
    CostEntries,
}

impl Section {
    pub fn request(&self) -> NavigationRequest {
        let entity = match self {
            Section::Farms => entity::FARM,
            Section::Projects => entity::PROJECT,
            Section::DailyReports => entity::DAILY_REPORT,
            Section::CostEntries => entity::COST_ENTRY,
        };
        NavigationRequest::list(entity, Domain::new())
    }
}

pub trait Navigator {
    fn navigate(&self, request: NavigationRequest);
}

/// Logs requests instead of acting on them, for hosts without a view stack.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, request: NavigationRequest) {
        log::info!(
            "[farm] navigate: {} {:?} id={:?} domain={}",
            request.entity,
            request.view_mode,
            request.entity_id,
            serde_json::to_string(&request.domain).unwrap_or_default()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stage_target_opens_filtered_project_list() {
        let req = NavTarget::ProjectsInState(ProjectState::InProgress).request();
        assert_eq!(req.entity, entity::PROJECT);
        assert_eq!(req.view_mode, ViewMode::List);
        assert_eq!(
            serde_json::to_value(&req.domain).unwrap(),
            json!([["state", "=", "in_progress"]])
        );
    }

    #[test]
    fn record_targets_open_forms() {
        let req = NavTarget::Crop(7).request();
        assert_eq!(req, NavigationRequest::form(entity::CROP, 7));
        assert_eq!(NavTarget::Farm(2).request().entity, entity::FARM);
    }

    #[test]
    fn cost_targets() {
        assert!(NavTarget::CostEntries(None).request().domain.is_empty());
        let req = NavTarget::CostEntries(Some(CostType::Water)).request();
        assert!(req.domain.mentions("cost_type"));
    }

    #[test]
    fn activity_target_opens_report_list() {
        let req = NavTarget::DailyReports.request();
        assert_eq!(req, Section::DailyReports.request());
        assert_eq!(req.view_mode, ViewMode::List);
    }

    #[test]
    fn sections_open_unfiltered_lists() {
        let req = Section::DailyReports.request();
        assert_eq!(req.entity, entity::DAILY_REPORT);
        assert!(req.domain.is_empty());
        assert!(req.entity_id.is_none());
    }
}
