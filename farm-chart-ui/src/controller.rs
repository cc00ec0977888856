//! The dashboard controller: owns the filter, runs refreshes and keeps the
//! rendered charts in step with the latest applied summary.
//!
//! A refresh goes `Loading -> Ready` when fetch, aggregation and rendering
//! succeed, or `Loading -> Error` when the fetch or the chart library fails.
//! On error the previous summary and charts are left in place. Stopping the
//! dashboard returns it to `Idle`.
//!
//! Every refresh takes a new generation number. Results are applied only if
//! no newer refresh started in the meantime, so a slow early refresh can
//! never overwrite a fast later one.

use crate::builder::build_charts;
use crate::config::DashboardConfig;
use crate::library::{ChartLibrary, LibraryLoadError};
use crate::navigation::{LogNavigator, NavigationRequest, Navigator, Section};
use crate::notify::{LogNotifier, NoticeLevel, Notifier};
use crate::registry::ChartRegistry;
use crate::seed::SeedSet;
use crate::slot::ChartSlot;
use crate::spec::ChartSpec;
use crate::state::{DashboardState, DashboardStatus};
use crate::surface::{ChartRenderer, SurfaceMap};
use chrono::NaiveDate;
use farm_core::{Filter, FilterError, RecordId};
use farm_data::{summarize, ActivityWindow, DashboardSummary};
use farm_store::{fetch_dashboard_inputs, fetch_summary_cards, RecordStore, StoreError};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Any store query of the refresh failed.
    #[error("failed to load dashboard data: {0}")]
    Fetch(#[from] StoreError),
    /// The chart library is unavailable for this session.
    #[error(transparent)]
    Library(#[from] LibraryLoadError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Results were applied.
    Applied,
    /// A newer refresh started first; results were discarded.
    Superseded,
    /// The refresh failed; the dashboard is in `Error`.
    Failed,
}

pub struct DashboardController {
    store: Rc<dyn RecordStore>,
    library: Rc<ChartLibrary>,
    renderer: Rc<dyn ChartRenderer>,
    navigator: Rc<dyn Navigator>,
    notifier: Rc<dyn Notifier>,
    config: DashboardConfig,
    surfaces: SurfaceMap,
    /// Anchors the look-back window and the activity chart.
    today: NaiveDate,
    state: RefCell<DashboardState>,
    registry: RefCell<ChartRegistry>,
    generation: Cell<u64>,
    library_error_reported: Cell<bool>,
}

impl DashboardController {
    pub fn new(
        store: Rc<dyn RecordStore>,
        library: Rc<ChartLibrary>,
        renderer: Rc<dyn ChartRenderer>,
        config: DashboardConfig,
        today: NaiveDate,
    ) -> Result<Self, FilterError> {
        let surfaces = config.surface_map();
        let filter = config.initial_filter(today)?;
        Ok(Self {
            store,
            library,
            renderer,
            navigator: Rc::new(LogNavigator),
            notifier: Rc::new(LogNotifier),
            config,
            surfaces,
            today,
            state: RefCell::new(DashboardState::new(filter)),
            registry: RefCell::new(ChartRegistry::new()),
            generation: Cell::new(0),
            library_error_reported: Cell::new(false),
        })
    }

    pub fn with_navigator(mut self, navigator: Rc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn with_notifier(mut self, notifier: Rc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Start from `filter` instead of the configured look-back window.
    pub fn with_filter(self, filter: Filter) -> Result<Self, FilterError> {
        filter.validate()?;
        self.state.borrow_mut().filter = filter;
        Ok(self)
    }

    pub fn state(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> DashboardStatus {
        self.state.borrow().status
    }

    pub fn filter(&self) -> Filter {
        self.state.borrow().filter.clone()
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// The [`ChartSpec`] currently drawn in `slot`.
    pub fn chart(&self, slot: ChartSlot) -> Option<ChartSpec> {
        self.registry.borrow().spec(slot).cloned()
    }

    pub fn live_charts(&self) -> usize {
        self.registry.borrow().live_count()
    }

    /// First load. Returns `None` once the dashboard has left `Idle`.
    pub async fn on_start(&self) -> Option<RefreshOutcome> {
        if self.status() != DashboardStatus::Idle {
            return None;
        }
        Some(self.refresh().await)
    }

    /// Destroy every chart and return to `Idle`. In-flight refreshes are
    /// discarded when they land.
    pub fn on_stop(&self) {
        self.generation.set(self.generation.get() + 1);
        self.registry.borrow_mut().dispose_all();
        self.state.borrow_mut().stop();
        log::info!("[farm] controller: stopped");
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        let filter = {
            let mut state = self.state.borrow_mut();
            state.begin_loading();
            state.filter.clone()
        };
        log::info!("[farm] controller: refresh #{} started", generation);

        let result = self.load(&filter).await;

        if self.generation.get() != generation {
            log::info!("[farm] controller: refresh #{} superseded, discarding", generation);
            return RefreshOutcome::Superseded;
        }

        match result {
            Ok(summary) => {
                self.render(&summary);
                self.state.borrow_mut().apply_summary(summary);
                log::info!("[farm] controller: refresh #{} applied", generation);
                RefreshOutcome::Applied
            }
            Err(e) => {
                let message = e.to_string();
                self.state.borrow_mut().fail(message.clone());
                match e {
                    DashboardError::Library(_) if self.library_error_reported.get() => {
                        log::warn!("[farm] controller: {}", message);
                    }
                    DashboardError::Library(_) => {
                        self.library_error_reported.set(true);
                        self.notifier.notify(NoticeLevel::Danger, &message);
                    }
                    DashboardError::Fetch(_) => self.notifier.notify(NoticeLevel::Danger, &message),
                }
                RefreshOutcome::Failed
            }
        }
    }

    async fn load(&self, filter: &Filter) -> Result<DashboardSummary, DashboardError> {
        let store = self.store.as_ref();
        let (inputs, cards) = futures::try_join!(
            fetch_dashboard_inputs(store, filter),
            fetch_summary_cards(store, filter)
        )?;
        let window = ActivityWindow::for_filter(filter, self.today);
        let summary = summarize(&inputs, &self.config.sections, window).with_cards(cards);
        self.library.ensure_loaded().await?;
        Ok(summary)
    }

    fn render(&self, summary: &DashboardSummary) {
        self.draw(build_charts(summary));
    }

    fn draw(&self, specs: Vec<ChartSpec>) {
        let failures = self
            .registry
            .borrow_mut()
            .render_all(self.renderer.as_ref(), &self.surfaces, specs);
        for (_, e) in failures {
            self.notifier.notify(NoticeLevel::Warning, &e.to_string());
        }
    }

    /// Draw charts from embedded seeds ahead of the first fetch. Malformed
    /// seeds are reported and skipped.
    ///
    /// Returns `false` without drawing once a fetched summary has been
    /// applied, since seeds would replace live charts with stale ones.
    pub async fn render_seeds(&self, seeds: &SeedSet) -> Result<bool, DashboardError> {
        if self.state.borrow().summary.is_some() {
            log::info!("[farm] controller: summary already applied, ignoring seeds");
            return Ok(false);
        }
        self.library.ensure_loaded().await?;
        let (specs, errors) = seeds.build(&self.config.sections);
        for e in errors {
            self.notifier.notify(NoticeLevel::Warning, &e.to_string());
        }
        self.draw(specs);
        Ok(true)
    }

    fn replace_filter(&self, filter: Filter) {
        self.state.borrow_mut().filter = filter;
    }

    pub async fn toggle_farm(&self, id: RecordId) -> RefreshOutcome {
        self.replace_filter(self.filter().toggle_farm(id));
        self.refresh().await
    }

    pub async fn toggle_crop(&self, id: RecordId) -> RefreshOutcome {
        self.replace_filter(self.filter().toggle_crop(id));
        self.refresh().await
    }

    pub async fn toggle_project(&self, id: RecordId) -> RefreshOutcome {
        self.replace_filter(self.filter().toggle_project(id));
        self.refresh().await
    }

    pub async fn set_date_from(&self, date: Option<NaiveDate>) -> Result<RefreshOutcome, FilterError> {
        let filter = self.filter().with_date_from(date)?;
        self.replace_filter(filter);
        Ok(self.refresh().await)
    }

    pub async fn set_date_to(&self, date: Option<NaiveDate>) -> Result<RefreshOutcome, FilterError> {
        let filter = self.filter().with_date_to(date)?;
        self.replace_filter(filter);
        Ok(self.refresh().await)
    }

    pub async fn set_filter(&self, filter: Filter) -> Result<RefreshOutcome, FilterError> {
        self.update_filter(filter)?;
        Ok(self.refresh().await)
    }

    /// Replace the filter without refreshing. Follow with [`Self::apply_filters`].
    pub fn update_filter(&self, filter: Filter) -> Result<(), FilterError> {
        filter.validate()?;
        self.replace_filter(filter);
        Ok(())
    }

    pub async fn apply_filters(&self) -> RefreshOutcome {
        self.refresh().await
    }

    /// Forward a click on element `index` of the chart in `slot`. Returns the
    /// request sent, or `None` when the element links nowhere.
    pub fn on_chart_click(&self, slot: ChartSlot, index: usize) -> Option<NavigationRequest> {
        let target = self.registry.borrow().spec(slot)?.clicks.resolve(index)?;
        let request = target.request();
        self.navigator.navigate(request.clone());
        Some(request)
    }

    pub fn open_section(&self, section: Section) -> NavigationRequest {
        let request = section.request();
        self.navigator.navigate(request.clone());
        request
    }
}
