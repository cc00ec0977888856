//! Charts and the dashboard controller for the farm dashboard.
//!
//! This crate provides:
//! - `builder`, `seed`: renderer-independent [`ChartSpec`]s from a summary or
//!   from pre-serialized seeds
//! - `surface`, `registry`: the rendering backend interface and the one live
//!   chart per slot rule
//! - `library`: memoized one-time chart library loading
//! - `controller`: filter state, refreshes, stale-result guarding and
//!   drill-down navigation
//! - `config`: dashboard settings (look-back window, sections, surfaces)

pub mod builder;
pub mod config;
pub mod controller;
pub mod library;
pub mod navigation;
pub mod notify;
pub mod palette;
pub mod registry;
pub mod seed;
pub mod slot;
pub mod spec;
pub mod state;
pub mod surface;

pub use builder::build_charts;
pub use config::{ConfigError, DashboardConfig};
pub use controller::{DashboardController, DashboardError, RefreshOutcome};
pub use library::{BundledLibrary, ChartLibrary, LibraryInfo, LibraryLoadError, LibraryLoader};
pub use navigation::{NavTarget, NavigationRequest, Navigator, Section, ViewMode};
pub use notify::{NoticeLevel, Notifier};
pub use registry::ChartRegistry;
pub use seed::{build_from_seed, ChartError, SeedSet};
pub use slot::ChartSlot;
pub use spec::{ChartSpec, ChartType};
pub use state::{DashboardState, DashboardStatus};
pub use surface::{ChartHandle, ChartRenderer, RenderError, SurfaceMap};
