//! Rendering backend interface and slot-to-surface binding.

use crate::slot::ChartSlot;
use crate::spec::ChartSpec;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// No surface is bound to the slot.
    #[error("no surface bound for chart {0}")]
    MissingSurface(ChartSlot),
    /// The rendering backend rejected the chart.
    #[error("failed to render {slot}: {message}")]
    Renderer { slot: ChartSlot, message: String },
}

/// A live chart drawn into one surface.
pub trait ChartHandle {
    fn update(&mut self, spec: &ChartSpec) -> Result<(), RenderError>;

    /// Release the surface. Called exactly once per handle.
    fn destroy(&mut self);
}

pub trait ChartRenderer {
    fn create(&self, surface: &str, spec: &ChartSpec) -> Result<Box<dyn ChartHandle>, RenderError>;
}

/// Surface ids per slot. Slots fall back to their default surface unless
/// overridden; an override of `""` unbinds the slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMap {
    overrides: BTreeMap<ChartSlot, String>,
}

impl SurfaceMap {
    pub fn new(overrides: BTreeMap<ChartSlot, String>) -> Self {
        Self { overrides }
    }

    pub fn bind(&mut self, slot: ChartSlot, surface: impl Into<String>) {
        self.overrides.insert(slot, surface.into());
    }

    pub fn surface(&self, slot: ChartSlot) -> Option<&str> {
        match self.overrides.get(&slot) {
            Some(s) if s.is_empty() => None,
            Some(s) => Some(s.as_str()),
            None => Some(slot.default_surface()),
        }
    }
}
