//! Live chart handles, one per slot.
//!
//! Every render pass destroys all live handles before creating any new one,
//! so no surface ever carries two charts. Creation is isolated per slot.

use crate::slot::ChartSlot;
use crate::spec::ChartSpec;
use crate::surface::{ChartHandle, ChartRenderer, RenderError, SurfaceMap};
use std::collections::BTreeMap;

#[derive(Default)]
pub struct ChartRegistry {
    live: BTreeMap<ChartSlot, Box<dyn ChartHandle>>,
    specs: BTreeMap<ChartSlot, ChartSpec>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispose_all(&mut self) {
        let count = self.live.len();
        for (_, mut handle) in std::mem::take(&mut self.live) {
            handle.destroy();
        }
        self.specs.clear();
        if count > 0 {
            log::info!("[farm] registry: destroyed {} charts", count);
        }
    }

    /// Replace every chart with one built from `specs`. Returns the slots
    /// that failed; the rest are live afterwards.
    pub fn render_all(
        &mut self,
        renderer: &dyn ChartRenderer,
        surfaces: &SurfaceMap,
        specs: Vec<ChartSpec>,
    ) -> Vec<(ChartSlot, RenderError)> {
        self.dispose_all();

        let mut failures = Vec::new();
        for spec in specs {
            let slot = spec.slot;
            let created = surfaces
                .surface(slot)
                .ok_or(RenderError::MissingSurface(slot))
                .and_then(|surface| renderer.create(surface, &spec));
            match created {
                Ok(handle) => {
                    self.live.insert(slot, handle);
                    self.specs.insert(slot, spec);
                }
                Err(e) => {
                    log::error!("[farm] registry: {}", e);
                    failures.push((slot, e));
                }
            }
        }
        log::info!(
            "[farm] registry: {} charts live, {} failed",
            self.live.len(),
            failures.len()
        );
        failures
    }

    /// The [`ChartSpec`] currently drawn in `slot`.
    pub fn spec(&self, slot: ChartSlot) -> Option<&ChartSpec> {
        self.specs.get(&slot)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, slot: ChartSlot) -> bool {
        self.live.contains_key(&slot)
    }
}

impl Drop for ChartRegistry {
    fn drop(&mut self) {
        self.dispose_all();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Renderer that records lifecycle events and can refuse one slot.
    #[derive(Default)]
    pub struct FakeRenderer {
        pub events: Rc<RefCell<Vec<String>>>,
        pub fail_slot: Option<ChartSlot>,
    }

    impl FakeRenderer {
        pub fn count(&self, prefix: &str) -> usize {
            self.events.borrow().iter().filter(|e| e.starts_with(prefix)).count()
        }
    }

    struct FakeHandle {
        surface: String,
        events: Rc<RefCell<Vec<String>>>,
    }

    impl ChartHandle for FakeHandle {
        fn update(&mut self, spec: &ChartSpec) -> Result<(), RenderError> {
            self.events.borrow_mut().push(format!("update {}", spec.slot));
            Ok(())
        }

        fn destroy(&mut self) {
            self.events.borrow_mut().push(format!("destroy {}", self.surface));
        }
    }

    impl ChartRenderer for FakeRenderer {
        fn create(&self, surface: &str, spec: &ChartSpec) -> Result<Box<dyn ChartHandle>, RenderError> {
            if self.fail_slot == Some(spec.slot) {
                return Err(RenderError::Renderer {
                    slot: spec.slot,
                    message: "canvas lost".into(),
                });
            }
            self.events.borrow_mut().push(format!("create {surface}"));
            Ok(Box::new(FakeHandle {
                surface: surface.to_string(),
                events: Rc::clone(&self.events),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeRenderer;
    use super::*;
    use crate::builder::build_charts;
    use farm_data::DashboardSummary;

    fn specs() -> Vec<ChartSpec> {
        build_charts(&DashboardSummary::default())
    }

    #[test]
    fn previous_charts_are_destroyed_before_creation() {
        let renderer = FakeRenderer::default();
        let mut registry = ChartRegistry::new();
        registry.render_all(&renderer, &SurfaceMap::default(), specs());
        registry.render_all(&renderer, &SurfaceMap::default(), specs());

        assert_eq!(
            *renderer.events.borrow(),
            vec![
                "create projectStageChart",
                "create projectCropChart",
                "destroy projectStageChart",
                "destroy projectCropChart",
                "create projectStageChart",
                "create projectCropChart",
            ]
        );
        assert_eq!(registry.live_count(), 2);
    }

    #[test]
    fn one_failing_slot_does_not_stop_siblings() {
        let renderer = FakeRenderer {
            fail_slot: Some(ChartSlot::ProjectStage),
            ..FakeRenderer::default()
        };
        let mut registry = ChartRegistry::new();
        let failures = registry.render_all(&renderer, &SurfaceMap::default(), specs());
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, ChartSlot::ProjectStage);
        assert!(registry.is_live(ChartSlot::ProjectCrop));
        assert!(registry.spec(ChartSlot::ProjectStage).is_none());
    }

    #[test]
    fn unbound_slot_is_a_render_error() {
        let mut surfaces = SurfaceMap::default();
        surfaces.bind(ChartSlot::ProjectCrop, "");
        let mut registry = ChartRegistry::new();
        let failures = registry.render_all(&FakeRenderer::default(), &surfaces, specs());
        assert_eq!(failures, vec![(ChartSlot::ProjectCrop, RenderError::MissingSurface(ChartSlot::ProjectCrop))]);
    }

    #[test]
    fn drop_destroys_live_charts() {
        let renderer = FakeRenderer::default();
        {
            let mut registry = ChartRegistry::new();
            registry.render_all(&renderer, &SurfaceMap::default(), specs());
        }
        assert_eq!(renderer.count("destroy"), 2);
    }
}
