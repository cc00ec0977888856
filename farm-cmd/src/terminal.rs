//! A text chart renderer for the terminal.
//!
//! Each chart becomes a block of horizontal bars, one row per label and
//! dataset. Datasets on the same value axis share one scale.

use farm_chart_ui::{ChartHandle, ChartRenderer, ChartSpec, RenderError};
use std::cell::RefCell;
use std::fmt::Write;
use std::rc::Rc;

pub const DEFAULT_WIDTH: usize = 40;

fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * width as f64).round() as usize;
    "#".repeat(len.max(1))
}

/// Render a chart spec as plain text.
pub fn render_text(surface: &str, spec: &ChartSpec, width: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} [{}] ==", spec.title, surface);
    if spec.is_empty() {
        let _ = writeln!(out, "  (no data)");
        return out;
    }

    let label_width = spec.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let multi = spec.datasets.len() > 1;
    for (i, label) in spec.labels.iter().enumerate() {
        for ds in &spec.datasets {
            let value = ds.data.get(i).copied().unwrap_or(0.0);
            let max = spec
                .datasets
                .iter()
                .filter(|other| other.axis == ds.axis)
                .flat_map(|other| other.data.iter().copied())
                .fold(0.0, f64::max);
            let name = if multi { format!("{} / {}", label, ds.label) } else { label.clone() };
            let _ = writeln!(
                out,
                "  {:<w$} | {:<bw$} {}",
                name,
                bar(value, max, width),
                value,
                w = if multi { label_width + 3 + ds.label.len() } else { label_width },
                bw = width
            );
        }
    }
    out
}

/// Collects rendered charts for printing.
#[derive(Default)]
pub struct TerminalRenderer {
    width: usize,
    output: Rc<RefCell<String>>,
}

impl TerminalRenderer {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            output: Rc::default(),
        }
    }

    /// Everything rendered since the last call.
    pub fn take_output(&self) -> String {
        std::mem::take(&mut *self.output.borrow_mut())
    }
}

struct TerminalChart {
    surface: String,
    width: usize,
    output: Rc<RefCell<String>>,
}

impl ChartHandle for TerminalChart {
    fn update(&mut self, spec: &ChartSpec) -> Result<(), RenderError> {
        self.output
            .borrow_mut()
            .push_str(&render_text(&self.surface, spec, self.width));
        Ok(())
    }

    fn destroy(&mut self) {
        log::debug!("[farm] terminal: released {}", self.surface);
    }
}

impl ChartRenderer for TerminalRenderer {
    fn create(&self, surface: &str, spec: &ChartSpec) -> Result<Box<dyn ChartHandle>, RenderError> {
        let mut chart = TerminalChart {
            surface: surface.to_string(),
            width: self.width,
            output: Rc::clone(&self.output),
        };
        chart.update(spec)?;
        Ok(Box::new(chart))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farm_chart_ui::builder::{budget_chart, stage_chart};
    use farm_data::{BudgetRow, CostSummary, OverviewSummary};

    #[test]
    fn bars_scale_to_axis_max() {
        assert_eq!(bar(10.0, 10.0, 20).len(), 20);
        assert_eq!(bar(5.0, 10.0, 20).len(), 10);
        assert_eq!(bar(0.01, 10.0, 20).len(), 1);
        assert!(bar(0.0, 0.0, 20).is_empty());
    }

    #[test]
    fn renders_each_dataset_per_label() {
        let cost = CostSummary {
            budget_vs_actual: vec![BudgetRow {
                project_id: 1,
                project_name: "Maize".into(),
                budget: 1000.0,
                actual: 800.0,
                variance: 200.0,
                variance_percentage: 20.0,
            }],
            ..CostSummary::default()
        };
        let text = render_text("budgetActualChart", &budget_chart(&cost), 10);
        assert!(text.starts_with("== Budget vs Actual Cost [budgetActualChart] =="));
        assert!(text.contains("Maize / Budget | ##########"));
        assert!(text.contains("Maize / Actual | ########"));
    }

    #[test]
    fn empty_chart_says_so() {
        let mut overview = OverviewSummary::default();
        overview.stage_counts.clear();
        let text = render_text("s", &stage_chart(&overview), 10);
        assert!(text.contains("(no data)"));
    }

    #[test]
    fn renderer_collects_output() {
        let renderer = TerminalRenderer::new(5);
        let mut handle = renderer
            .create("projectStageChart", &stage_chart(&OverviewSummary::default()))
            .unwrap();
        handle.destroy();
        let out = renderer.take_output();
        assert!(out.contains("Projects by Stage"));
        assert!(renderer.take_output().is_empty());
    }
}
