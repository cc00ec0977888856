//! Renderer-independent chart descriptions.
//!
//! A [`ChartSpec`] is everything a rendering library needs to draw one chart:
//! type, labels, datasets, display options and a click mapping from element
//! index to drill-down target. [`ChartSpec::to_config`] lowers it into the
//! `{type, data, options}` object shape common to canvas chart libraries.

use crate::navigation::NavTarget;
use crate::slot::ChartSlot;
use serde::Serialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Pie,
    Doughnut,
}

impl ChartType {
    /// Pie-like charts color each point; axis charts color each dataset.
    pub fn is_radial(&self) -> bool {
        matches!(self, ChartType::Pie | ChartType::Doughnut)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Colors {
    Single(String),
    PerPoint(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background: Colors,
    pub border: Option<Colors>,
    /// Overrides the chart type for this dataset (mixed bar/line charts).
    pub chart_type: Option<ChartType>,
    /// Value axis this dataset is plotted against.
    pub axis: Option<String>,
}

impl Dataset {
    pub fn new(label: impl Into<String>, data: Vec<f64>, background: Colors) -> Self {
        Self {
            label: label.into(),
            data,
            background,
            border: None,
            chart_type: None,
            axis: None,
        }
    }

    pub fn with_border(mut self, border: &str) -> Self {
        self.border = Some(Colors::Single(border.to_string()));
        self
    }

    pub fn with_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = Some(chart_type);
        self
    }

    pub fn on_axis(mut self, axis: &str) -> Self {
        self.axis = Some(axis.to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexAxis {
    X,
    Y,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scale {
    pub id: String,
    pub position: Position,
    pub title: Option<String>,
    pub begin_at_zero: bool,
    /// Draw grid lines across the chart area.
    pub grid: bool,
}

impl Scale {
    pub fn value_axis(id: &str) -> Self {
        Self {
            id: id.to_string(),
            position: Position::Left,
            title: None,
            begin_at_zero: true,
            grid: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub legend: Position,
    pub index_axis: IndexAxis,
    pub scales: Vec<Scale>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            legend: Position::Top,
            index_axis: IndexAxis::X,
            scales: Vec::new(),
        }
    }
}

/// Per-element drill-down targets, indexed like the chart labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClickMapping(Vec<Option<NavTarget>>);

impl ClickMapping {
    pub fn new(targets: Vec<Option<NavTarget>>) -> Self {
        Self(targets)
    }

    pub fn none() -> Self {
        Self::default()
    }

    /// Target of the element at `index`; `None` when the element has no link.
    pub fn resolve(&self, index: usize) -> Option<NavTarget> {
        self.0.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Option<NavTarget>> for ClickMapping {
    fn from_iter<I: IntoIterator<Item = Option<NavTarget>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub slot: ChartSlot,
    pub chart_type: ChartType,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub options: ChartOptions,
    #[serde(skip)]
    pub clicks: ClickMapping,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Lower into a `{type, data, options}` chart configuration object.
    pub fn to_config(&self) -> Value {
        let datasets: Vec<Value> = self
            .datasets
            .iter()
            .map(|ds| {
                let mut obj = Map::new();
                obj.insert("label".into(), json!(ds.label));
                obj.insert("data".into(), json!(ds.data));
                obj.insert("backgroundColor".into(), json!(ds.background));
                if let Some(border) = &ds.border {
                    obj.insert("borderColor".into(), json!(border));
                    obj.insert("borderWidth".into(), json!(1));
                }
                if let Some(t) = ds.chart_type {
                    obj.insert("type".into(), json!(t));
                }
                if let Some(axis) = &ds.axis {
                    obj.insert("yAxisID".into(), json!(axis));
                }
                Value::Object(obj)
            })
            .collect();

        let mut options = Map::new();
        options.insert("responsive".into(), json!(self.options.responsive));
        if self.options.index_axis == IndexAxis::Y {
            options.insert("indexAxis".into(), json!("y"));
        }
        options.insert(
            "plugins".into(),
            json!({
                "title": {"display": true, "text": self.title},
                "legend": {"position": self.options.legend},
            }),
        );
        if !self.options.scales.is_empty() {
            let scales: Map<String, Value> = self
                .options
                .scales
                .iter()
                .map(|s| {
                    let mut scale = json!({
                        "beginAtZero": s.begin_at_zero,
                        "position": s.position,
                    });
                    if let Some(title) = &s.title {
                        scale["title"] = json!({"display": true, "text": title});
                    }
                    if !s.grid {
                        scale["grid"] = json!({"drawOnChartArea": false});
                    }
                    (s.id.clone(), scale)
                })
                .collect();
            options.insert("scales".into(), Value::Object(scales));
        }

        json!({
            "type": self.chart_type,
            "data": {"labels": self.labels, "datasets": datasets},
            "options": options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed() -> ChartSpec {
        ChartSpec {
            slot: ChartSlot::Irrigation,
            chart_type: ChartType::Bar,
            title: "Irrigation".into(),
            labels: vec!["Maize".into()],
            datasets: vec![
                Dataset::new("Total Hours", vec![5.5], Colors::Single("blue".into()))
                    .with_border("navy")
                    .on_axis("y"),
                Dataset::new("Number of Irrigations", vec![2.0], Colors::Single("purple".into()))
                    .with_type(ChartType::Line)
                    .on_axis("y1"),
            ],
            options: ChartOptions {
                scales: vec![
                    Scale::value_axis("y"),
                    Scale {
                        position: Position::Right,
                        grid: false,
                        ..Scale::value_axis("y1")
                    },
                ],
                ..ChartOptions::default()
            },
            clicks: ClickMapping::new(vec![Some(NavTarget::Project(3))]),
        }
    }

    #[test]
    fn config_carries_mixed_dataset_types() {
        let config = mixed().to_config();
        assert_eq!(config["type"], "bar");
        assert_eq!(config["data"]["datasets"][1]["type"], "line");
        assert_eq!(config["data"]["datasets"][1]["yAxisID"], "y1");
        assert_eq!(config["data"]["datasets"][0]["borderWidth"], 1);
        assert_eq!(config["options"]["scales"]["y1"]["position"], "right");
        assert_eq!(config["options"]["scales"]["y1"]["grid"]["drawOnChartArea"], false);
        assert!(config["options"].get("indexAxis").is_none());
    }

    #[test]
    fn click_mapping_out_of_range_is_none() {
        let spec = mixed();
        assert_eq!(spec.clicks.resolve(0), Some(NavTarget::Project(3)));
        assert_eq!(spec.clicks.resolve(1), None);
        assert_eq!(ClickMapping::new(vec![None]).resolve(0), None);
    }
}
