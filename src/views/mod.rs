//! View generators: pure functions from filtered tables to render specs.
//!
//! Specs are plain serde structs. The browser draws them; nothing here knows
//! about pixels beyond the colors that carry meaning.

pub mod coefficients;
pub mod counts;
pub mod format;
pub mod hyperparams;
pub mod legend;
pub mod performance;

use serde::Serialize;

pub use coefficients::{coefficient_table, export_csv, ColumnRef, SortKey, TableSpec};
pub use counts::{melt, variable_count_chart, TallCount};
pub use hyperparams::{alpha_chart, hyperparameter_chart, lambda_chart};
pub use legend::{legend, model_dropdown, DropdownSpec, LegendSpec};
pub use performance::{performance_chart, performance_charts, LineChartSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSpec {
    pub title: Option<String>,
    /// `None` lets the renderer autoscale.
    pub range: Option<[f64; 2]>,
    pub show_grid: bool,
    pub show_tick_labels: bool,
}

impl AxisSpec {
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            range: None,
            show_grid: true,
            show_tick_labels: true,
        }
    }

    pub fn hidden_ticks(title: Option<&str>) -> Self {
        Self {
            title: title.map(str::to_string),
            range: None,
            show_grid: false,
            show_tick_labels: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSpec {
    /// Category the bar sits on (model label).
    pub category: String,
    pub entity: Option<String>,
    pub value: f64,
    pub text: String,
    pub hover: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartSpec {
    pub id: &'static str,
    pub title: String,
    pub orientation: Orientation,
    pub bars: Vec<BarSpec>,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub show_legend: bool,
}

impl BarChartSpec {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
