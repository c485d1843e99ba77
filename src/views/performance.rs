use serde::Serialize;

use crate::catalog::ModelId;
use crate::table::{Metric, PerformanceTable};
use crate::views::format::fixed;
use crate::views::AxisSpec;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSpec {
    pub model: ModelId,
    pub x: &'static str,
    pub y: f64,
    pub text: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChartSpec {
    pub id: String,
    pub metric: String,
    pub title: String,
    pub mode: &'static str,
    pub points: Vec<PointSpec>,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub show_legend: bool,
}

/// One metric across the models in `table`, benchmark excluded.
pub fn performance_chart(table: &PerformanceTable, metric: &Metric) -> LineChartSpec {
    let title = metric.display_name().into_owned();
    let points = table
        .model_rows()
        .filter_map(|(model, row)| {
            table.value(row, metric).map(|y| PointSpec {
                model,
                x: model.label(),
                y,
                text: fixed(y, 4),
                color: model.color(),
            })
        })
        .collect();

    LineChartSpec {
        id: format!("performance-{}", metric.column_name()),
        metric: metric.column_name().to_string(),
        points,
        mode: "lines+markers+text",
        x_axis: AxisSpec::hidden_ticks(Some("Model")),
        y_axis: AxisSpec::titled(&title),
        title,
        show_legend: false,
    }
}

/// The full ordered chart set.
pub fn performance_charts(table: &PerformanceTable) -> Vec<LineChartSpec> {
    Metric::display_order()
        .iter()
        .map(|metric| performance_chart(table, metric))
        .collect()
}
