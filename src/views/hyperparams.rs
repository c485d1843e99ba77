use crate::table::{Hyperparameter, HyperparameterTable};
use crate::views::format::{fixed, scientific};
use crate::views::{AxisSpec, BarChartSpec, BarSpec, Orientation};

/// Alpha is a bounded mixing ratio.
pub const ALPHA_RANGE: [f64; 2] = [0.0, 1.1];
/// Lambda is unbounded; the axis tracks the largest shown value.
pub const LAMBDA_HEADROOM: f64 = 1.2;

pub fn alpha_chart(table: &HyperparameterTable) -> BarChartSpec {
    hyperparameter_chart(table, Hyperparameter::Alpha)
}

pub fn lambda_chart(table: &HyperparameterTable) -> BarChartSpec {
    hyperparameter_chart(table, Hyperparameter::Lambda)
}

/// One horizontal bar per model row.
pub fn hyperparameter_chart(table: &HyperparameterTable, param: Hyperparameter) -> BarChartSpec {
    let (id, axis_title, title) = match param {
        Hyperparameter::Alpha => ("alpha-chart", "Alpha value", "Alpha values by model"),
        Hyperparameter::Lambda => ("lambda-chart", "Lambda value", "Lambda values by model"),
    };

    let bars = table
        .rows
        .iter()
        .map(|row| {
            let value = param.value(row);
            let text = match param {
                Hyperparameter::Alpha => fixed(value, 2),
                Hyperparameter::Lambda => scientific(value, 2),
            };
            BarSpec {
                category: row.model.label().to_string(),
                entity: None,
                value,
                hover: format!("<b>{}</b><br>{} = {}", row.model.label(), axis_title, text),
                text,
                color: row.model.color(),
            }
        })
        .collect::<Vec<_>>();

    let range = match param {
        Hyperparameter::Alpha => Some(ALPHA_RANGE),
        Hyperparameter::Lambda => bars
            .iter()
            .map(|b| b.value)
            .reduce(f64::max)
            .map(|max| [0.0, max * LAMBDA_HEADROOM]),
    };

    BarChartSpec {
        id,
        title: title.to_string(),
        orientation: Orientation::Horizontal,
        bars,
        x_axis: AxisSpec {
            range,
            ..AxisSpec::titled(axis_title)
        },
        y_axis: AxisSpec::hidden_ticks(Some("Model")),
        show_legend: false,
    }
}
