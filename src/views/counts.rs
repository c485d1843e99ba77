use serde::Serialize;

use crate::catalog::ModelId;
use crate::table::VariableCountTable;
use crate::views::{AxisSpec, BarChartSpec, BarSpec, Orientation};

/// One observation of the tall form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallCount {
    pub model: ModelId,
    pub entity: String,
    pub count: u32,
}

/// Wide to tall: model columns in table order, entities in row order within each.
pub fn melt(table: &VariableCountTable) -> Vec<TallCount> {
    table
        .columns
        .iter()
        .flat_map(|col| {
            table
                .entities
                .iter()
                .zip(&col.values)
                .map(move |(entity, &count)| TallCount {
                    model: col.model,
                    entity: entity.clone(),
                    count,
                })
        })
        .collect()
}

pub fn variable_count_chart(table: &VariableCountTable) -> BarChartSpec {
    let bars = melt(table)
        .into_iter()
        .map(|obs| BarSpec {
            category: obs.model.label().to_string(),
            hover: format!("<b>{}</b><br>{}: {} variables", obs.model.label(), obs.entity, obs.count),
            entity: Some(obs.entity),
            value: f64::from(obs.count),
            text: obs.count.to_string(),
            color: obs.model.color(),
        })
        .collect();

    BarChartSpec {
        id: "variable-count-chart",
        title: "Number of variables by model".to_string(),
        orientation: Orientation::Vertical,
        bars,
        x_axis: AxisSpec::hidden_ticks(Some("Model")),
        y_axis: AxisSpec::titled("Number of variables"),
        show_legend: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{EntityTable, ModelColumn};

    #[test]
    fn test_melt_single_row() {
        let t = EntityTable::new(
            vec!["AAPL".to_string()],
            vec![
                ModelColumn { model: ModelId::Ridge, values: vec![5u32] },
                ModelColumn { model: ModelId::Lasso, values: vec![0] },
            ],
        )
        .unwrap();
        let tall = melt(&t);
        let pairs: Vec<_> = tall.iter().map(|o| (o.model, o.count)).collect();
        assert_eq!(pairs, vec![(ModelId::Ridge, 5), (ModelId::Lasso, 0)]);
    }

    #[test]
    fn test_melt_is_column_major() {
        let t = EntityTable::new(
            vec!["A".to_string(), "B".to_string()],
            vec![
                ModelColumn { model: ModelId::Ridge, values: vec![1u32, 2] },
                ModelColumn { model: ModelId::Lasso, values: vec![3, 4] },
            ],
        )
        .unwrap();
        let counts: Vec<_> = melt(&t).iter().map(|o| o.count).collect();
        assert_eq!(counts, vec![1, 2, 3, 4]);
        assert_eq!(melt(&t)[2].entity, "A");
    }

    #[test]
    fn test_chart_labels_integer_counts() {
        let t = EntityTable::new(
            vec!["AAPL".to_string()],
            vec![ModelColumn { model: ModelId::Adlasso, values: vec![17u32] }],
        )
        .unwrap();
        let spec = variable_count_chart(&t);
        assert_eq!(spec.bars.len(), 1);
        assert_eq!(spec.bars[0].text, "17");
        assert_eq!(spec.bars[0].color, ModelId::Adlasso.color());
        assert_eq!(spec.orientation, Orientation::Vertical);
    }
}
