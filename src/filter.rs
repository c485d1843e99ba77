//! Filter engine: narrows tables to a model selection.
//!
//! Model-keyed tables lose rows, entity-keyed tables lose columns. Order is
//! always the source table's order, never the selection's.

use serde::{Deserialize, Serialize};

use crate::catalog::{ModelId, ALL_SENTINEL};
use crate::logging::{log, obj, v_str, Domain, Level};
use crate::table::{EntityTable, HyperparameterTable, PerformanceTable};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "models", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    All,
    /// Ordered, de-duplicated. May be empty when every requested id was unknown.
    Only(Vec<ModelId>),
}

impl Selection {
    /// Parse raw dropdown values. Empty input or exactly `["all"]` means no
    /// restriction; otherwise unknown values are dropped.
    pub fn from_values<S: AsRef<str>>(values: &[S]) -> Selection {
        if values.is_empty() || (values.len() == 1 && values[0].as_ref().trim() == ALL_SENTINEL) {
            return Selection::All;
        }
        let mut models = Vec::with_capacity(values.len());
        for raw in values {
            match ModelId::parse(raw.as_ref()) {
                Some(model) if !models.contains(&model) => models.push(model),
                Some(_) => {}
                None => log(
                    Level::Debug,
                    Domain::Filter,
                    "unknown_model_dropped",
                    obj(&[("value", v_str(raw.as_ref()))]),
                ),
            }
        }
        Selection::Only(models)
    }

    /// Explicit selection; an empty slice selects nothing.
    pub fn only(models: &[ModelId]) -> Selection {
        let mut out = Vec::with_capacity(models.len());
        for model in models {
            if !out.contains(model) {
                out.push(*model);
            }
        }
        Selection::Only(out)
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn contains(&self, model: ModelId) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(models) => models.contains(&model),
        }
    }

    /// Models to show in selection order (catalog order for `All`).
    pub fn shown_models(&self) -> Vec<ModelId> {
        match self {
            Selection::All => ModelId::ALL.to_vec(),
            Selection::Only(models) => models.clone(),
        }
    }

    /// Value to push back into the dropdown.
    pub fn dropdown_value(&self) -> Option<Vec<&'static str>> {
        match self {
            Selection::All => None,
            Selection::Only(models) => Some(models.iter().map(|m| m.code()).collect()),
        }
    }
}

pub trait Filterable: Sized {
    /// Fresh view restricted to `selection`; the source is untouched.
    fn filter(&self, selection: &Selection) -> Self;
}

impl Filterable for HyperparameterTable {
    fn filter(&self, selection: &Selection) -> Self {
        HyperparameterTable::new(
            self.rows
                .iter()
                .filter(|r| selection.contains(r.model))
                .cloned()
                .collect(),
        )
    }
}

impl<T: Clone> Filterable for EntityTable<T> {
    fn filter(&self, selection: &Selection) -> Self {
        EntityTable {
            entities: self.entities.clone(),
            columns: self
                .columns
                .iter()
                .filter(|c| selection.contains(c.model))
                .cloned()
                .collect(),
        }
    }
}

impl Filterable for PerformanceTable {
    /// The benchmark row survives only an unrestricted selection.
    fn filter(&self, selection: &Selection) -> Self {
        PerformanceTable {
            metrics: self.metrics.clone(),
            rows: self
                .rows
                .iter()
                .filter(|r| match (selection, r.key.model()) {
                    (Selection::All, _) => true,
                    (_, Some(model)) => selection.contains(model),
                    (_, None) => false,
                })
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{HyperparameterRow, ModelColumn};

    fn hyper() -> HyperparameterTable {
        HyperparameterTable::new(vec![
            HyperparameterRow { model: ModelId::Ridge, alpha: 1.0, lambda: 0.5 },
            HyperparameterRow { model: ModelId::Lasso, alpha: 0.0, lambda: 0.01 },
            HyperparameterRow { model: ModelId::En1, alpha: 0.5, lambda: 0.02 },
        ])
    }

    #[test]
    fn test_parse_sentinel_and_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(Selection::from_values(&empty), Selection::All);
        assert_eq!(Selection::from_values(&["all"]), Selection::All);
        assert_eq!(
            Selection::from_values(&["all", "ridge"]),
            Selection::Only(vec![ModelId::Ridge])
        );
    }

    #[test]
    fn test_parse_drops_unknown_and_duplicates() {
        let sel = Selection::from_values(&["lasso", "bogus", "Lasso", "ridge"]);
        assert_eq!(sel, Selection::Only(vec![ModelId::Lasso, ModelId::Ridge]));
        assert_eq!(Selection::from_values(&["bogus"]), Selection::Only(vec![]));
    }

    #[test]
    fn test_rows_keep_table_order() {
        let sel = Selection::from_values(&["en1", "ridge"]);
        let out = hyper().filter(&sel);
        assert_eq!(out.models(), vec![ModelId::Ridge, ModelId::En1]);
    }

    #[test]
    fn test_columns_keep_table_order() {
        let t = EntityTable::new(
            vec!["AAPL".to_string()],
            vec![
                ModelColumn { model: ModelId::Ridge, values: vec![1u32] },
                ModelColumn { model: ModelId::Lasso, values: vec![2] },
                ModelColumn { model: ModelId::Adlasso, values: vec![3] },
            ],
        )
        .unwrap();
        let out = t.filter(&Selection::from_values(&["adlasso", "ridge"]));
        assert_eq!(out.models(), vec![ModelId::Ridge, ModelId::Adlasso]);
        assert_eq!(out.entities, vec!["AAPL".to_string()]);
    }

    #[test]
    fn test_unknown_only_yields_empty() {
        let out = hyper().filter(&Selection::from_values(&["nope"]));
        assert!(out.rows.is_empty());
    }

    #[test]
    fn test_dropdown_value() {
        assert_eq!(Selection::All.dropdown_value(), None);
        assert_eq!(
            Selection::only(&[ModelId::En2]).dropdown_value(),
            Some(vec!["en2"])
        );
    }
}
