//! Coefficient normalization and its session flag.

use serde::{Deserialize, Serialize};

use crate::table::{CoefficientTable, ModelColumn};

pub const LABEL_NORMALIZE: &str = "Normalize coefficients";
pub const LABEL_SHOW_RAW: &str = "Show raw coefficients";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizationFlag(bool);

impl NormalizationFlag {
    pub fn new(enabled: bool) -> Self {
        Self(enabled)
    }

    pub fn is_enabled(&self) -> bool {
        self.0
    }

    /// Flip and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.0 = !self.0;
        self.0
    }

    /// Button text for the current state: offers the opposite action.
    pub fn label(&self) -> &'static str {
        if self.0 {
            LABEL_SHOW_RAW
        } else {
            LABEL_NORMALIZE
        }
    }

    /// Normalized copy when enabled, plain copy otherwise.
    pub fn apply(&self, table: &CoefficientTable) -> CoefficientTable {
        if self.0 {
            normalize(table)
        } else {
            table.clone()
        }
    }
}

/// Sum of the finite values in a column. NaN and absent cells are skipped.
pub fn column_sum(values: &[Option<f64>]) -> f64 {
    values.iter().flatten().filter(|v| v.is_finite()).sum()
}

/// Rescale every model column to sum to 1. Zero-sum columns are left as-is.
pub fn normalize(table: &CoefficientTable) -> CoefficientTable {
    CoefficientTable {
        entities: table.entities.clone(),
        columns: table
            .columns
            .iter()
            .map(|col| {
                let total = column_sum(&col.values);
                if total == 0.0 {
                    return col.clone();
                }
                ModelColumn {
                    model: col.model,
                    values: col.values.iter().map(|v| v.map(|x| x / total)).collect(),
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ModelId;

    fn table(values: Vec<Option<f64>>) -> CoefficientTable {
        let entities = (0..values.len()).map(|i| format!("S{}", i)).collect();
        CoefficientTable::new(entities, vec![ModelColumn { model: ModelId::Ridge, values }]).unwrap()
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut flag = NormalizationFlag::default();
        assert_eq!(flag.label(), LABEL_NORMALIZE);
        assert!(flag.toggle());
        assert_eq!(flag.label(), LABEL_SHOW_RAW);
        assert!(!flag.toggle());
        assert_eq!(flag, NormalizationFlag::default());
        assert_eq!(flag.label(), LABEL_NORMALIZE);
    }

    #[test]
    fn test_columns_sum_to_one() {
        let out = normalize(&table(vec![Some(1.0), Some(3.0), None, Some(4.0)]));
        let col = &out.columns[0].values;
        assert!((column_sum(col) - 1.0).abs() < 1e-9);
        assert_eq!(col[0], Some(0.125));
        assert_eq!(col[2], None);
    }

    #[test]
    fn test_zero_sum_column_unchanged() {
        let src = table(vec![Some(0.0), Some(2.0), Some(f64::NAN), Some(-2.0)]);
        let out = normalize(&src);
        let col = &out.columns[0].values;
        assert_eq!(col[0], Some(0.0));
        assert_eq!(col[1], Some(2.0));
        assert!(col[2].unwrap().is_nan());
        assert_eq!(col[3], Some(-2.0));
    }

    #[test]
    fn test_disabled_flag_passes_through() {
        let src = table(vec![Some(2.0), Some(2.0)]);
        assert_eq!(NormalizationFlag::new(false).apply(&src), src);
        assert_eq!(NormalizationFlag::new(true).apply(&src).columns[0].values[0], Some(0.5));
    }
}
