//! Immutable in-memory tables loaded at startup.
//!
//! Model-keyed tables hold one row per model; entity-keyed tables hold one row
//! per stock and one column per model. Columns are keyed by [`ModelId`], never
//! by free-form strings.

use serde::Serialize;
use std::borrow::Cow;

use crate::catalog::{ModelId, BENCHMARK_LABEL};

// =============================================================================
// Hyperparameters
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HyperparameterRow {
    pub model: ModelId,
    pub alpha: f64,
    pub lambda: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HyperparameterTable {
    pub rows: Vec<HyperparameterRow>,
}

impl HyperparameterTable {
    pub fn new(rows: Vec<HyperparameterRow>) -> Self {
        Self { rows }
    }

    pub fn models(&self) -> Vec<ModelId> {
        self.rows.iter().map(|r| r.model).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Hyperparameter {
    Alpha,
    Lambda,
}

impl Hyperparameter {
    pub fn value(&self, row: &HyperparameterRow) -> f64 {
        match self {
            Hyperparameter::Alpha => row.alpha,
            Hyperparameter::Lambda => row.lambda,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Hyperparameter::Alpha => "alpha",
            Hyperparameter::Lambda => "lambda",
        }
    }
}

// =============================================================================
// Entity tables (variable counts, coefficients)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelColumn<T> {
    pub model: ModelId,
    pub values: Vec<T>,
}

/// Wide table: entity column first, then one column per model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityTable<T> {
    pub entities: Vec<String>,
    pub columns: Vec<ModelColumn<T>>,
}

impl<T> Default for EntityTable<T> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            columns: Vec::new(),
        }
    }
}

impl<T> EntityTable<T> {
    /// Returns `None` when a column's length differs from the entity count.
    pub fn new(entities: Vec<String>, columns: Vec<ModelColumn<T>>) -> Option<Self> {
        if columns.iter().any(|c| c.values.len() != entities.len()) {
            return None;
        }
        Some(Self { entities, columns })
    }

    pub fn n_rows(&self) -> usize {
        self.entities.len()
    }

    pub fn models(&self) -> Vec<ModelId> {
        self.columns.iter().map(|c| c.model).collect()
    }

    pub fn column(&self, model: ModelId) -> Option<&ModelColumn<T>> {
        self.columns.iter().find(|c| c.model == model)
    }
}

pub type VariableCountTable = EntityTable<u32>;

/// A coefficient cell: `None` when the source cell was empty or unparseable.
/// `Some(NaN)` is kept as-is.
pub type Coefficient = Option<f64>;

pub type CoefficientTable = EntityTable<Coefficient>;

/// Zero, NaN and absent cells carry the data-quality marker.
pub fn is_flagged(cell: Coefficient) -> bool {
    match cell {
        None => true,
        Some(v) => v.is_nan() || v == 0.0,
    }
}

// =============================================================================
// Performance
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "model", rename_all = "snake_case")]
pub enum RowKey {
    Model(ModelId),
    Benchmark,
}

impl RowKey {
    pub fn model(&self) -> Option<ModelId> {
        match self {
            RowKey::Model(m) => Some(*m),
            RowKey::Benchmark => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RowKey::Model(m) => m.label(),
            RowKey::Benchmark => BENCHMARK_LABEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    TrackingError,
    ActiveReturn,
    InformationRatio,
    Correlation,
    Beta,
    JensenAlpha,
    /// Column not in the known set, kept under its raw name.
    Other(String),
}

impl Metric {
    /// Fixed chart order.
    pub fn display_order() -> [Metric; 6] {
        [
            Metric::TrackingError,
            Metric::ActiveReturn,
            Metric::InformationRatio,
            Metric::Correlation,
            Metric::Beta,
            Metric::JensenAlpha,
        ]
    }

    pub fn from_column(name: &str) -> Metric {
        match name.trim() {
            "Tracking_Error" => Metric::TrackingError,
            "Active_Return" => Metric::ActiveReturn,
            "Information_Ratio" => Metric::InformationRatio,
            "Correlation_SP500" => Metric::Correlation,
            "Beta" => Metric::Beta,
            "Jensen_Alpha" => Metric::JensenAlpha,
            other => Metric::Other(other.to_string()),
        }
    }

    pub fn column_name(&self) -> &str {
        match self {
            Metric::TrackingError => "Tracking_Error",
            Metric::ActiveReturn => "Active_Return",
            Metric::InformationRatio => "Information_Ratio",
            Metric::Correlation => "Correlation_SP500",
            Metric::Beta => "Beta",
            Metric::JensenAlpha => "Jensen_Alpha",
            Metric::Other(name) => name,
        }
    }

    pub fn display_name(&self) -> Cow<'_, str> {
        match self {
            Metric::TrackingError => Cow::Borrowed("Tracking error"),
            Metric::ActiveReturn => Cow::Borrowed("Active return"),
            Metric::InformationRatio => Cow::Borrowed("Information ratio"),
            Metric::Correlation => Cow::Borrowed("Correlation"),
            Metric::Beta => Cow::Borrowed("Beta"),
            Metric::JensenAlpha => Cow::Borrowed("Jensen's alpha"),
            Metric::Other(name) => Cow::Owned(name.replace('_', " ")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceRow {
    pub key: RowKey,
    /// Aligned with [`PerformanceTable::metrics`].
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceTable {
    pub metrics: Vec<Metric>,
    pub rows: Vec<PerformanceRow>,
}

impl PerformanceTable {
    /// Returns `None` when a row's width differs from the metric count.
    pub fn new(metrics: Vec<Metric>, rows: Vec<PerformanceRow>) -> Option<Self> {
        if rows.iter().any(|r| r.values.len() != metrics.len()) {
            return None;
        }
        Some(Self { metrics, rows })
    }

    pub fn value(&self, row: &PerformanceRow, metric: &Metric) -> Option<f64> {
        let idx = self.metrics.iter().position(|m| m == metric)?;
        row.values.get(idx).copied()
    }

    /// Rows that take part in model comparisons.
    pub fn model_rows(&self) -> impl Iterator<Item = (ModelId, &PerformanceRow)> {
        self.rows.iter().filter_map(|r| r.key.model().map(|m| (m, r)))
    }

    pub fn benchmark(&self) -> Option<&PerformanceRow> {
        self.rows.iter().find(|r| r.key == RowKey::Benchmark)
    }
}

// =============================================================================
// Dataset store
// =============================================================================

/// The four tables, loaded once and shared read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub hyperparameters: HyperparameterTable,
    pub variable_counts: VariableCountTable,
    pub coefficients: CoefficientTable,
    pub performance: PerformanceTable,
}
