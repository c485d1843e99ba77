//! Coefficient table view, its row operations and CSV export.
//!
//! Cell backgrounds are a data-quality signal: zero, NaN and absent cells are
//! marked so readers can see which stocks a model dropped. They are derived
//! from the displayed values, so they move with filtering and normalization.

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::cmp::Ordering;

use crate::catalog::{ModelId, DEFAULT_HEADER_COLOR};
use crate::table::{is_flagged, CoefficientTable, EntityTable, ModelColumn};
use crate::views::format::cell_text;

pub const QUALITY_COLOR: &str = "#ff4d4d";
pub const VALUE_COLOR: &str = "#85e085";
pub const ENTITY_COLUMN_ID: &str = "stock";
pub const ENTITY_COLUMN_NAME: &str = "Stock";
pub const FILTER_PLACEHOLDER: &str = "Filter...";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberFormat {
    pub precision: u8,
    pub scheme: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub numeric: bool,
    pub format: Option<NumberFormat>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellSpec {
    pub column: &'static str,
    /// Serialized as `null` for both NaN and absent; `text` tells them apart.
    pub value: Option<f64>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowSpec {
    pub entity: String,
    pub cells: Vec<CellSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellStyle {
    pub row_index: usize,
    pub column_id: &'static str,
    pub background: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderStyle {
    pub column_id: &'static str,
    pub background: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableOptions {
    pub sort_action: &'static str,
    pub filter_action: &'static str,
    pub filter_placeholder: &'static str,
    pub export_format: &'static str,
    pub fixed_header: bool,
    pub paginate: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            sort_action: "native",
            filter_action: "native",
            filter_placeholder: FILTER_PLACEHOLDER,
            export_format: "csv",
            fixed_header: true,
            paginate: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSpec {
    pub id: &'static str,
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<RowSpec>,
    pub cell_styles: Vec<CellStyle>,
    pub header_styles: Vec<HeaderStyle>,
    pub options: TableOptions,
}

/// Build the table spec for an already filtered (and possibly normalized) table.
pub fn coefficient_table(table: &CoefficientTable) -> TableSpec {
    let mut columns = vec![ColumnSpec {
        id: ENTITY_COLUMN_ID,
        name: ENTITY_COLUMN_NAME,
        numeric: false,
        format: None,
    }];
    columns.extend(table.columns.iter().map(|c| ColumnSpec {
        id: c.model.code(),
        name: c.model.label(),
        numeric: true,
        format: Some(NumberFormat {
            precision: 2,
            scheme: "e",
        }),
    }));

    let mut rows = Vec::with_capacity(table.n_rows());
    let mut cell_styles = Vec::with_capacity(table.n_rows() * table.columns.len());
    for (i, entity) in table.entities.iter().enumerate() {
        let mut cells = Vec::with_capacity(table.columns.len());
        for col in &table.columns {
            let cell = col.values[i];
            cells.push(CellSpec {
                column: col.model.code(),
                value: cell.filter(|v| v.is_finite()),
                text: cell_text(cell),
            });
            cell_styles.push(CellStyle {
                row_index: i,
                column_id: col.model.code(),
                background: if is_flagged(cell) { QUALITY_COLOR } else { VALUE_COLOR },
            });
        }
        rows.push(RowSpec {
            entity: entity.clone(),
            cells,
        });
    }

    let header_styles = std::iter::once(HeaderStyle {
        column_id: ENTITY_COLUMN_ID,
        background: DEFAULT_HEADER_COLOR,
        color: "white",
    })
    .chain(table.columns.iter().map(|c| HeaderStyle {
        column_id: c.model.code(),
        background: c.model.color(),
        color: "white",
    }))
    .collect();

    TableSpec {
        id: "coefficient-table",
        columns,
        rows,
        cell_styles,
        header_styles,
        options: TableOptions::default(),
    }
}

// =============================================================================
// Row operations (sort, substring filter)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRef {
    Entity,
    Model(ModelId),
}

impl ColumnRef {
    pub fn parse(raw: &str) -> Option<ColumnRef> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case(ENTITY_COLUMN_ID) {
            return Some(ColumnRef::Entity);
        }
        ModelId::parse(raw).map(ColumnRef::Model)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: ColumnRef,
    pub descending: bool,
}

fn select_rows(table: &CoefficientTable, order: &[usize]) -> CoefficientTable {
    EntityTable {
        entities: order.iter().map(|&i| table.entities[i].clone()).collect(),
        columns: table
            .columns
            .iter()
            .map(|c| ModelColumn {
                model: c.model,
                values: order.iter().map(|&i| c.values[i]).collect(),
            })
            .collect(),
    }
}

/// Stable sort. NaN and absent cells go last in either direction; a column
/// not present in the table leaves the order unchanged.
pub fn sort_rows(table: &CoefficientTable, key: SortKey) -> CoefficientTable {
    let mut order: Vec<usize> = (0..table.n_rows()).collect();
    match key.column {
        ColumnRef::Entity => {
            order.sort_by(|&a, &b| {
                let ord = table.entities[a].cmp(&table.entities[b]);
                if key.descending { ord.reverse() } else { ord }
            });
        }
        ColumnRef::Model(model) => {
            let Some(col) = table.column(model) else {
                return table.clone();
            };
            order.sort_by(|&a, &b| {
                let va = col.values[a].filter(|v| !v.is_nan());
                let vb = col.values[b].filter(|v| !v.is_nan());
                match (va, vb) {
                    (Some(x), Some(y)) => {
                        let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
                        if key.descending { ord.reverse() } else { ord }
                    }
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            });
        }
    }
    select_rows(table, &order)
}

/// Keep rows whose displayed text in `column` contains `needle`, ignoring case.
pub fn filter_rows(table: &CoefficientTable, column: ColumnRef, needle: &str) -> CoefficientTable {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return table.clone();
    }
    let order: Vec<usize> = (0..table.n_rows())
        .filter(|&i| {
            let text = match column {
                ColumnRef::Entity => table.entities[i].clone(),
                ColumnRef::Model(model) => match table.column(model) {
                    Some(col) => cell_text(col.values[i]),
                    None => return false,
                },
            };
            text.to_lowercase().contains(&needle)
        })
        .collect();
    select_rows(table, &order)
}

// =============================================================================
// Export
// =============================================================================

/// Comma-separated export with a header row. NaN and absent cells are empty.
pub fn export_csv(table: &CoefficientTable) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut header = vec![ENTITY_COLUMN_NAME];
    header.extend(table.columns.iter().map(|c| c.model.label()));
    writer.write_record(&header).context("write csv header")?;

    for (i, entity) in table.entities.iter().enumerate() {
        let mut record = Vec::with_capacity(table.columns.len() + 1);
        record.push(entity.clone());
        for col in &table.columns {
            record.push(match col.values[i] {
                Some(v) if !v.is_nan() => v.to_string(),
                _ => String::new(),
            });
        }
        writer.write_record(&record).context("write csv row")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("flush csv: {}", e.error()))?;
    String::from_utf8(bytes).context("csv is not utf-8")
}
