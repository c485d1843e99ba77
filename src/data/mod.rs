//! Load-time reading of the four result files.
//!
//! Model short codes are mapped to catalog identifiers here. Any malformed
//! input is fatal: the dashboard refuses to start on data it cannot trust.
//! Coefficient cells are the exception, an empty or unparseable cell is an
//! absent value rather than an error.

use anyhow::{anyhow, bail, Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::catalog::{ModelId, BENCHMARK_CODE};
use crate::logging::log_dataset_loaded;
use crate::table::{
    Coefficient, CoefficientTable, Dataset, EntityTable, HyperparameterRow, HyperparameterTable,
    Metric, ModelColumn, PerformanceRow, PerformanceTable, RowKey, VariableCountTable,
};

pub const HYPERPARAMETERS_FILE: &str = "hyperparameters.csv";
pub const VARIABLE_COUNTS_FILE: &str = "nb_variables.csv";
pub const COEFFICIENTS_FILE: &str = "coefficients.csv";
pub const PERFORMANCE_FILE: &str = "performance.csv";

pub const ENTITY_COLUMN: &str = "stock";
pub const PERFORMANCE_KEY_COLUMN: &str = "Index_ETF";

/// Fingerprint of one loaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileManifest {
    pub name: String,
    pub path: String,
    pub hash_sha256: String,
    pub rows: usize,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetManifest {
    pub files: Vec<FileManifest>,
}

/// Load all four tables from `dir`.
pub fn load_dataset(dir: &Path) -> Result<(Dataset, DatasetManifest)> {
    let mut files = Vec::with_capacity(4);

    let (hyperparameters, m) = load_hyperparameters(&dir.join(HYPERPARAMETERS_FILE))?;
    files.push(m);
    let (variable_counts, m) = load_variable_counts(&dir.join(VARIABLE_COUNTS_FILE))?;
    files.push(m);
    let (coefficients, m) = load_coefficients(&dir.join(COEFFICIENTS_FILE))?;
    files.push(m);
    let (performance, m) = load_performance(&dir.join(PERFORMANCE_FILE))?;
    files.push(m);

    for f in &files {
        log_dataset_loaded(&f.name, &f.path, &f.hash_sha256, f.rows, f.columns.len());
    }

    Ok((
        Dataset {
            hyperparameters,
            variable_counts,
            coefficients,
            performance,
        },
        DatasetManifest { files },
    ))
}

// =============================================================================
// Per-file loaders
// =============================================================================

#[derive(Debug, Deserialize)]
struct HyperparameterRecord {
    #[serde(rename = "Model")]
    model: String,
    alpha: f64,
    lambda: f64,
}

pub fn load_hyperparameters(path: &Path) -> Result<(HyperparameterTable, FileManifest)> {
    let mut reader = open(path)?;
    let columns = header_names(reader.headers().with_context(|| ctx(path, "read header"))?);

    let mut rows: Vec<HyperparameterRow> = Vec::new();
    for (i, record) in reader.deserialize::<HyperparameterRecord>().enumerate() {
        let record = record.with_context(|| format!("{}: row {}", path.display(), i + 1))?;
        let model = parse_model(&record.model).with_context(|| ctx(path, &format!("row {}", i + 1)))?;
        if rows.iter().any(|r| r.model == model) {
            bail!("{}: duplicate row for model {}", path.display(), model.code());
        }
        if !(0.0..=1.0).contains(&record.alpha) {
            bail!("{}: alpha {} out of [0, 1] for {}", path.display(), record.alpha, model.code());
        }
        if !(record.lambda >= 0.0) {
            bail!(
                "{}: lambda must be a non-negative number, got {} for {}",
                path.display(),
                record.lambda,
                model.code()
            );
        }
        rows.push(HyperparameterRow {
            model,
            alpha: record.alpha,
            lambda: record.lambda,
        });
    }

    let manifest = manifest("hyperparameters", path, rows.len(), columns)?;
    Ok((HyperparameterTable::new(rows), manifest))
}

pub fn load_variable_counts(path: &Path) -> Result<(VariableCountTable, FileManifest)> {
    load_entity_table(path, "variable_counts", |raw| {
        parse_count(raw).ok_or_else(|| anyhow!("not a non-negative integer count: {:?}", raw))
    })
}

pub fn load_coefficients(path: &Path) -> Result<(CoefficientTable, FileManifest)> {
    // NaN is a flagged cell; infinities are rejected.
    load_entity_table(path, "coefficients", |raw| match parse_coefficient(raw) {
        Some(v) if v.is_infinite() => bail!("infinite coefficient {:?}", raw),
        cell => Ok(cell),
    })
}

pub fn load_performance(path: &Path) -> Result<(PerformanceTable, FileManifest)> {
    let mut reader = open(path)?;
    let headers = reader.headers().with_context(|| ctx(path, "read header"))?.clone();
    let columns = header_names(&headers);
    let key_idx = column_index(&headers, PERFORMANCE_KEY_COLUMN)
        .ok_or_else(|| anyhow!("{}: missing key column {}", path.display(), PERFORMANCE_KEY_COLUMN))?;

    let metric_idx: Vec<usize> = (0..headers.len()).filter(|&i| i != key_idx).collect();
    let metrics: Vec<Metric> = metric_idx.iter().map(|&i| Metric::from_column(&headers[i])).collect();

    let mut rows: Vec<PerformanceRow> = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("{}: row {}", path.display(), i + 1))?;
        let raw_key = record.get(key_idx).unwrap_or("");
        let key = if raw_key.eq_ignore_ascii_case(BENCHMARK_CODE) {
            RowKey::Benchmark
        } else {
            RowKey::Model(parse_model(raw_key).with_context(|| ctx(path, &format!("row {}", i + 1)))?)
        };
        if rows.iter().any(|r| r.key == key) {
            bail!("{}: duplicate row for {}", path.display(), key.label());
        }
        let mut values = Vec::with_capacity(metric_idx.len());
        for &j in &metric_idx {
            let raw = record.get(j).unwrap_or("");
            let v: f64 = raw.parse().map_err(|_| {
                anyhow!("{}: row {} column {}: bad number {:?}", path.display(), i + 1, &headers[j], raw)
            })?;
            values.push(v);
        }
        rows.push(PerformanceRow { key, values });
    }

    let n = rows.len();
    let table = PerformanceTable::new(metrics, rows)
        .ok_or_else(|| anyhow!("{}: ragged rows", path.display()))?;
    Ok((table, manifest("performance", path, n, columns)?))
}

// =============================================================================
// Helpers
// =============================================================================

fn load_entity_table<T, F>(path: &Path, name: &str, parse: F) -> Result<(EntityTable<T>, FileManifest)>
where
    F: Fn(&str) -> Result<T>,
{
    let mut reader = open(path)?;
    let headers = reader.headers().with_context(|| ctx(path, "read header"))?.clone();
    let columns = header_names(&headers);
    let key_idx = column_index(&headers, ENTITY_COLUMN)
        .ok_or_else(|| anyhow!("{}: missing entity column {}", path.display(), ENTITY_COLUMN))?;

    let mut model_idx: Vec<(usize, ModelId)> = Vec::new();
    for (i, h) in headers.iter().enumerate() {
        if i == key_idx {
            continue;
        }
        let model = parse_model(h).with_context(|| ctx(path, "header"))?;
        if model_idx.iter().any(|(_, m)| *m == model) {
            bail!("{}: duplicate column for model {}", path.display(), model.code());
        }
        model_idx.push((i, model));
    }

    let mut entities = Vec::new();
    let mut values: Vec<Vec<T>> = model_idx.iter().map(|_| Vec::new()).collect();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("{}: row {}", path.display(), row + 1))?;
        entities.push(record.get(key_idx).unwrap_or("").to_string());
        for (slot, &(i, model)) in model_idx.iter().enumerate() {
            let cell = parse(record.get(i).unwrap_or("")).with_context(|| {
                format!("{}: row {} column {}", path.display(), row + 1, model.code())
            })?;
            values[slot].push(cell);
        }
    }

    let n = entities.len();
    let cols = model_idx
        .into_iter()
        .zip(values)
        .map(|((_, model), values)| ModelColumn { model, values })
        .collect();
    let table = EntityTable::new(entities, cols).ok_or_else(|| anyhow!("{}: ragged rows", path.display()))?;
    Ok((table, manifest(name, path, n, columns)?))
}

fn open(path: &Path) -> Result<csv::Reader<File>> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)
        .with_context(|| ctx(path, "open"))
}

fn ctx(path: &Path, what: &str) -> String {
    format!("{}: {}", path.display(), what)
}

fn header_names(headers: &StringRecord) -> Vec<String> {
    headers.iter().map(|h| h.to_string()).collect()
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

fn parse_model(raw: &str) -> Result<ModelId> {
    ModelId::parse(raw).ok_or_else(|| anyhow!("unknown model code {:?}", raw))
}

/// Integer counts, tolerating a float rendering such as `5.0`.
pub fn parse_count(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u32>() {
        return Some(n);
    }
    let v: f64 = raw.parse().ok()?;
    if v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 {
        Some(v as u32)
    } else {
        None
    }
}

pub fn parse_coefficient(raw: &str) -> Coefficient {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok()
}

fn manifest(name: &str, path: &Path, rows: usize, columns: Vec<String>) -> Result<FileManifest> {
    Ok(FileManifest {
        name: name.to_string(),
        path: path.display().to_string(),
        hash_sha256: file_sha256(path)?,
        rows,
        columns,
    })
}

pub fn file_sha256(path: &Path) -> Result<String> {
    let mut file = File::open(path).with_context(|| ctx(path, "open"))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf).with_context(|| ctx(path, "read"))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("5"), Some(5));
        assert_eq!(parse_count("5.0"), Some(5));
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count("2.5"), None);
        assert_eq!(parse_count(""), None);
    }

    #[test]
    fn test_parse_coefficient() {
        assert_eq!(parse_coefficient(""), None);
        assert_eq!(parse_coefficient("NA"), None);
        assert_eq!(parse_coefficient("1.5e-3"), Some(0.0015));
        assert!(parse_coefficient("NaN").unwrap().is_nan());
    }
}
