use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use thiserror::Error;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const CLASS_COLUMN: &str = "class";

/// Structured load failures.  All of them are fatal at startup.
#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: column '{column}' has invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("dataset contains no launch records")]
    Empty,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row containing `Launch Site`, `Payload Mass (kg)`, `class`
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., "class": ... }, ...]`
/// * `.parquet` – the same three columns, any numeric type for the numbers
///
/// Extra columns are ignored.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DatasetError::UnsupportedExtension(other.to_string()).into()),
    };

    Ok(LaunchDataset::from_records(records).ok_or(DatasetError::Empty)?)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<LaunchRecord>> {
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(DatasetError::MissingColumn(name))
    };
    let site_idx = column(SITE_COLUMN)?;
    let payload_idx = column(PAYLOAD_COLUMN)?;
    let class_idx = column(CLASS_COLUMN)?;

    let mut records = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row}"))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let site = cell(site_idx);
        if site.is_empty() {
            bail!(invalid(row, SITE_COLUMN, site));
        }
        let payload = parse_payload(cell(payload_idx), row)?;
        let outcome = parse_class(cell(class_idx), row)?;

        records.push(LaunchRecord::new(site, payload, outcome));
    }

    Ok(records)
}

fn parse_payload(text: &str, row: usize) -> Result<f64, DatasetError> {
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(row, PAYLOAD_COLUMN, text))
}

/// Accepts `0`/`1` as well as the `0.0`/`1.0` a float-typed export produces.
fn parse_class(text: &str, row: usize) -> Result<Outcome, DatasetError> {
    let class = match text.parse::<i64>() {
        Ok(i) => Outcome::try_from(i).ok(),
        Err(_) => text.parse::<f64>().ok().and_then(outcome_from_float),
    };
    class.ok_or_else(|| invalid(row, CLASS_COLUMN, text))
}

/// `0.0` and `1.0` only; fractional or non-finite values are not a class.
fn outcome_from_float(class: f64) -> Option<Outcome> {
    if class.is_finite() && class.fract() == 0.0 {
        Outcome::try_from(class as i64).ok()
    } else {
        None
    }
}

fn invalid(row: usize, column: &'static str, value: &str) -> DatasetError {
    DatasetError::InvalidValue {
        row,
        column,
        value: value.to_string(),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')` layout.
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON launch records")
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).  Numeric columns of any width are
/// cast to the types the model uses.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let column = |name: &'static str| -> Result<Arc<dyn Array>> {
            let idx = schema
                .index_of(name)
                .map_err(|_| DatasetError::MissingColumn(name))?;
            Ok(batch.column(idx).clone())
        };

        let sites = cast(&column(SITE_COLUMN)?, &DataType::Utf8)
            .context("casting launch site column to text")?;
        let payloads = cast(&column(PAYLOAD_COLUMN)?, &DataType::Float64)
            .context("casting payload column to float")?;
        // Through float so a fractional class is rejected instead of truncated.
        let classes = cast(&column(CLASS_COLUMN)?, &DataType::Float64)
            .context("casting class column to float")?;

        let sites = sites.as_string::<i32>();
        let payloads = payloads.as_primitive::<Float64Type>();
        let classes = classes.as_primitive::<Float64Type>();

        for i in 0..batch.num_rows() {
            let row = records.len();
            if sites.is_null(i) || sites.value(i).is_empty() {
                bail!(invalid(row, SITE_COLUMN, "<null>"));
            }
            if payloads.is_null(i) || !payloads.value(i).is_finite() {
                bail!(invalid(row, PAYLOAD_COLUMN, "<null>"));
            }
            if classes.is_null(i) {
                bail!(invalid(row, CLASS_COLUMN, "<null>"));
            }
            let class = classes.value(i);
            let outcome = outcome_from_float(class)
                .ok_or_else(|| invalid(row, CLASS_COLUMN, &class.to_string()))?;

            records.push(LaunchRecord::new(sites.value(i), payloads.value(i), outcome));
        }
    }

    Ok(records)
}
