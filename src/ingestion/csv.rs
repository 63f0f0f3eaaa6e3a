//! CSV parsing with column type inference.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::ServiceResult;
use crate::types::{Column, DataType, Table, Value};

use super::{resolve, unify, Observed};

/// Read a whole CSV file into a [`Table`].
///
/// Rules:
///
/// - The first record is the header row; column order follows it.
/// - Each column's type is inferred by scanning every value, then all values
///   are converted to that type (cells that no longer fit the unified type
///   fall back to their string form).
/// - Empty cells map to [`Value::Null`].
pub fn read_csv_table(path: impl AsRef<Path>) -> ServiceResult<Table> {
    let mut rdr = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();

    let mut records: Vec<::csv::StringRecord> = Vec::new();
    for result in rdr.records() {
        records.push(result?);
    }

    // First pass: fold every cell's observed class into a per-column type.
    let mut observed: Vec<Option<Observed>> = vec![None; headers.len()];
    for record in &records {
        for (idx, acc) in observed.iter_mut().enumerate() {
            let raw = record.get(idx).unwrap_or("");
            if let Some(cell) = classify_str(raw) {
                *acc = unify(*acc, cell);
            }
        }
    }
    let types: Vec<DataType> = observed.into_iter().map(resolve).collect();

    // Second pass: convert cells to the unified column type.
    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(records.len());
    for record in &records {
        let mut row = Vec::with_capacity(headers.len());
        for (idx, data_type) in types.iter().enumerate() {
            let raw = record.get(idx).unwrap_or("");
            row.push(convert_str(raw, *data_type));
        }
        rows.push(row);
    }

    let columns = headers
        .into_iter()
        .zip(types)
        .map(|(name, data_type)| Column::new(name, data_type))
        .collect();

    Ok(Table::new(columns, rows))
}

fn classify_str(raw: &str) -> Option<Observed> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.parse::<i64>().is_ok() {
        return Some(Observed::Int);
    }
    if trimmed.parse::<f64>().is_ok() {
        return Some(Observed::Float);
    }
    if is_bool_literal(trimmed) {
        return Some(Observed::Bool);
    }
    if parse_datetime(trimmed).is_some() {
        return Some(Observed::DateTime);
    }
    Some(Observed::Text)
}

fn convert_str(raw: &str, data_type: DataType) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }

    match data_type {
        DataType::Int64 => match trimmed.parse::<i64>() {
            Ok(v) => Value::Int64(v),
            Err(_) => Value::Utf8(raw.to_owned()),
        },
        DataType::Float64 => match trimmed.parse::<f64>() {
            Ok(v) => Value::Float64(v),
            Err(_) => Value::Utf8(raw.to_owned()),
        },
        DataType::Bool => match trimmed.to_ascii_lowercase().as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::Utf8(raw.to_owned()),
        },
        DataType::DateTime => match parse_datetime(trimmed) {
            Some(dt) => Value::DateTime(dt),
            None => Value::Utf8(raw.to_owned()),
        },
        DataType::Utf8 => Value::Utf8(raw.to_owned()),
    }
}

fn is_bool_literal(s: &str) -> bool {
    s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false")
}

/// Accepted datetime shapes: ISO date, ISO datetime with `T` or space
/// separator, with optional fractional seconds.
pub(crate) fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
