//! Excel workbook parsing with column type inference.
//!
//! Unlike the CSV path, string cells are never re-inferred as numbers or
//! dates; a workbook cell already carries a type and we keep it.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::ServiceResult;
use crate::types::{Column, DataType, Table, Value};

use super::csv::parse_datetime;
use super::{resolve, unify, Observed};

/// Sheet names of a workbook, in workbook order.
pub fn sheet_names(path: impl AsRef<Path>) -> ServiceResult<Vec<String>> {
    let workbook = open_workbook_auto(path)?;
    Ok(workbook.sheet_names().to_vec())
}

/// Read a single named sheet into a [`Table`].
///
/// The first non-empty row is the header row; everything below it is data.
/// A sheet with no non-empty rows yields an empty table.
pub fn read_sheet_table(path: impl AsRef<Path>, sheet: &str) -> ServiceResult<Table> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook.worksheet_range(sheet)?;

    let mut rows_iter = range.rows().enumerate();
    let header = rows_iter.find(|(_, row)| row.iter().any(|c| !matches!(c, Data::Empty)));
    let Some((header_idx, header_row)) = header else {
        return Ok(Table::new(Vec::new(), Vec::new()));
    };

    let headers: Vec<String> = header_row.iter().map(cell_to_header_string).collect();
    let width = headers.len();

    let data_rows: Vec<&[Data]> = range
        .rows()
        .enumerate()
        .filter(|(idx, _)| *idx > header_idx)
        .map(|(_, row)| row)
        .collect();

    let mut observed: Vec<Option<Observed>> = vec![None; width];
    for row in &data_rows {
        for (idx, acc) in observed.iter_mut().enumerate() {
            let cell = row.get(idx).unwrap_or(&Data::Empty);
            if let Some(class) = classify_cell(cell) {
                *acc = unify(*acc, class);
            }
        }
    }
    let types: Vec<DataType> = observed.into_iter().map(resolve).collect();

    let rows: Vec<Vec<Value>> = data_rows
        .iter()
        .map(|row| {
            types
                .iter()
                .enumerate()
                .map(|(idx, data_type)| {
                    convert_cell(row.get(idx).unwrap_or(&Data::Empty), *data_type)
                })
                .collect()
        })
        .collect();

    let columns = headers
        .into_iter()
        .zip(types)
        .map(|(name, data_type)| Column::new(name, data_type))
        .collect();

    Ok(Table::new(columns, rows))
}

fn classify_cell(c: &Data) -> Option<Observed> {
    match c {
        Data::Empty => None,
        Data::Int(_) => Some(Observed::Int),
        // Workbooks store most numbers as floats; whole-valued floats count as
        // integer-compatible so an all-whole column classifies as Int64.
        Data::Float(f) => {
            if f.fract() == 0.0 {
                Some(Observed::Int)
            } else {
                Some(Observed::Float)
            }
        }
        Data::Bool(_) => Some(Observed::Bool),
        Data::DateTime(_) | Data::DateTimeIso(_) => Some(Observed::DateTime),
        Data::String(_) | Data::DurationIso(_) | Data::Error(_) => Some(Observed::Text),
    }
}

fn convert_cell(c: &Data, data_type: DataType) -> Value {
    if matches!(c, Data::Empty) {
        return Value::Null;
    }

    match data_type {
        DataType::Int64 => match c {
            Data::Int(i) => Value::Int64(*i),
            Data::Float(f) if f.fract() == 0.0 => Value::Int64(*f as i64),
            other => Value::Utf8(cell_to_string(other)),
        },
        DataType::Float64 => match c {
            Data::Int(i) => Value::Float64(*i as f64),
            Data::Float(f) => Value::Float64(*f),
            other => Value::Utf8(cell_to_string(other)),
        },
        DataType::Bool => match c {
            Data::Bool(b) => Value::Bool(*b),
            other => Value::Utf8(cell_to_string(other)),
        },
        DataType::DateTime => match c {
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(naive) => Value::DateTime(naive),
                None => Value::Utf8(c.to_string()),
            },
            Data::DateTimeIso(s) => match parse_datetime(s) {
                Some(naive) => Value::DateTime(naive),
                None => Value::Utf8(s.clone()),
            },
            other => Value::Utf8(cell_to_string(other)),
        },
        DataType::Utf8 => Value::Utf8(cell_to_string(c)),
    }
}

fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        _ => c.to_string(),
    }
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(f) => f.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => "".to_string(),
    }
}
