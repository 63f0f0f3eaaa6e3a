//! Descriptive statistics over numeric columns.
//!
//! Matches the usual summary contract: count, mean, sample standard deviation,
//! min, quartiles (linear interpolation between closest ranks), max.

use serde::Serialize;
use serde_json::{Map, Number};

use crate::types::{DataType, Table};

/// Names of the aggregate rows, in report order.
pub const STAT_NAMES: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Summary aggregates for one numeric column.
///
/// `count` is the number of non-null values. Every other aggregate is `None`
/// when there is nothing to aggregate (`std` additionally needs two values).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub q25: Option<f64>,
    #[serde(rename = "50%")]
    pub q50: Option<f64>,
    #[serde(rename = "75%")]
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Descriptive statistics for every numeric column of a table.
///
/// Column order follows the source table. Non-numeric columns are skipped,
/// like a default pandas `describe()`.
pub fn describe(table: &Table) -> Vec<(String, ColumnSummary)> {
    table
        .columns
        .iter()
        .enumerate()
        .filter(|(_, col)| matches!(col.data_type, DataType::Int64 | DataType::Float64))
        .map(|(idx, col)| {
            let mut values: Vec<f64> = table
                .rows
                .iter()
                .filter_map(|row| row.get(idx).and_then(|v| v.as_f64()))
                .collect();
            values.sort_by(|a, b| a.total_cmp(b));
            (col.name.clone(), summarize(&values))
        })
        .collect()
}

/// Serialize a describe result as a nested map: column -> stat -> value.
pub fn to_nested_json(summaries: &[(String, ColumnSummary)]) -> serde_json::Value {
    let mut out = Map::with_capacity(summaries.len());
    for (name, summary) in summaries {
        // ColumnSummary serializes to exactly the stat map we want.
        out.insert(
            name.clone(),
            serde_json::to_value(summary).unwrap_or(serde_json::Value::Null),
        );
    }
    serde_json::Value::Object(out)
}

/// Serialize a describe result as a flat table: stat rows by numeric columns.
pub fn to_table_json(summaries: &[(String, ColumnSummary)]) -> serde_json::Value {
    let columns: Vec<serde_json::Value> = summaries
        .iter()
        .map(|(name, _)| serde_json::Value::String(name.clone()))
        .collect();

    let data: Vec<serde_json::Value> = STAT_NAMES
        .iter()
        .map(|stat| {
            let row: Vec<serde_json::Value> = summaries
                .iter()
                .map(|(_, s)| stat_value(s, stat))
                .collect();
            serde_json::Value::Array(row)
        })
        .collect();

    serde_json::json!({
        "columns": columns,
        "index": STAT_NAMES,
        "data": data,
    })
}

fn stat_value(s: &ColumnSummary, stat: &str) -> serde_json::Value {
    let opt = match stat {
        "count" => return serde_json::Value::Number((s.count as u64).into()),
        "mean" => s.mean,
        "std" => s.std,
        "min" => s.min,
        "25%" => s.q25,
        "50%" => s.q50,
        "75%" => s.q75,
        "max" => s.max,
        _ => None,
    };
    opt.and_then(Number::from_f64)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

/// Aggregate a sorted slice of non-null values.
fn summarize(sorted: &[f64]) -> ColumnSummary {
    let count = sorted.len();
    if count == 0 {
        return ColumnSummary {
            count,
            mean: None,
            std: None,
            min: None,
            q25: None,
            q50: None,
            q75: None,
            max: None,
        };
    }

    let mean = sorted.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let ss = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        Some((ss / (count - 1) as f64).sqrt())
    } else {
        None
    };

    ColumnSummary {
        count,
        mean: Some(mean),
        std,
        min: Some(sorted[0]),
        q25: Some(quantile(sorted, 0.25)),
        q50: Some(quantile(sorted, 0.50)),
        q75: Some(quantile(sorted, 0.75)),
        max: Some(sorted[count - 1]),
    }
}

/// Linear-interpolated quantile of an ascending slice (must be non-empty).
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let frac = pos - lower as f64;
        sorted[lower] + frac * (sorted[upper] - sorted[lower])
    }
}
