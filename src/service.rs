//! The request façade: one method per endpoint.
//!
//! Every method is single-shot and stateless: resolve the file name against
//! the root directory, validate existence and extension, parse, compute,
//! serialize. Soft failures (missing name, missing file, missing sheet,
//! unsupported extension) come back as message payloads; hard parse failures
//! propagate as [`ServiceError`] for the transport to turn into a 500.
//!
//! Responses follow the loose contract of the API: callers distinguish
//! success from soft failure by inspecting the `message` field and shape of
//! the returned object, so methods build [`serde_json::Value`] bodies rather
//! than one rigid response type per route.

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::error::ServiceResult;
use crate::ingestion::{csv, excel};
use crate::stats;
use crate::types::Table;

/// Extension family of a requested file name.
///
/// Matching is exact-case on the suffix, so `a.CSV` is not a CSV here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `.csv`
    Csv,
    /// `.xls` or `.xlsx`
    Excel,
    /// Anything else.
    Other,
}

impl FileKind {
    /// Classify a file name by its suffix.
    pub fn of(name: &str) -> Self {
        if name.ends_with(".csv") {
            FileKind::Csv
        } else if name.ends_with(".xls") || name.ends_with(".xlsx") {
            FileKind::Excel
        } else {
            FileKind::Other
        }
    }
}

/// Read-only façade over the tabular files in one root directory.
///
/// Holds no parsed state: every call re-reads the filesystem.
#[derive(Debug, Clone)]
pub struct TabularService {
    root: PathBuf,
}

impl TabularService {
    /// Create a service over `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory being served.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    fn size_in_mb(&self, path: &Path) -> ServiceResult<f64> {
        Ok(std::fs::metadata(path)?.len() as f64 / 1_000_000.0)
    }

    /// `GET /getFiles`: partition the root directory's entries by extension.
    ///
    /// Order follows directory enumeration order; nothing is sorted.
    pub fn list_files(&self) -> ServiceResult<serde_json::Value> {
        let mut csv_files: Vec<String> = Vec::new();
        let mut xls_files: Vec<String> = Vec::new();

        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            match FileKind::of(&name) {
                FileKind::Csv => csv_files.push(name),
                FileKind::Excel => xls_files.push(name),
                FileKind::Other => {}
            }
        }

        let all_files: Vec<String> = csv_files.iter().chain(xls_files.iter()).cloned().collect();
        Ok(json!({
            "csv_files": csv_files,
            "xls_files": xls_files,
            "all_files": all_files,
        }))
    }

    /// `GET /getSheets` without a file name.
    pub fn sheets_without_name(&self) -> serde_json::Value {
        json!({ "has_sheets": false, "message": "No file name provided" })
    }

    /// `GET /getSheets/{file_name}`: sheet names of a workbook.
    pub fn sheets(&self, file_name: &str) -> ServiceResult<serde_json::Value> {
        let path = self.resolve(file_name);
        if !path.exists() {
            return Ok(json!({ "has_sheets": false, "message": "File does not exist" }));
        }
        if FileKind::of(file_name) == FileKind::Csv {
            return Ok(json!({ "has_sheets": false, "message": "CSV files do not have sheets" }));
        }

        let sheets = excel::sheet_names(&path)?;
        Ok(json!({ "has_sheets": true, "sheets": sheets }))
    }

    /// `GET /getCSVInfo/{file_name}`: shape, size and summary statistics of a
    /// CSV file. Excel names get a redirect message instead of data.
    pub fn csv_info(&self, file_name: &str) -> ServiceResult<serde_json::Value> {
        let path = self.resolve(file_name);
        if !path.exists() {
            return Ok(file_not_found());
        }

        match FileKind::of(file_name) {
            FileKind::Csv => {
                let table = csv::read_csv_table(&path)?;
                let (rows, cols) = table.shape();
                let info = stats::to_table_json(&stats::describe(&table));
                Ok(json!({
                    "file_name": file_name,
                    "message": "File is a CSV",
                    "info": info,
                    "size_in_mb": self.size_in_mb(&path)?,
                    "shape": [rows, cols],
                }))
            }
            FileKind::Excel => Ok(json!({
                "file_name": file_name,
                "message": "Please use getExcelInfo and specify a sheet name",
            })),
            FileKind::Other => Ok(unsupported_format(file_name)),
        }
    }

    /// `GET /getExcelInfo/{file_name}/{sheet_name}`: shape, size and summary
    /// statistics of one workbook sheet. CSV names get a redirect message.
    pub fn excel_info(&self, file_name: &str, sheet_name: &str) -> ServiceResult<serde_json::Value> {
        let path = self.resolve(file_name);
        if !path.exists() {
            return Ok(file_not_found());
        }

        match FileKind::of(file_name) {
            FileKind::Csv => Ok(json!({
                "file_name": file_name,
                "message": "Please use getCSVInfo",
            })),
            FileKind::Excel => {
                if !excel::sheet_names(&path)?.iter().any(|s| s == sheet_name) {
                    return Ok(sheet_not_found(file_name));
                }
                let table = excel::read_sheet_table(&path, sheet_name)?;
                let (rows, cols) = table.shape();
                let info = stats::to_nested_json(&stats::describe(&table));
                Ok(json!({
                    "file_name": file_name,
                    "message": format!("File is an Excel file, sheet {sheet_name}"),
                    "size_in_mb": self.size_in_mb(&path)?,
                    "sheet": sheet_name,
                    "shape": [rows, cols],
                    "info": info,
                }))
            }
            FileKind::Other => Ok(unsupported_format(file_name)),
        }
    }

    /// `GET /getColumnInfo/{file_name}/{sheet_name}`: classify every column
    /// into one of the five type buckets.
    ///
    /// The sheet name is required for Excel files and ignored for CSV.
    pub fn column_info(&self, file_name: &str, sheet_name: &str) -> ServiceResult<serde_json::Value> {
        let path = self.resolve(file_name);
        if !path.exists() {
            return Ok(file_not_found());
        }

        let table = match self.load_table(file_name, &path, sheet_name)? {
            Loaded::Table(table) => table,
            Loaded::SheetMissing => return Ok(sheet_not_found(file_name)),
            Loaded::Unsupported => return Ok(unsupported_format(file_name)),
        };

        let (rows, cols) = table.shape();
        let mut float_columns = Vec::new();
        let mut int_columns = Vec::new();
        let mut bool_columns = Vec::new();
        let mut datetime_columns = Vec::new();
        let mut object_columns = Vec::new();
        for col in &table.columns {
            use crate::types::DataType::*;
            match col.data_type {
                Float64 => float_columns.push(col.name.clone()),
                Int64 => int_columns.push(col.name.clone()),
                Bool => bool_columns.push(col.name.clone()),
                DateTime => datetime_columns.push(col.name.clone()),
                Utf8 => object_columns.push(col.name.clone()),
            }
        }

        Ok(json!({
            "file_name": file_name,
            "message": "Column information by data types",
            "column_info": {
                "float_columns": float_columns,
                "int_columns": int_columns,
                "bool_columns": bool_columns,
                "datetime_columns": datetime_columns,
                "object_columns": object_columns,
                "all_columns": table.column_names(),
            },
            "size_in_mb": self.size_in_mb(&path)?,
            "shape": [rows, cols],
        }))
    }

    /// `GET /getDataRange/{file_name}/{offset}/{num_lines}/{sheet_name}`.
    ///
    /// A negative `num_lines` ignores the offset and returns the trailing
    /// `|num_lines|` rows. Otherwise rows `[offset, offset + num_lines)`,
    /// clipped to the table bounds; out-of-range yields fewer or zero rows.
    pub fn data_range(
        &self,
        file_name: &str,
        offset: i64,
        num_lines: i64,
        sheet_name: &str,
    ) -> ServiceResult<serde_json::Value> {
        let path = self.resolve(file_name);
        if !path.exists() {
            return Ok(file_not_found());
        }

        let table = match self.load_table(file_name, &path, sheet_name)? {
            Loaded::Table(table) => table,
            Loaded::SheetMissing => return Ok(sheet_not_found(file_name)),
            Loaded::Unsupported => return Ok(unsupported_format(file_name)),
        };

        let rows = if num_lines < 0 {
            table.tail_rows(num_lines.unsigned_abs() as usize)
        } else {
            table.slice_rows(offset.max(0) as usize, num_lines as usize)
        };

        Ok(json!({
            "file_name": file_name,
            "message": format!("{num_lines} rows from {offset} offset"),
            "data": Table::rows_to_objects(&rows, &table.columns),
        }))
    }

    /// `GET /getColumnData/{file_name}/{sheet_name}?columns=..`: all rows of
    /// the selected column ordinals, in the order requested.
    ///
    /// An out-of-range ordinal is a hard error, not a message payload.
    pub fn column_data(
        &self,
        file_name: &str,
        sheet_name: &str,
        columns: &[usize],
    ) -> ServiceResult<serde_json::Value> {
        let path = self.resolve(file_name);
        if !path.exists() {
            return Ok(file_not_found());
        }

        let table = match self.load_table(file_name, &path, sheet_name)? {
            Loaded::Table(table) => table,
            Loaded::SheetMissing => return Ok(sheet_not_found(file_name)),
            Loaded::Unsupported => return Ok(unsupported_format(file_name)),
        };

        let selected = table.select_columns(columns)?;
        Ok(json!({
            "file_name": file_name,
            "sheet_name": sheet_name,
            "columns": selected.column_names(),
            "data": Table::rows_to_objects(&selected.rows, &selected.columns),
        }))
    }

    /// Shared load path for the table-backed endpoints: CSV parses the whole
    /// file (sheet ignored), Excel parses the named sheet.
    fn load_table(&self, file_name: &str, path: &Path, sheet_name: &str) -> ServiceResult<Loaded> {
        match FileKind::of(file_name) {
            FileKind::Csv => {
                tracing::debug!(file = file_name, "parsing csv");
                Ok(Loaded::Table(csv::read_csv_table(path)?))
            }
            FileKind::Excel => {
                if !excel::sheet_names(path)?.iter().any(|s| s == sheet_name) {
                    return Ok(Loaded::SheetMissing);
                }
                tracing::debug!(file = file_name, sheet = sheet_name, "parsing sheet");
                Ok(Loaded::Table(excel::read_sheet_table(path, sheet_name)?))
            }
            FileKind::Other => Ok(Loaded::Unsupported),
        }
    }
}

enum Loaded {
    Table(Table),
    SheetMissing,
    Unsupported,
}

fn file_not_found() -> serde_json::Value {
    json!({ "file_name": null, "message": "File does not exist" })
}

fn sheet_not_found(file_name: &str) -> serde_json::Value {
    json!({ "file_name": file_name, "message": "Sheet does not exist" })
}

fn unsupported_format(file_name: &str) -> serde_json::Value {
    json!({ "file_name": file_name, "message": "Unsupported file format" })
}
