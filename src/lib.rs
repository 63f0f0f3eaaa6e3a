//! `tabserve` exposes the tabular files (CSV/Excel) of one working directory
//! through a small set of read-only HTTP endpoints: file listing, sheet
//! enumeration, summary statistics, column classification by inferred type,
//! row-range slices, and column-subset slices.
//!
//! Every request is independent: the file is re-parsed from disk on each call
//! and nothing is cached across requests, so responses always reflect the
//! current file contents.
//!
//! ## Endpoints
//!
//! - `GET /getFiles` — partition directory entries into csv/xls lists
//! - `GET /getSheets/{file_name}` (and bare `GET /getSheets`) — workbook sheets
//! - `GET /getCSVInfo/{file_name}` — shape, size, descriptive statistics
//! - `GET /getExcelInfo/{file_name}/{sheet_name}` — ditto for one sheet
//! - `GET /getColumnInfo/{file_name}/{sheet_name}` — five-bucket column types
//! - `GET /getDataRange/{file_name}/{offset}/{num_lines}/{sheet_name}` — rows
//! - `GET /getColumnData/{file_name}/{sheet_name}?columns=..` — column subset
//!
//! ## Quick example
//!
//! ```no_run
//! use tabserve::service::TabularService;
//!
//! # fn main() -> Result<(), tabserve::ServiceError> {
//! let svc = TabularService::new("./data");
//! let listing = svc.list_files()?;
//! println!("{listing}");
//! # Ok(())
//! # }
//! ```
//!
//! Missing files, missing sheets and unsupported extensions are *soft*
//! failures: the service answers HTTP 200 with a `message` payload and the
//! caller inspects the body. Only malformed file content and out-of-range
//! column ordinals surface as hard errors (HTTP 500).
//!
//! ## Modules
//!
//! - [`service`]: the per-request façade (HTTP-agnostic)
//! - [`ingestion`]: CSV/Excel parsing with column type inference
//! - [`stats`]: descriptive statistics over numeric columns
//! - [`types`]: in-memory table model
//! - [`http`]: axum router and handlers
//! - [`error`]: the shared error type

pub mod error;
pub mod http;
pub mod ingestion;
pub mod service;
pub mod stats;
pub mod types;

pub use error::{ServiceError, ServiceResult};
pub use service::TabularService;
