use thiserror::Error;

/// Convenience result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error type shared across the request pipeline.
///
/// Soft failures (missing file, missing sheet, unsupported extension) are not
/// errors at all — they are message payloads built by the service layer. This
/// enum covers the hard failures that surface as a transport-level 500.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Underlying I/O error (e.g. permission denied, file vanished mid-read).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parse error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook parse error.
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// A requested column ordinal does not exist in the table.
    #[error("column index {index} out of range for table with {columns} columns")]
    ColumnOutOfRange { index: usize, columns: usize },
}
