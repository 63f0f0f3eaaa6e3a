//! Per-request file parsing.
//!
//! CSV and Excel sources are read whole (CSV) or sheet-scoped (Excel) into a
//! [`crate::types::Table`]. Column types are inferred from the contents, never
//! supplied by the caller, so classification is best-effort: ambiguous values
//! can flip a column between buckets across requests.

pub mod csv;
pub mod excel;

use crate::types::DataType;

/// What a single non-null cell looks like, before column-level unification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Observed {
    Int,
    Float,
    Bool,
    DateTime,
    Text,
}

/// Fold one cell observation into the running column type.
///
/// Int and Float unify to Float (like pandas promoting a numeric column);
/// any other mix falls back to Text.
pub(crate) fn unify(acc: Option<Observed>, cell: Observed) -> Option<Observed> {
    match acc {
        None => Some(cell),
        Some(prev) if prev == cell => Some(prev),
        Some(Observed::Int) if cell == Observed::Float => Some(Observed::Float),
        Some(Observed::Float) if cell == Observed::Int => Some(Observed::Float),
        Some(_) => Some(Observed::Text),
    }
}

/// Final column type for a fully-folded observation.
///
/// An all-null column infers as Float64, matching pandas' all-NaN behavior.
pub(crate) fn resolve(acc: Option<Observed>) -> DataType {
    match acc {
        None => DataType::Float64,
        Some(Observed::Int) => DataType::Int64,
        Some(Observed::Float) => DataType::Float64,
        Some(Observed::Bool) => DataType::Bool,
        Some(Observed::DateTime) => DataType::DateTime,
        Some(Observed::Text) => DataType::Utf8,
    }
}
