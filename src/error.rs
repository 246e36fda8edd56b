use std::path::PathBuf;

use thiserror::Error;

use crate::data::ColumnKind;

/// Fatal preconditions that stop a run before any partial output is produced.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("No category column available for grouping")]
    NoCategoryColumn,
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),
    #[error("Column '{name}' is {kind} and cannot be summarized")]
    NotNumeric { name: String, kind: ColumnKind },
}
