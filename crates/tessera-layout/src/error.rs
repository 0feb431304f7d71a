//! Layout errors
//!
//! Layout itself never fails. Errors only surface while building a
//! grid template, before any layout runs.

/// Named grid area registration error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridAreaError {
    #[error(
        "grid area '{name}' (rows {row_start}..{row_end}, columns {column_start}..{column_end}) \
         is out of bounds for a {rows}x{columns} template"
    )]
    OutOfBounds {
        name: String,
        row_start: usize,
        row_end: usize,
        column_start: usize,
        column_end: usize,
        rows: usize,
        columns: usize,
    },

    #[error("grid area '{name}' overlaps area '{existing}'")]
    Overlap { name: String, existing: String },
}

/// Crate error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error(transparent)]
    GridArea(#[from] GridAreaError),

    #[error("grid template row {row} has {found} columns, expected {expected}")]
    RaggedTemplate { row: usize, expected: usize, found: usize },

    #[error("grid area '{name}' is not rectangular")]
    NonRectangularArea { name: String },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
