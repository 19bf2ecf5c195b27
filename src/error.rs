use thiserror::Error;

#[derive(Error, Debug)]
pub enum NnError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Line {line}: '{value}' is not a valid number")]
    Parse { line: usize, value: String },

    #[error("Line {line}: expected {expected} values, got {found}")]
    RowWidth { line: usize, expected: usize, found: usize },

    #[error("Data set contains no rows")]
    EmptyDataSet,

    #[error("Dimension mismatch: expected {expected}, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Invalid split: {0}")]
    InvalidSplit(String),

    #[error("Invalid network topology: {0}")]
    InvalidTopology(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, NnError>;
