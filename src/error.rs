//! Ошибки пайплайна очистки и обучения

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Column '{column}' not found (available: {available:?})")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("Cannot parse '{value}' in column '{column}' at row {row}")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Training row {passenger_id} has no Survived value")]
    MissingTrainingTarget { passenger_id: String },

    #[error("Target of row {row} must be 0 or 1, got {value}")]
    InvalidTarget { row: String, value: f64 },

    #[error("Passenger {passenger_id} has unknown Sex value '{value}'")]
    InvalidSex { passenger_id: String, value: String },

    #[error("Passenger {passenger_id} has no entry in the label table")]
    MissingLabel { passenger_id: String },

    #[error("Passenger {passenger_id} appears more than once in the label table")]
    DuplicateLabel { passenger_id: String },

    #[error("Cannot compute accuracy of '{set}': prediction set is empty")]
    EmptyPredictionSet { set: String },

    #[error("Invalid cross-validation setup: {0}")]
    CrossValidation(String),

    #[error("Model fitting failed: {0}")]
    Model(String),

    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Error::Csv {
            path: path.into(),
            source,
        }
    }
}
