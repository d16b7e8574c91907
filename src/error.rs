use thiserror::Error;

/// Convenience result type for loading and cleaning operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Error type returned by trip ingestion and the cleaning pipeline.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input does not conform to the provided schema (missing required columns, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },
}

/// Convenience result type for sequence generation.
pub type SequenceResult<T> = Result<T, SequenceError>;

/// Error type returned while building a [`crate::sequence::SequenceGenerator`].
#[derive(Debug, Error)]
pub enum SequenceError {
    /// A rule could not be parsed into a `(divisor, label)` pair.
    #[error("invalid rule format '{rule}': {reason} (expected 'divisor:label', e.g. 3:Fizz)")]
    RuleFormat { rule: String, reason: String },

    /// The upper bound is not a positive integer.
    #[error("invalid upper bound '{raw}': {reason}. Please enter a positive integer.")]
    InvalidUpperBound { raw: String, reason: String },

    /// A rules file could not be decoded.
    #[error("rules file error: {0}")]
    RulesFile(#[from] serde_json::Error),

    /// A rules file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
