//! Error types for the email-refinery core library.

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors that can escape the core library.
///
/// Per-row data quality problems (malformed or junk emails, names below the
/// extraction confidence threshold) are never errors; the classification
/// helpers are total and return sentinels instead. The variants here cover
/// structural preconditions only.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required input column is absent from every row of the dataset.
    #[error("Required input column '{0}' is missing from the dataset")]
    MissingColumn(String),
}
