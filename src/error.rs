//! Crate-level error types.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Everything that can go wrong while running the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Reading or writing the backing file (or the console) failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The JSON storage file exists but is not a valid movie document.
    #[error("JSON format error: {0}")]
    Json(#[from] serde_json::Error),

    /// The CSV storage file exists but could not be parsed.
    #[error("CSV format error: {0}")]
    Csv(#[from] csv::Error),

    /// The TOML configuration file could not be parsed.
    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Movie '{0}' doesn't exist in the list.")]
    NotFound(String),

    /// The metadata lookup answered but did not produce a usable movie.
    #[error("Lookup failed: {0}")]
    Lookup(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Histogram error: {0}")]
    Histogram(String),

    /// Standard input reached end of file while a prompt was waiting.
    #[error("input closed")]
    InputClosed,
}

/// Rejected user input. The display text is what the user sees before the
/// prompt is repeated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Title cannot be empty. Please try again.")]
    EmptyTitle,

    #[error("Invalid input: Title cannot be a number. Please enter a valid movie title.")]
    NumericTitle,

    #[error("Please enter a valid number for the {field}.")]
    InvalidNumber { field: &'static str },

    #[error("Rating must be between 0 and 10.")]
    RatingOutOfRange(f64),

    #[error("Year must be between 1800 and 2100.")]
    YearOutOfRange(i32),

    #[error("Input cannot be empty. Please try again.")]
    EmptyQuery,
}
