//! Error types for layoutio library.

use std::io;
use thiserror::Error;

/// Result type alias for layoutio operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading layout data.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid JSON.
    #[error("JSON decoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is not valid CSV text.
    #[error("CSV decoding error: {0}")]
    Csv(#[from] csv::Error),

    /// A `block_type` value that names no known element variant.
    #[error("Invalid block_type {0}")]
    UnknownBlockType(String),

    /// The input has neither an element, a list of elements, nor a page layout shape.
    #[error("Invalid input JSON structure: {0}")]
    MalformedInput(String),

    /// Neither the data nor the caller specified a `block_type`.
    #[error("`block_type` not specified both in data and arguments")]
    MissingBlockType,

    /// A record passed type dispatch but lacks fields its variant requires.
    #[error("Invalid {block_type} element: {message}")]
    InvalidElement {
        /// Variant tag the record was dispatched to
        block_type: String,
        /// What was wrong with the record
        message: String,
    },

    /// Textual `points` value outside the coordinate-list grammar.
    #[error("Invalid points value: {0}")]
    InvalidPoints(String),

    /// File extension maps to no supported input format.
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),
}
