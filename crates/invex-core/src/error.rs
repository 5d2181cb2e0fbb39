//! Error types for the invex-core library.

use thiserror::Error;

/// Main error type for the invex library.
#[derive(Error, Debug)]
pub enum InvexError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Output projection error.
    #[error("output error: {0}")]
    Output(#[from] OutputError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// I/O error while reading the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to writing the folder outputs.
#[derive(Error, Debug)]
pub enum OutputError {
    /// Failed to serialize the JSON projection.
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to write the CSV projection.
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error while writing an output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the invex library.
pub type Result<T> = std::result::Result<T, InvexError>;
