//! Error types for document ingestion

use std::path::PathBuf;

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Error type for document ingestion.
///
/// Extraction variants carry the offending path so the directory-level walk
/// can log and skip the file without aborting the rest of the ingestion.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Filesystem access failed (missing directory, unreadable file)
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// A PDF file could not be parsed or its text extracted
    #[error("PDF extraction failed for {path}: {source}")]
    PdfExtraction {
        path: PathBuf,
        #[source]
        source: pdf_extract::OutputError,
    },

    /// A word-processor document could not be unpacked or parsed
    #[error("DOCX extraction failed for {path}: {message}")]
    DocxExtraction { path: PathBuf, message: String },

    /// A tabular file could not be read
    #[error("CSV extraction failed for {path}: {source}")]
    CsvExtraction {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The file's extension does not match any supported format
    #[error("Unsupported document format: {path}")]
    UnsupportedFormat { path: PathBuf },
}

impl IngestError {
    /// Create a DOCX extraction error from any displayable cause.
    pub fn docx<P: Into<PathBuf>, M: ToString>(path: P, message: M) -> Self {
        Self::DocxExtraction {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
