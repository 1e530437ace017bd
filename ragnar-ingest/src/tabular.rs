//! Tabular (CSV) text rendering

use crate::error::{IngestError, Result};
use std::path::Path;

/// Render an entire CSV file as one human-readable text blob.
///
/// The header row comes first, fields are tab-separated, and column and row
/// order are preserved exactly as they appear in the file.
pub fn extract_csv(path: &Path) -> Result<String> {
    let wrap = |source: csv::Error| IngestError::CsvExtraction {
        path: path.to_path_buf(),
        source,
    };

    // Header handling is manual so the header row lands in the output too
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(wrap)?;

    let mut lines = Vec::new();
    for record in reader.records() {
        let record = record.map_err(wrap)?;
        lines.push(record.iter().collect::<Vec<_>>().join("\t"));
    }

    tracing::debug!("Rendered {} rows from {}", lines.len(), path.display());
    Ok(lines.join("\n"))
}
