//! PDF text extraction

use crate::error::{IngestError, Result};
use std::path::Path;

/// Extract the text of every page of a PDF, concatenated in document order.
///
/// A page whose extraction yields no text contributes an empty segment rather
/// than failing the whole file.
pub fn extract_pdf(path: &Path) -> Result<String> {
    let pages =
        pdf_extract::extract_text_by_pages(path).map_err(|source| IngestError::PdfExtraction {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!("Extracted {} pages from {}", pages.len(), path.display());
    Ok(pages.concat())
}
