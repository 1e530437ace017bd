//! # ragnar-ingest
//!
//! Document ingestion for semantic retrieval: turn a folder of heterogeneous
//! documents into a flat, ordered sequence of plain-text strings, one per
//! recognized file.
//!
//! Supported formats:
//!
//! - **PDF** (`.pdf`): page texts concatenated in document order
//! - **Word-processor documents** (`.docx`): paragraph texts, one per line
//! - **Tabular data** (`.csv`): header and rows rendered as one text blob
//!
//! Files with any other extension are skipped silently. Files that match a
//! supported extension but fail to parse are skipped with a warning; a single
//! corrupt document never aborts ingestion of the rest of the folder.
//!
//! The output order follows the directory listing, which is
//! filesystem-dependent; callers use positions as handles back into the
//! sequence but must not read meaning into the ordering itself.
//!
//! ```no_run
//! # fn main() -> ragnar_ingest::Result<()> {
//! use std::path::Path;
//! let texts = ragnar_ingest::ingest_directory_texts(Path::new("./knowledge-base"))?;
//! println!("ingested {} documents", texts.len());
//! # Ok(())
//! # }
//! ```

pub mod docx;
pub mod error;
pub mod pdf;
pub mod tabular;

pub use error::{IngestError, Result};

use std::path::{Path, PathBuf};

/// Document formats the ingestion step understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportedFormat {
    Pdf,
    Docx,
    Csv,
}

impl SupportedFormat {
    /// Classify a file by its extension (case-insensitive).
    ///
    /// Returns `None` for unrecognized extensions, which ingestion treats as
    /// "skip silently".
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("pdf") {
            Some(Self::Pdf)
        } else if extension.eq_ignore_ascii_case("docx") {
            Some(Self::Docx)
        } else if extension.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else {
            None
        }
    }
}

/// One ingested document: its source path and the extracted text.
#[derive(Debug, Clone)]
pub struct IngestedDocument {
    /// Path of the source file the text was extracted from
    pub source: PathBuf,
    /// Normalized plain-text content
    pub text: String,
}

/// Extract the text of a single file according to its format.
///
/// Fails with [`IngestError::UnsupportedFormat`] if the extension is not one
/// of the supported formats.
pub fn extract_file(path: &Path) -> Result<String> {
    match SupportedFormat::from_path(path) {
        Some(SupportedFormat::Pdf) => pdf::extract_pdf(path),
        Some(SupportedFormat::Docx) => docx::extract_docx(path),
        Some(SupportedFormat::Csv) => tabular::extract_csv(path),
        None => Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Ingest a directory of documents into an ordered sequence.
///
/// Walks the directory in listing order, extracts every file with a supported
/// extension, and returns one [`IngestedDocument`] per successfully processed
/// file. Unrecognized extensions are skipped; extraction failures are logged
/// at `warn` and skipped. A missing or unreadable directory propagates the
/// underlying IO error.
pub fn ingest_directory(dir: &Path) -> Result<Vec<IngestedDocument>> {
    let mut documents = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        if SupportedFormat::from_path(&path).is_none() {
            tracing::debug!("Skipping unsupported file: {}", path.display());
            continue;
        }

        match extract_file(&path) {
            Ok(text) => {
                tracing::debug!("Ingested {} ({} chars)", path.display(), text.len());
                documents.push(IngestedDocument { source: path, text });
            }
            Err(err) => {
                tracing::warn!("Skipping unreadable document {}: {err}", path.display());
            }
        }
    }

    tracing::info!(
        "Ingested {} documents from {}",
        documents.len(),
        dir.display()
    );
    Ok(documents)
}

/// Like [`ingest_directory`], but returns only the extracted texts.
///
/// This is the shape the retriever consumes; positions in the returned
/// sequence are the sole handles back to the source documents.
pub fn ingest_directory_texts(dir: &Path) -> Result<Vec<String>> {
    Ok(ingest_directory(dir)?
        .into_iter()
        .map(|doc| doc.text)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Build a minimal single-page PDF containing `text`, with a correct xref
    /// table so strict parsers accept it.
    fn minimal_pdf(text: &str) -> Vec<u8> {
        let stream = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
        let objects = [
            "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n".to_string(),
            "2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n".to_string(),
            "3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>\nendobj\n"
                .to_string(),
            format!(
                "4 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n",
                stream.len(),
                stream
            ),
            "5 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n"
                .to_string(),
        ];

        let mut out: Vec<u8> = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for object in &objects {
            offsets.push(out.len());
            out.extend_from_slice(object.as_bytes());
        }

        let xref_pos = out.len();
        out.extend_from_slice(b"xref\n0 6\n0000000000 65535 f \n");
        for offset in &offsets {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        out.extend_from_slice(
            format!("trailer\n<< /Size 6 /Root 1 0 R >>\nstartxref\n{xref_pos}\n%%EOF\n")
                .as_bytes(),
        );
        out
    }

    /// Build a minimal DOCX package with one paragraph per input line.
    fn minimal_docx(path: &Path, paragraphs: &[&str]) {
        let body = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
            .collect::<String>();
        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );

        let file = std::fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file(
                "word/document.xml",
                zip::write::SimpleFileOptions::default(),
            )
            .unwrap();
        writer.write_all(document.as_bytes()).unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn test_format_classification() {
        assert_eq!(
            SupportedFormat::from_path(Path::new("a.pdf")),
            Some(SupportedFormat::Pdf)
        );
        assert_eq!(
            SupportedFormat::from_path(Path::new("a.DOCX")),
            Some(SupportedFormat::Docx)
        );
        assert_eq!(
            SupportedFormat::from_path(Path::new("a.csv")),
            Some(SupportedFormat::Csv)
        );
        assert_eq!(SupportedFormat::from_path(Path::new("a.txt")), None);
        assert_eq!(SupportedFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_csv_rendering_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pets.csv");
        std::fs::write(&path, "name,species\nFelix,cat\nRex,dog\n").unwrap();

        let text = extract_file(&path).unwrap();
        assert_eq!(text, "name\tspecies\nFelix\tcat\nRex\tdog");
    }

    #[test]
    fn test_docx_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.docx");
        minimal_docx(&path, &["Cats are popular pets.", "Dogs too."]);

        let text = extract_file(&path).unwrap();
        assert_eq!(text, "Cats are popular pets.\nDogs too.");
    }

    #[test]
    fn test_pdf_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, minimal_pdf("Hello from PDF")).unwrap();

        let text = extract_file(&path).unwrap();
        assert!(text.contains("Hello from PDF"), "got: {text:?}");
    }

    #[test]
    fn test_unsupported_extension_rejected_for_single_file() {
        let err = extract_file(Path::new("notes.txt")).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_ingest_skips_unsupported_and_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.csv"), "a,b\n1,2\n").unwrap();
        std::fs::write(dir.path().join("broken.pdf"), b"not actually a pdf").unwrap();
        std::fs::write(dir.path().join("ignored.txt"), "plain text").unwrap();

        let documents = ingest_directory(dir.path()).unwrap();
        assert_eq!(documents.len(), 1);
        assert!(documents[0].source.ends_with("good.csv"));
        assert_eq!(documents[0].text, "a\tb\n1\t2");
    }

    #[test]
    fn test_one_valid_one_corrupt_pdf_yields_one_unit() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("valid.pdf"), minimal_pdf("Quarterly results")).unwrap();
        std::fs::write(dir.path().join("corrupt.pdf"), b"%PDF-1.4 garbage").unwrap();

        let texts = ingest_directory_texts(dir.path()).unwrap();
        assert_eq!(texts.len(), 1);
        assert!(texts[0].contains("Quarterly results"));
    }

    #[test]
    fn test_empty_directory_yields_empty_sequence() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ingest_directory_texts(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_fails_with_not_found() {
        let err = ingest_directory(Path::new("/nonexistent/kb")).unwrap_err();
        match err {
            IngestError::Io { source } => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
