//! PDF text extraction for condition searches
//!
//! Implements [`TextExtractor`] for PDF files. The document is loaded with
//! lopdf to validate it and learn the real page count, then text is pulled
//! out with pdf-extract and split on form feed. When that split does not
//! line up with the page tree, each page is extracted on its own through
//! lopdf instead.
//!
//! # Example
//! ```no_run
//! use std::path::Path;
//! use textmining_core::TextExtractor;
//! use textmining_pdf::PdfExtractor;
//!
//! # fn example() -> Result<(), textmining_core::SearchError> {
//! let extractor = PdfExtractor;
//! for page in extractor.pages(Path::new("contract.pdf"))? {
//!     println!("{}", page?);
//! }
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use pdf_extract::extract_text_from_mem;
use std::fs;
use std::path::Path;
use textmining_core::source::{split_pages, Pages};
use textmining_core::{SearchError, TextExtractor};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Extract every page's text from PDF bytes
    ///
    /// # Errors
    /// `SearchError::ExtractionFailed` when the bytes are not a PDF, the
    /// document is encrypted, or no text layer could be read.
    pub fn extract_pages(pdf_bytes: &[u8]) -> Result<Vec<String>, SearchError> {
        let document = Document::load_mem(pdf_bytes)
            .map_err(|e| SearchError::ExtractionFailed(format!("Invalid PDF: {}", e)))?;

        if document.is_encrypted() {
            return Err(SearchError::ExtractionFailed(
                "Password-protected PDF".to_string(),
            ));
        }

        let page_count = document.get_pages().len();

        match extract_text_from_mem(pdf_bytes) {
            Ok(text) => {
                let pages = split_pages(&text);
                if pages.len() == page_count {
                    return Ok(pages);
                }
                debug!(
                    extracted = pages.len(),
                    page_count, "form-feed split disagrees with page tree"
                );
            }
            Err(e) => {
                let error_msg = e.to_string().to_lowercase();
                if error_msg.contains("encrypted") || error_msg.contains("password") {
                    return Err(SearchError::ExtractionFailed(
                        "Password-protected PDF".to_string(),
                    ));
                }
                warn!(error = %e, "pdf-extract failed, extracting page by page");
            }
        }

        Self::extract_per_page(&document)
    }

    /// Page-by-page extraction through lopdf, in page tree order
    fn extract_per_page(document: &Document) -> Result<Vec<String>, SearchError> {
        document
            .get_pages()
            .keys()
            .map(|&page_number| {
                document.extract_text(&[page_number]).map_err(|e| {
                    SearchError::ExtractionFailed(format!("Page {}: {}", page_number, e))
                })
            })
            .collect()
    }
}

impl TextExtractor for PdfExtractor {
    fn pages<'a>(&'a self, document: &Path) -> Result<Pages<'a>, SearchError> {
        let bytes = fs::read(document).map_err(|e| {
            SearchError::ExtractionFailed(format!("{}: {}", document.display(), e))
        })?;
        let pages = Self::extract_pages(&bytes)?;
        debug!(document = %document.display(), pages = pages.len(), "pdf text extracted");
        Ok(Box::new(pages.into_iter().map(Ok)))
    }
}

/// Whether `path` looks like a PDF by its extension
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
