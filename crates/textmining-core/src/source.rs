//! Text-extraction collaborators
//!
//! The engine only needs each page's plain text, in increasing page order.
//! How the text is produced (PDF, plain file, memory) is up to the
//! [`TextExtractor`] implementation.

use crate::error::SearchError;
use std::fs;
use std::path::Path;

/// Page separator emitted by PDF text extractors
pub const FORM_FEED: char = '\x0C';

/// Forward-only stream of page texts; page numbers start at 1
pub type Pages<'a> = Box<dyn Iterator<Item = Result<String, SearchError>> + 'a>;

pub trait TextExtractor {
    /// Open `document` and stream its pages in order
    fn pages<'a>(&'a self, document: &Path) -> Result<Pages<'a>, SearchError>;
}

/// Split extracted text into pages on form feed
///
/// A trailing separator does not open an extra empty page. Empty pages in
/// the middle are kept so page numbers stay aligned with the document.
pub fn split_pages(text: &str) -> Vec<String> {
    let mut pages: Vec<String> = text.split(FORM_FEED).map(str::to_string).collect();
    if pages.len() > 1 && pages.last().is_some_and(|page| page.trim().is_empty()) {
        pages.pop();
    }
    pages
}

/// Reads UTF-8 text files, one page per form-feed separated block
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn pages<'a>(&'a self, document: &Path) -> Result<Pages<'a>, SearchError> {
        let text = fs::read_to_string(document).map_err(|e| {
            SearchError::ExtractionFailed(format!("{}: {}", document.display(), e))
        })?;
        Ok(Box::new(split_pages(&text).into_iter().map(Ok)))
    }
}

/// Serves fixed page texts whatever the document path
///
/// The path is still validated by the engine before extraction, so callers
/// embedding already-extracted text must point at an existing file.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExtractor {
    pages: Vec<String>,
}

impl InMemoryExtractor {
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
        }
    }
}

impl TextExtractor for InMemoryExtractor {
    fn pages<'a>(&'a self, _document: &Path) -> Result<Pages<'a>, SearchError> {
        Ok(Box::new(self.pages.iter().cloned().map(Ok)))
    }
}
