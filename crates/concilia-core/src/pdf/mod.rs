//! PDF text extraction module.

mod extractor;

pub use extractor::extract_text;

/// Text content of a PDF, one entry per page in page order.
///
/// Pages whose text layer could not be decoded hold an empty string; the
/// document as a whole never fails once it has been opened. Case is
/// preserved — uppercasing for matching is the consumer's job.
#[derive(Debug, Clone, Default)]
pub struct PdfText {
    pub pages: Vec<String>,
}

impl PdfText {
    /// Wrap already-extracted pages.
    pub fn from_pages(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// Treat a single text blob as a one-page document.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            pages: vec![text.into()],
        }
    }

    /// Concatenated text of all pages, in page order.
    pub fn full_text(&self) -> String {
        self.pages.join("\n")
    }

    /// Text of the first page, or an empty string.
    pub fn first_page(&self) -> &str {
        self.pages.first().map(String::as_str).unwrap_or("")
    }

    /// True when no page yielded any text.
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(|p| p.trim().is_empty())
    }
}
