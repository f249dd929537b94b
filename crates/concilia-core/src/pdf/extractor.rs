//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, warn};

use super::PdfText;
use crate::error::PdfError;

/// Extract the text content of a PDF, page by page.
///
/// Opening validates the document structure: a corrupt file, an encrypted
/// file (beyond the empty-password case) or a file without pages is an
/// error. After a successful open, text extraction degrades instead of
/// failing: per-page extraction first, then a whole-document blob, then
/// empty pages.
pub fn extract_text(data: &[u8]) -> Result<PdfText, PdfError> {
    let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

    // Handle PDFs with empty password encryption
    let raw_data = if doc.is_encrypted() {
        if doc.decrypt("").is_err() {
            return Err(PdfError::Encrypted);
        }
        debug!("decrypted PDF with empty password");

        let mut decrypted = Vec::new();
        doc.save_to(&mut decrypted)
            .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
        decrypted
    } else {
        data.to_vec()
    };

    let page_count = doc.get_pages().len();
    if page_count == 0 {
        return Err(PdfError::NoPages);
    }
    drop(doc);

    let pages = match pdf_extract::extract_text_from_mem_by_pages(&raw_data) {
        Ok(pages) => pages,
        Err(e) => {
            warn!("per-page text extraction failed ({}), trying whole document", e);
            match pdf_extract::extract_text_from_mem(&raw_data) {
                Ok(text) => vec![text],
                Err(e) => {
                    warn!("text extraction failed ({}), yielding empty pages", e);
                    vec![String::new(); page_count]
                }
            }
        }
    };

    let total_len: usize = pages.iter().map(String::len).sum();
    debug!("extracted {} chars of text from {} pages", total_len, pages.len());

    Ok(PdfText::from_pages(pages))
}
