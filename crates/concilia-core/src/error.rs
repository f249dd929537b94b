//! Error types for the concilia-core library.

use std::fmt;

use thiserror::Error;

use crate::models::DocKind;

/// Main error type for the concilia library.
#[derive(Error, Debug)]
pub enum ConciliaError {
    /// One or more of the required input documents was not supplied.
    #[error("missing input documents: {0}")]
    MissingInput(MissingInputs),

    /// Structural failure while extracting the fiscal record from the
    /// invoice XML. No partial record is produced.
    #[error("invoice XML: {0}")]
    Xml(#[from] XmlError),

    /// A PDF document could not be opened at all.
    #[error("{doc}: {source}")]
    Pdf {
        /// Which of the uploaded documents failed.
        doc: DocKind,
        /// Underlying PDF failure.
        source: PdfError,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The set of documents that were expected but not supplied.
///
/// Collected in full before any extraction runs, so the caller learns about
/// every missing document at once instead of one per attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingInputs(pub Vec<DocKind>);

impl fmt::Display for MissingInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for doc in &self.0 {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}", doc)?;
            first = false;
        }
        Ok(())
    }
}

/// Errors related to UBL fiscal extraction.
#[derive(Error, Debug)]
pub enum XmlError {
    /// The document could not be read as XML at all.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// A required element is absent.
    #[error("missing required element: {0}")]
    MissingElement(&'static str),

    /// A monetary field failed to parse as a decimal number.
    #[error("invalid amount in {field}: {value:?}")]
    InvalidAmount {
        field: &'static str,
        value: String,
    },

    /// The issue date is not a valid ISO date.
    #[error("invalid issue date: {0:?}")]
    InvalidDate(String),

    /// The payable total carries no currency attribute.
    #[error("total amount carries no currency attribute")]
    MissingCurrency,
}

/// Errors related to opening a PDF document.
///
/// A page whose text layer cannot be decoded is NOT an error; it degrades
/// to empty page text inside the extractor.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Result type for the concilia library.
pub type Result<T> = std::result::Result<T, ConciliaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_inputs_display() {
        let missing = MissingInputs(vec![DocKind::InvoiceXml, DocKind::OrderPdf]);
        let err = ConciliaError::MissingInput(missing);
        assert_eq!(
            err.to_string(),
            "missing input documents: invoice XML, purchase order PDF"
        );
    }

    #[test]
    fn test_pdf_error_names_document() {
        let err = ConciliaError::Pdf {
            doc: DocKind::InvoicePdf,
            source: PdfError::Encrypted,
        };
        assert_eq!(err.to_string(), "invoice PDF: PDF is encrypted");
    }
}
