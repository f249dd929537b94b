//! Core library for SUNAT invoice reception processing.
//!
//! This crate provides:
//! - Fiscal field extraction from UBL invoice XML (cbc/cac namespaces)
//! - PDF text extraction (text-layer documents, page by page)
//! - Best-effort field mining over PDF text (OC, cost center, detraction)
//! - Purchase-order reconciliation and detraction computation

pub mod engine;
pub mod error;
pub mod fiscal;
pub mod mining;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod xml;

pub use error::{ConciliaError, MissingInputs, PdfError, Result, XmlError};
pub use mining::{MinedFields, mine, mine_text, rules::normalize_po_id};
pub use models::{Currency, DocKind, FiscalInvoice, MatchVerdict, ReconciliationRecord};
pub use pdf::{PdfText, extract_text};
pub use pipeline::{reconcile_documents, reconcile_extracted};
pub use xml::extract_fiscal;
