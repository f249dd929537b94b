//! Run orchestration: three documents in, one record out.
//!
//! Missing inputs are reported in full before any extraction runs. A
//! structural XML failure or an unopenable PDF aborts the run; field-level
//! mining misses never do.

use tracing::info;

use crate::error::{ConciliaError, MissingInputs, Result};
use crate::mining::{self, MinedFields};
use crate::models::{DocKind, FiscalInvoice, ReconciliationRecord};
use crate::pdf::PdfText;
use crate::{engine, pdf, xml};

/// Reconcile the three uploaded documents into one record.
///
/// Either a full [`ReconciliationRecord`] is produced or an error naming
/// the failing document and stage; there is no partial output.
pub fn reconcile_documents(
    xml_doc: Option<&[u8]>,
    invoice_pdf: Option<&[u8]>,
    order_pdf: Option<&[u8]>,
) -> Result<ReconciliationRecord> {
    let (Some(xml_doc), Some(invoice_pdf), Some(order_pdf)) = (xml_doc, invoice_pdf, order_pdf)
    else {
        let mut missing = Vec::new();
        if xml_doc.is_none() {
            missing.push(DocKind::InvoiceXml);
        }
        if invoice_pdf.is_none() {
            missing.push(DocKind::InvoicePdf);
        }
        if order_pdf.is_none() {
            missing.push(DocKind::OrderPdf);
        }
        return Err(ConciliaError::MissingInput(MissingInputs(missing)));
    };

    let fiscal = xml::extract_fiscal(xml_doc)?;

    let invoice_text = pdf::extract_text(invoice_pdf).map_err(|source| ConciliaError::Pdf {
        doc: DocKind::InvoicePdf,
        source,
    })?;
    let order_text = pdf::extract_text(order_pdf).map_err(|source| ConciliaError::Pdf {
        doc: DocKind::OrderPdf,
        source,
    })?;

    Ok(reconcile_extracted(&fiscal, &invoice_text, &order_text))
}

/// Reconcile from already-extracted document text.
///
/// The pure tail of [`reconcile_documents`]: mines both blobs and runs the
/// engine. Cannot fail — mining degrades to sentinels.
pub fn reconcile_extracted(
    fiscal: &FiscalInvoice,
    invoice_text: &PdfText,
    order_text: &PdfText,
) -> ReconciliationRecord {
    let invoice_fields: MinedFields = mining::mine(invoice_text);
    let order_fields: MinedFields = mining::mine(order_text);

    let record = engine::reconcile(fiscal, &invoice_fields, &order_fields);
    info!(
        "reconciled {} -> {} ({})",
        record.document_id, record.net_payable, record.po_match
    );
    record
}
