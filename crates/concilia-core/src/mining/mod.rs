//! Best-effort field mining over extracted PDF text.
//!
//! Mining never fails: every field falls back to its sentinel when its
//! pattern does not match, and the sentinels flow through to the output
//! record so a reviewer can see exactly what could not be determined.

pub mod rules;

use rust_decimal::Decimal;
use tracing::debug;

use crate::fiscal::{DEFAULT_COST_CENTER, NO_DETRACTION_CODE, NOT_FOUND, STATUS_PENDING};
use crate::pdf::PdfText;

/// Fields mined from one PDF document.
///
/// Both the invoice PDF and the purchase-order PDF produce the same shape;
/// the caller decides which fields to trust from which document.
#[derive(Debug, Clone, PartialEq)]
pub struct MinedFields {
    /// Purchase-order reference, or the not-found sentinel.
    pub purchase_order: String,
    /// Cost center, or "ADMIN" when absent.
    pub cost_center: String,
    /// 3-digit detraction code, or "N/A".
    pub detraction_code: String,
    /// Detraction percentage (0-99), zero when absent.
    pub detraction_rate: Decimal,
    /// Payment terms, or the not-found sentinel.
    pub payment_terms: String,
    /// Approval status, or "PENDIENTE".
    pub approval_status: String,
    /// First-page description line, when a detail table was found.
    pub description: Option<String>,
}

impl Default for MinedFields {
    fn default() -> Self {
        Self {
            purchase_order: NOT_FOUND.to_string(),
            cost_center: DEFAULT_COST_CENTER.to_string(),
            detraction_code: NO_DETRACTION_CODE.to_string(),
            detraction_rate: Decimal::ZERO,
            payment_terms: NOT_FOUND.to_string(),
            approval_status: STATUS_PENDING.to_string(),
            description: None,
        }
    }
}

/// Run the full rule set over a document's text.
///
/// The blob is uppercased once for matching; the description keeps the
/// first page's original case.
pub fn mine(doc: &PdfText) -> MinedFields {
    let blob = doc.full_text().to_uppercase();

    let fields = MinedFields {
        purchase_order: rules::PURCHASE_ORDER_RULE.apply(&blob),
        cost_center: rules::COST_CENTER_RULE.apply(&blob),
        detraction_code: rules::DETRACTION_CODE_RULE.apply(&blob),
        detraction_rate: rules::extract_detraction_rate(&blob),
        payment_terms: rules::PAYMENT_TERMS_RULE.apply(&blob),
        approval_status: rules::APPROVAL_STATUS_RULE.apply(&blob),
        description: rules::extract_description(doc.first_page()),
    };

    debug!(
        "mined fields: oc={:?} ceco={:?} detraccion={}/{}%",
        fields.purchase_order, fields.cost_center, fields.detraction_code, fields.detraction_rate
    );
    fields
}

/// Convenience for mining a raw text blob as a one-page document.
pub fn mine_text(text: &str) -> MinedFields {
    mine(&PdfText::from_text(text))
}
