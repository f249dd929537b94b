//! The fiscal record extracted from the XML and the final output record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{Currency, MatchVerdict};

/// Fiscal fields extracted from the UBL invoice XML.
///
/// Constructed once per upload and immutable afterward. The declared
/// payable total is trusted as-is; `base + tax == total` is not enforced.
#[derive(Debug, Clone, Serialize)]
pub struct FiscalInvoice {
    /// Supplier tax id (RUC).
    pub supplier_ruc: String,

    /// Supplier legal name.
    pub supplier_name: String,

    /// Buyer tax id (RUC), when declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_ruc: Option<String>,

    /// Document series/number, e.g. "F001-00001234".
    pub document_id: String,

    /// Issue date.
    pub issue_date: NaiveDate,

    /// Invoice currency.
    pub currency: Currency,

    /// Taxable base amount.
    pub taxable_base: Decimal,

    /// Tax amount (IGV).
    pub tax: Decimal,

    /// Declared payable total.
    pub total: Decimal,
}

/// The single output record of a reconciliation run.
///
/// A flat mapping handed to the presentation layer and discarded; `fields()`
/// provides the ordered name/value view used for tabular rendering.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationRecord {
    pub supplier_ruc: String,
    pub supplier_name: String,
    pub document_id: String,
    pub issue_date: NaiveDate,
    pub currency: Currency,
    pub taxable_base: Decimal,
    pub tax: Decimal,
    pub total: Decimal,

    /// Mined detraction code (3 digits) or the "N/A" sentinel.
    pub detraction_code: String,
    /// Mined detraction percentage (0 when none applies).
    pub detraction_rate: Decimal,
    /// Computed detraction amount, 2 decimal places.
    pub detraction_amount: Decimal,
    /// Total minus detraction, 2 decimal places.
    pub net_payable: Decimal,

    /// Purchase-order reference mined from the invoice PDF.
    pub invoice_po: String,
    /// Purchase-order reference mined from the order PDF.
    pub order_po: String,
    /// Verdict of comparing the two references after normalization.
    pub po_match: MatchVerdict,

    /// Cost center mined from the purchase order.
    pub cost_center: String,
    /// Payment terms mined from the purchase order.
    pub payment_terms: String,
    /// Approval status mined from the purchase order.
    pub approval_status: String,

    /// First-page description line mined from the invoice PDF.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ReconciliationRecord {
    /// Ordered field-name/value pairs for direct tabular rendering.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("RUC proveedor", self.supplier_ruc.clone()),
            ("Proveedor", self.supplier_name.clone()),
            ("Documento", self.document_id.clone()),
            ("Fecha", self.issue_date.to_string()),
            ("Moneda", self.currency.to_string()),
            ("Base imponible", self.taxable_base.to_string()),
            ("IGV", self.tax.to_string()),
            ("Total", self.total.to_string()),
            ("Cod. detraccion", self.detraction_code.clone()),
            ("% detraccion", self.detraction_rate.to_string()),
            ("Detraccion", self.detraction_amount.to_string()),
            ("Neto a pagar", self.net_payable.to_string()),
            ("OC factura", self.invoice_po.clone()),
            ("OC orden", self.order_po.clone()),
            ("Validacion OC", self.po_match.to_string()),
            ("Centro de costo", self.cost_center.clone()),
            ("Cond. pago", self.payment_terms.clone()),
            ("Situacion", self.approval_status.clone()),
            (
                "Descripcion",
                self.description.clone().unwrap_or_else(|| "-".to_string()),
            ),
        ]
    }
}
