//! Reconciliation and detraction computation.
//!
//! Pure aggregation over the fiscal record and the two mined field sets;
//! no I/O, no side effects.

use rust_decimal::Decimal;
use tracing::debug;

use crate::fiscal::{NOT_FOUND, detraction_threshold_pen};
use crate::mining::MinedFields;
use crate::mining::rules::normalize_po_id;
use crate::models::{Currency, FiscalInvoice, MatchVerdict, ReconciliationRecord};

/// Whether an invoice is subject to detraction.
///
/// USD invoices are subject at any amount; PEN invoices only above the
/// threshold. Other currencies are never subject.
pub fn detraction_applies(currency: &Currency, total: Decimal) -> bool {
    match currency {
        Currency::Usd => true,
        Currency::Pen => total > detraction_threshold_pen(),
        Currency::Other(_) => false,
    }
}

/// Detraction amount for an invoice, given the mined percentage.
///
/// Zero when the invoice is not subject or no positive percentage was
/// mined; otherwise total x rate / 100, rounded to 2 decimal places.
pub fn detraction_amount(fiscal: &FiscalInvoice, rate: Decimal) -> Decimal {
    if rate > Decimal::ZERO && detraction_applies(&fiscal.currency, fiscal.total) {
        (fiscal.total * rate / Decimal::ONE_HUNDRED).round_dp(2)
    } else {
        Decimal::ZERO
    }
}

/// Compare the two purchase-order references after normalization.
///
/// MATCH only when both canonicalize to the same non-sentinel id; the
/// sentinel never matches anything, including itself.
pub fn po_match(invoice_po: &str, order_po: &str) -> MatchVerdict {
    let invoice_id = normalize_po_id(invoice_po);
    let order_id = normalize_po_id(order_po);

    if invoice_id != NOT_FOUND && invoice_id == order_id {
        MatchVerdict::Match
    } else {
        MatchVerdict::Review
    }
}

/// Combine the fiscal record and both mined field sets into the output
/// record.
///
/// Detraction fields and the description are trusted from the invoice PDF;
/// cost center, payment terms and approval status from the purchase order.
pub fn reconcile(
    fiscal: &FiscalInvoice,
    invoice_fields: &MinedFields,
    order_fields: &MinedFields,
) -> ReconciliationRecord {
    let rate = invoice_fields.detraction_rate;
    let detraction = detraction_amount(fiscal, rate);
    let net_payable = (fiscal.total - detraction).round_dp(2);
    let verdict = po_match(&invoice_fields.purchase_order, &order_fields.purchase_order);

    debug!(
        "reconciled {}: detraccion {} neto {} verdict {}",
        fiscal.document_id, detraction, net_payable, verdict
    );

    ReconciliationRecord {
        supplier_ruc: fiscal.supplier_ruc.clone(),
        supplier_name: fiscal.supplier_name.clone(),
        document_id: fiscal.document_id.clone(),
        issue_date: fiscal.issue_date,
        currency: fiscal.currency.clone(),
        taxable_base: fiscal.taxable_base,
        tax: fiscal.tax,
        total: fiscal.total,
        detraction_code: invoice_fields.detraction_code.clone(),
        detraction_rate: rate,
        detraction_amount: detraction,
        net_payable,
        invoice_po: invoice_fields.purchase_order.clone(),
        order_po: order_fields.purchase_order.clone(),
        po_match: verdict,
        cost_center: order_fields.cost_center.clone(),
        payment_terms: order_fields.payment_terms.clone(),
        approval_status: order_fields.approval_status.clone(),
        description: invoice_fields.description.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::NaiveDate;

    use super::*;

    fn fiscal(total: &str, currency: Currency) -> FiscalInvoice {
        let total = Decimal::from_str(total).unwrap();
        FiscalInvoice {
            supplier_ruc: "20100070970".to_string(),
            supplier_name: "SERVICIOS GENERALES SAC".to_string(),
            buyer_ruc: None,
            document_id: "F001-00000056".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            currency,
            taxable_base: total,
            tax: Decimal::ZERO,
            total,
        }
    }

    fn fields_with_rate(rate: u32) -> MinedFields {
        MinedFields {
            detraction_rate: Decimal::from(rate),
            ..MinedFields::default()
        }
    }

    #[test]
    fn test_pen_below_threshold_not_subject() {
        let fiscal = fiscal("650.00", Currency::Pen);
        let record = reconcile(&fiscal, &fields_with_rate(12), &MinedFields::default());
        assert_eq!(record.detraction_amount, Decimal::ZERO);
        assert_eq!(record.net_payable.to_string(), "650.00");
    }

    #[test]
    fn test_pen_above_threshold_subject() {
        let fiscal = fiscal("750.00", Currency::Pen);
        let record = reconcile(&fiscal, &fields_with_rate(12), &MinedFields::default());
        assert_eq!(record.detraction_amount.to_string(), "90.00");
        assert_eq!(record.net_payable.to_string(), "660.00");
    }

    #[test]
    fn test_usd_subject_at_any_amount() {
        let fiscal = fiscal("500.00", Currency::Usd);
        let record = reconcile(&fiscal, &fields_with_rate(4), &MinedFields::default());
        assert_eq!(record.detraction_amount.to_string(), "20.00");
        assert_eq!(record.net_payable.to_string(), "480.00");
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(!detraction_applies(&Currency::Pen, Decimal::from(700)));
        assert!(detraction_applies(
            &Currency::Pen,
            Decimal::from_str("700.01").unwrap()
        ));
    }

    #[test]
    fn test_subject_without_rate_withholds_nothing() {
        let fiscal = fiscal("1000.00", Currency::Pen);
        let record = reconcile(&fiscal, &fields_with_rate(0), &MinedFields::default());
        assert_eq!(record.detraction_amount, Decimal::ZERO);
        assert_eq!(record.net_payable.to_string(), "1000.00");
    }

    #[test]
    fn test_other_currency_never_subject() {
        let fiscal = fiscal("9000.00", Currency::Other("EUR".to_string()));
        let record = reconcile(&fiscal, &fields_with_rate(12), &MinedFields::default());
        assert_eq!(record.detraction_amount, Decimal::ZERO);
    }

    #[test]
    fn test_po_match_after_normalization() {
        assert_eq!(po_match("0012-05", "12-5"), MatchVerdict::Match);
        assert_eq!(po_match("045-12", "45-13"), MatchVerdict::Review);
    }

    #[test]
    fn test_sentinel_never_matches() {
        assert_eq!(po_match(NOT_FOUND, NOT_FOUND), MatchVerdict::Review);
        assert_eq!(po_match(NOT_FOUND, "45-12"), MatchVerdict::Review);
        assert_eq!(po_match("", ""), MatchVerdict::Review);
    }

    #[test]
    fn test_field_selection_by_document() {
        let fiscal = fiscal("100.00", Currency::Pen);
        let invoice_fields = MinedFields {
            purchase_order: "045-12".to_string(),
            cost_center: "DEBE IGNORARSE".to_string(),
            description: Some("Servicio de vigilancia".to_string()),
            ..MinedFields::default()
        };
        let order_fields = MinedFields {
            purchase_order: "45-12".to_string(),
            cost_center: "LOGISTICA".to_string(),
            approval_status: "APROBADA".to_string(),
            ..MinedFields::default()
        };

        let record = reconcile(&fiscal, &invoice_fields, &order_fields);
        assert_eq!(record.po_match, MatchVerdict::Match);
        assert_eq!(record.cost_center, "LOGISTICA");
        assert_eq!(record.approval_status, "APROBADA");
        assert_eq!(record.description.as_deref(), Some("Servicio de vigilancia"));
    }
}
