//! Fiscal constants for the Peruvian (SUNAT) jurisdiction.
//!
//! Single source of truth for namespace URIs, currency markers, the
//! detraction threshold and the sentinel values that flow into the output
//! record. Jurisdiction or threshold changes are edits here, not in the
//! extraction code.

use rust_decimal::Decimal;

/// UBL 2.x basic components namespace (cbc).
pub const UBL_CBC_NS: &str =
    "urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2";

/// UBL 2.x aggregate components namespace (cac).
pub const UBL_CAC_NS: &str =
    "urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2";

/// Markers recognised as Peruvian soles in a raw currency attribute.
pub const PEN_MARKERS: &[&str] = &["PEN", "SOL"];

/// Markers recognised as US dollars in a raw currency attribute.
pub const USD_MARKERS: &[&str] = &["USD", "DOL"];

/// Detraction threshold for PEN invoices. Totals strictly above this are
/// subject to detraction; USD invoices are subject at any amount.
pub fn detraction_threshold_pen() -> Decimal {
    Decimal::new(700_00, 2)
}

/// Sentinel for fields whose pattern did not match.
pub const NOT_FOUND: &str = "No encontrado";

/// Sentinel for an invoice without a detraction code.
pub const NO_DETRACTION_CODE: &str = "N/A";

/// Cost center used when none could be mined from the purchase order.
pub const DEFAULT_COST_CENTER: &str = "ADMIN";

/// Approval status used when none could be mined from the purchase order.
pub const STATUS_PENDING: &str = "PENDIENTE";

/// Upper bound on the mined free-text description line.
pub const DESCRIPTION_MAX_LEN: usize = 64;
