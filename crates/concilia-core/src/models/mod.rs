//! Data models shared across the extraction pipeline.

mod record;

pub use record::{FiscalInvoice, ReconciliationRecord};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fiscal::{PEN_MARKERS, USD_MARKERS};

/// One of the documents a reconciliation run is fed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocKind {
    /// The invoice in the tax-authority XML format.
    InvoiceXml,
    /// The invoice rendered as a PDF.
    InvoicePdf,
    /// The purchase order PDF.
    OrderPdf,
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocKind::InvoiceXml => "invoice XML",
            DocKind::InvoicePdf => "invoice PDF",
            DocKind::OrderPdf => "purchase order PDF",
        };
        f.write_str(name)
    }
}

/// Invoice currency, restricted to the display set the record exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    /// Peruvian soles.
    #[serde(rename = "PEN")]
    Pen,

    /// US dollars.
    #[serde(rename = "USD")]
    Usd,

    /// Anything else is passed through unchanged.
    #[serde(untagged)]
    Other(String),
}

impl Currency {
    /// Map a raw `currencyID` attribute to the display set.
    pub fn from_code(raw: &str) -> Self {
        let code = raw.trim().to_uppercase();
        if PEN_MARKERS.iter().any(|m| code.contains(m)) {
            Currency::Pen
        } else if USD_MARKERS.iter().any(|m| code.contains(m)) {
            Currency::Usd
        } else {
            Currency::Other(raw.trim().to_string())
        }
    }

    /// Display form ("PEN", "USD", or the raw code).
    pub fn as_str(&self) -> &str {
        match self {
            Currency::Pen => "PEN",
            Currency::Usd => "USD",
            Currency::Other(code) => code,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Purchase-order match verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchVerdict {
    /// Both purchase-order references canonicalize to the same id.
    Match,
    /// Anything else, including a missing reference on either side.
    Review,
}

impl MatchVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchVerdict::Match => "MATCH",
            MatchVerdict::Review => "REVIEW",
        }
    }
}

impl fmt::Display for MatchVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_mapping() {
        assert_eq!(Currency::from_code("PEN"), Currency::Pen);
        assert_eq!(Currency::from_code("SOLES"), Currency::Pen);
        assert_eq!(Currency::from_code("usd"), Currency::Usd);
        assert_eq!(Currency::from_code("US DOLLAR"), Currency::Usd);
        assert_eq!(
            Currency::from_code("CLP"),
            Currency::Other("CLP".to_string())
        );
    }

    #[test]
    fn test_currency_passthrough_preserves_raw() {
        assert_eq!(Currency::from_code(" eur ").as_str(), "eur");
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(MatchVerdict::Match.to_string(), "MATCH");
        assert_eq!(MatchVerdict::Review.to_string(), "REVIEW");
    }

    #[test]
    fn test_currency_serializes_as_code() {
        let json = serde_json::to_string(&Currency::Pen).unwrap();
        assert_eq!(json, "\"PEN\"");
        let json = serde_json::to_string(&Currency::Other("GBP".into())).unwrap();
        assert_eq!(json, "\"GBP\"");
    }
}
