//! Declarative mining rules.
//!
//! Each string-valued field is one [`FieldRule`]: a pattern, a capture
//! group, a post-processing step and a fallback value. The rules are data;
//! the miner just applies them. Numeric and line-based fields (detraction
//! rate, description) have dedicated extractors below.

pub mod patterns;
pub mod po_id;

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

use crate::fiscal::{
    DEFAULT_COST_CENTER, DESCRIPTION_MAX_LEN, NO_DETRACTION_CODE, NOT_FOUND, STATUS_PENDING,
};

pub use po_id::normalize_po_id;

/// Post-processing applied to a captured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostProcess {
    /// Trim surrounding whitespace.
    Trim,
    /// Keep only the first line of the capture, trimmed.
    FirstLine,
}

/// One mining rule: pattern in, field value out, default on miss.
pub struct FieldRule {
    /// Field name, for diagnostics and table-driven tests.
    pub name: &'static str,
    pub pattern: &'static Regex,
    pub group: usize,
    pub post: PostProcess,
    pub default: &'static str,
}

impl FieldRule {
    /// Apply the rule to a text blob. First match wins; a miss or an
    /// empty capture yields the default. Never fails.
    pub fn apply(&self, text: &str) -> String {
        let captured = self
            .pattern
            .captures(text)
            .and_then(|caps| caps.get(self.group))
            .map(|m| m.as_str());

        let value = match captured {
            Some(raw) => match self.post {
                PostProcess::Trim => raw.trim(),
                PostProcess::FirstLine => raw.lines().next().unwrap_or("").trim(),
            },
            None => "",
        };

        if value.is_empty() {
            self.default.to_string()
        } else {
            value.to_string()
        }
    }
}

lazy_static! {
    pub static ref PURCHASE_ORDER_RULE: FieldRule = FieldRule {
        name: "purchase_order",
        pattern: &*patterns::PURCHASE_ORDER,
        group: 1,
        post: PostProcess::Trim,
        default: NOT_FOUND,
    };

    pub static ref COST_CENTER_RULE: FieldRule = FieldRule {
        name: "cost_center",
        pattern: &*patterns::COST_CENTER,
        group: 1,
        post: PostProcess::FirstLine,
        default: DEFAULT_COST_CENTER,
    };

    pub static ref DETRACTION_CODE_RULE: FieldRule = FieldRule {
        name: "detraction_code",
        pattern: &*patterns::DETRACTION_CODE,
        group: 1,
        post: PostProcess::Trim,
        default: NO_DETRACTION_CODE,
    };

    pub static ref PAYMENT_TERMS_RULE: FieldRule = FieldRule {
        name: "payment_terms",
        pattern: &*patterns::PAYMENT_TERMS,
        group: 1,
        post: PostProcess::Trim,
        default: NOT_FOUND,
    };

    pub static ref APPROVAL_STATUS_RULE: FieldRule = FieldRule {
        name: "approval_status",
        pattern: &*patterns::APPROVAL_STATUS,
        group: 1,
        post: PostProcess::Trim,
        default: STATUS_PENDING,
    };
}

/// The full string-field rule table, in mining order.
pub fn string_rules() -> [&'static FieldRule; 5] {
    [
        &PURCHASE_ORDER_RULE,
        &COST_CENTER_RULE,
        &DETRACTION_CODE_RULE,
        &PAYMENT_TERMS_RULE,
        &APPROVAL_STATUS_RULE,
    ]
}

/// Extract the detraction percentage, defaulting to zero on a miss.
pub fn extract_detraction_rate(text: &str) -> Decimal {
    patterns::DETRACTION_RATE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| Decimal::from_str(m.as_str()).ok())
        .unwrap_or(Decimal::ZERO)
}

/// Extract the free-text description: the line immediately following the
/// first detail-table header line, truncated. Original case is preserved.
pub fn extract_description(first_page: &str) -> Option<String> {
    let mut lines = first_page.lines();
    while let Some(line) = lines.next() {
        let upper = line.to_uppercase();
        if patterns::DESCRIPTION_KEYWORDS.iter().any(|k| upper.contains(k)) {
            return lines
                .next()
                .map(|next| next.trim().chars().take(DESCRIPTION_MAX_LEN).collect())
                .filter(|s: &String| !s.is_empty());
        }
    }
    None
}
