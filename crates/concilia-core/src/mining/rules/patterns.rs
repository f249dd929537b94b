//! Regex patterns for mining semi-structured fields from PDF text.
//!
//! All patterns are written against the uppercased text blob the miner
//! produces; label synonyms are alternations so new variants are pattern
//! edits, not new code paths.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Purchase-order number: label, separators, numeric token with an
    // optional hyphenated second token ("045-12").
    pub static ref PURCHASE_ORDER: Regex = Regex::new(
        r"\b(?:ORDEN DE COMPRA|O/C|OC|SERVICIO)\b[\s:.#N°º-]*(\d+(?:-\d+)?)"
    ).unwrap();

    // Cost center: label, separators, then a run of uppercase
    // letters/digits/spaces/hyphens.
    pub static ref COST_CENTER: Regex = Regex::new(
        r"\b(?:CENTRO DE COSTOS?|CECO|C\. ?COSTO)\b[\s:.-]*([A-ZÁÉÍÓÚÑ0-9][A-ZÁÉÍÓÚÑ0-9 -]*)"
    ).unwrap();

    // Detraction code: label followed by exactly 3 digits.
    pub static ref DETRACTION_CODE: Regex = Regex::new(
        r"(?:C[OÓ]DIGO DE DETRACCI[OÓ]N|COD\.? ?DETRACCI[OÓ]N|SUJET[OA]S? A DETRACCI[OÓ]N)\D{0,40}\b(\d{3})\b"
    ).unwrap();

    // Detraction percentage: 1-2 digits, the % sign, and the keyword
    // nearby (percentage before keyword).
    pub static ref DETRACTION_RATE: Regex = Regex::new(
        r"\b(\d{1,2})\s*%[\s\S]{0,40}?DETRACCI[OÓ]N"
    ).unwrap();

    // Payment terms (purchase order): label then letters/digits/spaces.
    pub static ref PAYMENT_TERMS: Regex = Regex::new(
        r"COND\.? ?PAGO[\s:.-]*([A-ZÁÉÍÓÚÑ0-9][A-ZÁÉÍÓÚÑ0-9 ]*)"
    ).unwrap();

    // Approval status (purchase order): label then one uppercase word,
    // accented letters included.
    pub static ref APPROVAL_STATUS: Regex = Regex::new(
        r"SITUACI[OÓ]N[\s:.-]*([A-ZÁÉÍÓÚÑ]+)"
    ).unwrap();
}

/// A line containing any of these marks the header of the detail table;
/// the description is mined from the line that follows it.
pub const DESCRIPTION_KEYWORDS: &[&str] = &["DESC", "CANT", "SERV", "CONCEPTO"];
