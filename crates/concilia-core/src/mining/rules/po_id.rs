//! Purchase-order identifier normalization.
//!
//! Purchase-order references arrive in heterogeneous shapes ("OC 0001-0000499",
//! "N° 00023", "045/12"); normalization reduces them to a canonical
//! digits-and-hyphen form so two references can be compared for equality.

use crate::fiscal::NOT_FOUND;

/// Canonicalize a raw purchase-order identifier.
///
/// - Empty input or input carrying the not-found sentinel maps to the
///   sentinel.
/// - Everything but digits and hyphens is stripped.
/// - Hyphenated ids keep their segments in order, each with leading zeros
///   removed; empty segments are dropped ("0001-0000499" -> "1-499").
/// - Plain digit runs lose their leading zeros ("00023" -> "23").
/// - Anything left unparseable is returned cleaned, as-is.
///
/// Total over all inputs and idempotent; never fails.
pub fn normalize_po_id(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.to_uppercase().contains(&NOT_FOUND.to_uppercase()) {
        return NOT_FOUND.to_string();
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();

    if cleaned.contains('-') {
        let segments: Vec<&str> = cleaned
            .split('-')
            .filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
            .map(strip_leading_zeros)
            .collect();
        if !segments.is_empty() {
            return segments.join("-");
        }
        return cleaned;
    }

    if !cleaned.is_empty() {
        return strip_leading_zeros(&cleaned).to_string();
    }

    // Nothing numeric survived cleaning; an unparseable reference
    // counts as absent.
    NOT_FOUND.to_string()
}

fn strip_leading_zeros(s: &str) -> &str {
    let stripped = s.trim_start_matches('0');
    if stripped.is_empty() { "0" } else { stripped }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_hyphenated_segments() {
        assert_eq!(normalize_po_id("0001-0000499"), "1-499");
        assert_eq!(normalize_po_id("OC N° 0045-012"), "45-12");
    }

    #[test]
    fn test_plain_digits() {
        assert_eq!(normalize_po_id("00023"), "23");
        assert_eq!(normalize_po_id("300"), "300");
        assert_eq!(normalize_po_id("000"), "0");
    }

    #[test]
    fn test_sentinel_passthrough() {
        assert_eq!(normalize_po_id(""), NOT_FOUND);
        assert_eq!(normalize_po_id("   "), NOT_FOUND);
        assert_eq!(normalize_po_id(NOT_FOUND), NOT_FOUND);
        assert_eq!(normalize_po_id("no encontrado"), NOT_FOUND);
    }

    #[test]
    fn test_letters_only_never_match_each_other() {
        assert_eq!(normalize_po_id("PENDIENTE"), NOT_FOUND);
    }

    #[test]
    fn test_fallback_keeps_cleaned_input() {
        assert_eq!(normalize_po_id("--"), "--");
    }

    #[test]
    fn test_idempotence() {
        for raw in ["0001-0000499", "00023", "045-12", "--", "", "12-5-07"] {
            let once = normalize_po_id(raw);
            assert_eq!(normalize_po_id(&once), once, "input {:?}", raw);
        }
    }
}
