//! VAT number derivation.

use super::patterns::{CUSTOMER_VAT, VAT_NO_LINE};

/// Minimum `Vat No:` captures needed before the scan is trusted. A lone
/// match is usually a label with no real value next to it; two or more
/// co-occurring captures reliably bracket the actual number.
pub const MIN_VAT_CANDIDATES: usize = 2;

/// Collect the text on either side of the first `Vat No:` label of every
/// line, in encounter order: the preceding text first, then the following
/// text. Blank sides contribute nothing.
pub fn scan_vat_candidates(text: &str) -> Vec<String> {
    let mut candidates = Vec::new();
    for line in text.lines() {
        let Some(caps) = VAT_NO_LINE.captures(line) else {
            continue;
        };
        let before = caps[1].trim();
        if !before.is_empty() {
            candidates.push(before.to_string());
        }
        let after = caps[2].trim();
        if !after.is_empty() {
            candidates.push(after.to_string());
        }
    }
    candidates
}

/// First `CUSTOMER VAT:` value in the text; the fallback used when fewer
/// than [`MIN_VAT_CANDIDATES`] `Vat No:` captures were seen.
pub fn derive_customer_vat(text: &str) -> Option<String> {
    let caps = CUSTOMER_VAT.captures(text)?;
    let value = caps[1].trim();
    (!value.is_empty()).then(|| value.to_string())
}
