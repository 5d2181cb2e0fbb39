//! Invoice total derivation.

use super::patterns::{INVOICE_TOTAL_COMPACT, INVOICE_TOTAL_SPACED};

/// Extract the invoice total from page text.
///
/// The compact `INVOICETOTAL:` label is tried first; `INVOICE TOTAL:` is
/// only consulted when the compact form has no match at all. The captured
/// value runs to end of line and is trimmed.
pub fn derive_invoice_total(text: &str) -> Option<String> {
    let caps = INVOICE_TOTAL_COMPACT
        .captures(text)
        .or_else(|| INVOICE_TOTAL_SPACED.captures(text))?;
    let value = caps[1].trim();
    (!value.is_empty()).then(|| value.to_string())
}
