//! Regex patterns for invoice field derivation.
//!
//! All matching is case-insensitive. Label spellings are tolerant of
//! collapsed spacing because extracted PDF text does not always keep the
//! space between label words.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Invoice total labels. The compact form is what the source layout
    // actually emits; the spaced form is a fallback and must not be tried
    // once the compact form has matched.
    pub static ref INVOICE_TOTAL_COMPACT: Regex = Regex::new(
        r"(?i)INVOICETOTAL\s*:\s*([^\n\r]+)"
    ).unwrap();

    pub static ref INVOICE_TOTAL_SPACED: Regex = Regex::new(
        r"(?i)INVOICE\s+TOTAL\s*:\s*([^\n\r]+)"
    ).unwrap();

    // Order-confirmation date lines: a line qualifies when it carries both
    // markers, in either order.
    pub static ref DATE_LABEL: Regex = Regex::new(r"(?i)Date\s*:").unwrap();

    pub static ref ORDER_WORD: Regex = Regex::new(r"(?i)Order").unwrap();

    pub static ref DATE_BEFORE_ORDER: Regex = Regex::new(
        r"(?i)Date\s*:\s*(.*?)(?:\s*Order|$)"
    ).unwrap();

    // Customer block anchors.
    pub static ref INVOICE_TO_LINE: Regex = Regex::new(r"(?i)Invoice\s+to\s*:").unwrap();

    pub static ref INVOICE_TO_PREFIX: Regex = Regex::new(r"(?im)^invoice\s+to\s*:\s*").unwrap();

    pub static ref CUSTOMER_LABEL: Regex = Regex::new(r"(?i)^CUSTOMER\s*:\s*").unwrap();

    pub static ref CUSTOMER_ANYWHERE: Regex = Regex::new(r"(?i)CUSTOMER\s*:").unwrap();

    pub static ref FISCAL_PREFIX: Regex = Regex::new(r"(?i)^FISCAL\s+TAX\s+INVOICE\s+").unwrap();

    // `Vat No:`/`Tin No:` segments embedded in a captured customer block.
    pub static ref VAT_NO_SEGMENT: Regex = Regex::new(r"(?i)Vat\s*No\s*:[^\n]*\n?").unwrap();

    pub static ref TIN_NO_SEGMENT: Regex = Regex::new(r"(?i)\nTin\s*No\s*:[^\n]*").unwrap();

    // VAT labels, applied line by line.
    pub static ref VAT_NO_LINE: Regex = Regex::new(r"(?i)^(.*?)Vat\s*No\s*:\s*(.*)$").unwrap();

    pub static ref CUSTOMER_VAT: Regex = Regex::new(
        r"(?i)CUSTOMER\s+VAT\s*:\s*([^\n\r]+)"
    ).unwrap();

    // Invoice numbers: a value ends at the first run of 3+ spaces (the gap
    // separating the number column from its neighbours) or at end of line.
    pub static ref INVOICE_NO: Regex = Regex::new(
        r"(?i)Invoice\s*No\s*:\s*(.+?)(?: {3,}|$)"
    ).unwrap();
}
