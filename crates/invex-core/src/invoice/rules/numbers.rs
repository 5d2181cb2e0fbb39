//! Invoice number scanning.

use super::patterns::INVOICE_NO;

/// Collect every `Invoice No:` value on the page, line by line, left to
/// right. A value ends at the first run of three or more spaces (the gap
/// that separates the number column from adjacent table columns in the
/// source layout) or at end of line.
pub fn scan_invoice_numbers(text: &str) -> Vec<String> {
    let mut numbers = Vec::new();
    for line in text.lines() {
        for caps in INVOICE_NO.captures_iter(line) {
            let value = caps[1].trim();
            if !value.is_empty() {
                numbers.push(value.to_string());
            }
        }
    }
    numbers
}

/// First whitespace-delimited token of an invoice number.
pub fn number_variant(number: &str) -> String {
    number
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}
