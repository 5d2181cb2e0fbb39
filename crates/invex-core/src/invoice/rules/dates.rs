//! Order-date derivation.

use super::patterns::{DATE_BEFORE_ORDER, DATE_LABEL, ORDER_WORD};

/// Find the first line carrying both a `Date:` label and the word `Order`
/// (in either order) and capture the text between them.
///
/// The capture is everything after `Date:` up to the first following
/// `Order` or end of line, trimmed of trailing punctuation. An empty
/// capture keeps the scan going on later lines. Document-scoped: the
/// accumulator keeps the first page's value.
pub fn derive_date_special(text: &str) -> Option<String> {
    for line in text.lines() {
        if !(DATE_LABEL.is_match(line) && ORDER_WORD.is_match(line)) {
            continue;
        }
        if let Some(caps) = DATE_BEFORE_ORDER.captures(line) {
            let value = caps[1]
                .trim()
                .trim_end_matches(['.', ',', ';', ':', ' ', '\t']);
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}
