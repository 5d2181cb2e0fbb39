//! Customer block derivation chain.
//!
//! `special_customer` captures the `Invoice to:` block off the raw page
//! text; stages 1-4 then refine it, each consuming the previous stage's
//! output. Every stage is document-scoped: once a stage's value is set it
//! is never recomputed for later pages.

use super::patterns::{
    CUSTOMER_ANYWHERE, CUSTOMER_LABEL, FISCAL_PREFIX, INVOICE_TO_LINE, INVOICE_TO_PREFIX,
    TIN_NO_SEGMENT, VAT_NO_SEGMENT,
};

/// Context lines collected after the `Invoice to:` anchor line.
const CONTEXT_LINES: usize = 3;

/// Allowed indentation drift, in columns, for a collected context line.
const INDENT_TOLERANCE: usize = 2;

/// Strip line-leading `Invoice to:` labels from text destined for the
/// generic `customer` key.
pub fn clean_customer_label(text: &str) -> String {
    INVOICE_TO_PREFIX.replace_all(text, "").trim().to_string()
}

fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Capture the `Invoice to:` block: the anchor line plus up to three
/// following lines whose indentation stays within two columns of the
/// anchor's. Collection stops early at the first line drifting further.
pub fn derive_special_customer(text: &str) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();
    for (i, line) in lines.iter().enumerate() {
        if !INVOICE_TO_LINE.is_match(line) {
            continue;
        }
        let baseline = indent_width(line);
        let mut block = vec![*line];
        for &next in lines.iter().skip(i + 1).take(CONTEXT_LINES) {
            if indent_width(next).abs_diff(baseline) > INDENT_TOLERANCE {
                break;
            }
            block.push(next);
        }
        let value = block.join("\n").trim().to_string();
        if !value.is_empty() {
            return Some(value);
        }
    }
    None
}

/// Stage 1: drop `Vat No:` and `Tin No:` line segments from the block.
pub fn derive_customer_stage_1(text: &str) -> Option<String> {
    let cleaned = VAT_NO_SEGMENT.replace_all(text, "");
    let cleaned = TIN_NO_SEGMENT.replace_all(&cleaned, "");
    let cleaned = cleaned.trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Stage 2: strip a leading `CUSTOMER:` label.
pub fn derive_customer_stage_2(text: &str) -> Option<String> {
    let cleaned = CUSTOMER_LABEL.replace(text, "");
    let cleaned = cleaned.trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Stage 3: when `CUSTOMER:` appears anywhere, keep only the text after
/// its first occurrence; otherwise pass through unchanged.
pub fn derive_customer_stage_3(text: &str) -> Option<String> {
    let cleaned = match CUSTOMER_ANYWHERE.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    };
    let cleaned = cleaned.trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Stage 4: strip a leading `FISCAL TAX INVOICE` prefix; otherwise pass
/// through unchanged.
pub fn derive_customer_stage_4(text: &str) -> Option<String> {
    let cleaned = FISCAL_PREFIX.replace(text, "");
    let cleaned = cleaned.trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}
