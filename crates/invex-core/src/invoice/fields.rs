//! Coordinate-region field extraction for a single page.

use tracing::trace;

use crate::coords::CoordinateRegistry;
use crate::pdf::PageText;

/// Result of extracting one page: either a field map from coordinate
/// regions, or the whole page as one blob when no regions are defined.
/// The blob signals the fallback path to the accumulator, which routes it
/// through the key/value parser instead of field-direct assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFields {
    /// `(field, text)` pairs in definition-file order. Duplicate boxes
    /// resolving to the same field on one page are concatenated with a
    /// newline. Empty extractions keep their field key with an empty value.
    Fields(Vec<(String, String)>),

    /// Whole-page text, extracted because the registry is empty.
    Unstructured(String),
}

/// Extract text for every region of `registry` targeting `page_index`.
///
/// File-space coordinates (top-left origin) are converted to the page's
/// bottom-left space via `bottom = height - yTop`, `top = height - yBottom`
/// before cropping.
pub fn extract_page_fields<P: PageText>(
    page: &P,
    registry: &CoordinateRegistry,
    page_index: usize,
) -> PageFields {
    if registry.is_empty() {
        return PageFields::Unstructured(page.full_text());
    }

    let height = page.height();
    let mut fields: Vec<(String, String)> = Vec::new();
    for region in registry.for_page(page_index) {
        let (x0, bottom, x1, top) = region.native_box(height);
        let text = page.text_in_region(x0, bottom, x1, top);
        trace!(field = %region.field, x0, bottom, x1, top, "extracted region");
        match fields.iter_mut().find(|(name, _)| *name == region.field) {
            Some(entry) => {
                entry.1.push('\n');
                entry.1.push_str(&text);
            }
            None => fields.push((region.field.clone(), text)),
        }
    }
    PageFields::Fields(fields)
}
