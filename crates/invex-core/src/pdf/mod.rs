//! PDF reading module.
//!
//! The extraction pipeline needs exactly three capabilities from a page: its
//! height, its full text, and the text inside a rectangular region. They are
//! expressed as the [`PageText`] trait so everything downstream of the
//! reader can be driven by any backend (tests use an in-memory fake). The
//! default backend in [`reader`] is built on `lopdf` + `pdf-extract`.

mod reader;

pub use reader::{PdfPage, PdfReader};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// A page that can report its size and surrender text.
///
/// Coordinates are the page's native space: origin at the lower-left
/// corner, y increasing upwards, units in points.
pub trait PageText {
    /// Page height in points.
    fn height(&self) -> f64;

    /// The whole page assembled as text.
    fn full_text(&self) -> String;

    /// Text inside the `(x0, bottom, x1, top)` box; empty when nothing
    /// falls inside it.
    fn text_in_region(&self, x0: f64, bottom: f64, x1: f64, top: f64) -> String;
}
