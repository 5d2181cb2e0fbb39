//! Coordinate definition registry.
//!
//! Field regions come from an external definition file with records of the
//! form `customer_TL: { x: 34, y: 72, page: 1 }`, one record per corner.
//! Only the TL and BR corners define a box; TR/BL records are tolerated and
//! ignored, and a field/page pair missing either required corner is silently
//! dropped. Unrecognized lines are ignored. Page numbers are 1-indexed in
//! the file and 0-indexed everywhere else.

use std::collections::HashMap;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

lazy_static! {
    static ref CORNER_RECORD: Regex = Regex::new(
        r"(\w+)_(TL|TR|BL|BR):\s*\{\s*x:\s*(\d+),\s*y:\s*(\d+),\s*page:\s*(\d+)\s*\}"
    )
    .unwrap();
}

/// A resolved extraction region for one field on one page.
///
/// The y coordinates keep the definition file's top-left origin; use
/// [`CoordinateField::native_box`] to convert to a page's bottom-left space.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateField {
    /// Metadata key the extracted text is stored under.
    pub field: String,
    /// 0-indexed page position within the document.
    pub page: usize,
    pub x0: f64,
    pub x1: f64,
    /// Top edge, measured downwards from the top of the page.
    pub y_top: f64,
    /// Bottom edge, measured downwards from the top of the page.
    pub y_bottom: f64,
}

impl CoordinateField {
    /// Convert to the page's native bottom-left space as
    /// `(x0, bottom, x1, top)`.
    pub fn native_box(&self, page_height: f64) -> (f64, f64, f64, f64) {
        (
            self.x0,
            page_height - self.y_top,
            self.x1,
            page_height - self.y_bottom,
        )
    }
}

/// Parsed mapping from (field, page) to bounding box.
///
/// An empty registry signals whole-page fallback mode to the extractor.
#[derive(Debug, Clone, Default)]
pub struct CoordinateRegistry {
    fields: Vec<CoordinateField>,
}

impl CoordinateRegistry {
    /// Build a registry from already-resolved regions, keeping their order.
    pub fn from_fields(fields: Vec<CoordinateField>) -> Self {
        Self { fields }
    }

    /// Parse definition file contents.
    pub fn parse(content: &str) -> Self {
        let mut order: Vec<(String, u32)> = Vec::new();
        let mut corners: HashMap<(String, u32), HashMap<String, (f64, f64)>> = HashMap::new();

        for caps in CORNER_RECORD.captures_iter(content) {
            let field = caps[1].to_string();
            let corner = caps[2].to_string();
            let x: f64 = caps[3].parse().unwrap_or(0.0);
            let y: f64 = caps[4].parse().unwrap_or(0.0);
            let page: u32 = caps[5].parse().unwrap_or(0);

            let key = (field, page);
            if !corners.contains_key(&key) {
                order.push(key.clone());
            }
            corners.entry(key).or_default().insert(corner, (x, y));
        }

        let mut fields = Vec::new();
        for key in order {
            let set = &corners[&key];
            let (Some(&(tl_x, tl_y)), Some(&(br_x, br_y))) = (set.get("TL"), set.get("BR"))
            else {
                debug!(
                    "dropping region {}/page {}: missing TL or BR corner",
                    key.0, key.1
                );
                continue;
            };
            // pages are 1-indexed in the file
            if key.1 == 0 {
                continue;
            }
            fields.push(CoordinateField {
                field: key.0,
                page: (key.1 - 1) as usize,
                x0: tl_x.min(br_x),
                x1: tl_x.max(br_x),
                y_top: tl_y.max(br_y),
                y_bottom: tl_y.min(br_y),
            });
        }

        debug!("parsed {} coordinate region(s)", fields.len());
        Self { fields }
    }

    /// Load a definition file. A missing or unreadable file is not fatal:
    /// it yields an empty registry and the pipeline falls back to
    /// whole-page extraction.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(_) => {
                warn!(
                    "coordinate file {} not found, using full page extraction",
                    path.display()
                );
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// All regions in definition-file order.
    pub fn fields(&self) -> &[CoordinateField] {
        &self.fields
    }

    /// Regions targeting the given 0-indexed page, in definition-file order.
    pub fn for_page(&self, page: usize) -> impl Iterator<Item = &CoordinateField> {
        self.fields.iter().filter(move |f| f.page == page)
    }
}
