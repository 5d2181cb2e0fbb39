//! PDF text extraction backed by lopdf and pdf-extract.
//!
//! `pdf-extract`'s `PlainTextOutput` flattens a whole document to text and
//! discards the glyph geometry on the way. Region-scoped extraction needs
//! that geometry, so [`GlyphDevice`] implements the same `OutputDev`
//! callback seam but keeps every glyph with its position; pages then
//! assemble text on demand, whole or cropped to a box.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use pdf_extract::{Document, MediaBox, OutputDev, OutputError, Transform};
use tracing::debug;

use super::{PageText, Result};
use crate::error::PdfError;

/// Approximate advance of one space, as a fraction of the font size. Used
/// to turn horizontal gaps back into space runs when assembling text.
const SPACE_EM: f64 = 0.5;

/// One positioned glyph cluster as reported by the content interpreter.
#[derive(Debug, Clone)]
struct Glyph {
    x: f64,
    y: f64,
    end_x: f64,
    font_size: f64,
    text: String,
}

/// Glyphs and dimensions of a single page, origin at the lower-left corner.
#[derive(Debug, Clone, Default)]
struct PageContent {
    height: f64,
    glyphs: Vec<Glyph>,
}

/// `OutputDev` that records glyph positions per page instead of writing
/// text out.
#[derive(Default)]
struct GlyphDevice {
    pages: Vec<PageContent>,
    origin: (f64, f64),
}

impl OutputDev for GlyphDevice {
    fn begin_page(
        &mut self,
        _page_num: u32,
        media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> std::result::Result<(), OutputError> {
        // normalize so every page starts at (0, 0)
        self.origin = (media_box.llx, media_box.lly);
        self.pages.push(PageContent {
            height: media_box.ury - media_box.lly,
            glyphs: Vec::new(),
        });
        Ok(())
    }

    fn end_page(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        char: &str,
    ) -> std::result::Result<(), OutputError> {
        let x = trm.m31 - self.origin.0;
        let y = trm.m32 - self.origin.1;
        // same square-area approximation PlainTextOutput uses for the
        // transformed font size
        let fx = font_size * (trm.m11 + trm.m21);
        let fy = font_size * (trm.m12 + trm.m22);
        let transformed_size = (fx * fy).abs().sqrt();
        if let Some(page) = self.pages.last_mut() {
            page.glyphs.push(Glyph {
                x,
                y,
                end_x: x + width * transformed_size,
                font_size: transformed_size,
                text: char.to_string(),
            });
        }
        Ok(())
    }

    fn begin_word(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }
}

/// Rebuild text from positioned glyphs.
///
/// Glyphs are clustered into lines by baseline proximity and ordered top to
/// bottom, then left to right. Horizontal gaps come back as proportional
/// space runs so that table column gaps survive as runs of 3+ spaces and
/// block indentation survives as leading spaces; the left margin reference
/// is the minimum x of the glyph set.
fn assemble(mut glyphs: Vec<&Glyph>) -> String {
    glyphs.retain(|g| !g.text.is_empty());
    if glyphs.is_empty() {
        return String::new();
    }

    glyphs.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
    });

    let mut lines: Vec<Vec<&Glyph>> = Vec::new();
    let mut line_y = f64::INFINITY;
    for glyph in glyphs {
        let tolerance = (glyph.font_size * 0.5).max(1.0);
        if lines.is_empty() || (line_y - glyph.y) > tolerance {
            lines.push(Vec::new());
            line_y = glyph.y;
        }
        lines.last_mut().unwrap().push(glyph);
    }
    for line in &mut lines {
        line.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
    }

    let margin = lines
        .iter()
        .flatten()
        .map(|g| g.x)
        .fold(f64::INFINITY, f64::min);

    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let mut prev_end = margin;
        for glyph in line {
            let space_width = (glyph.font_size * SPACE_EM).max(1.0);
            let gap = glyph.x - prev_end;
            if gap > space_width * 0.3 {
                let count = (gap / space_width).round().max(1.0) as usize;
                out.extend(std::iter::repeat(' ').take(count));
            }
            out.push_str(&glyph.text);
            prev_end = glyph.end_x;
        }
    }
    out
}

/// One page of a loaded document.
#[derive(Debug, Clone)]
pub struct PdfPage {
    content: PageContent,
}

impl PageText for PdfPage {
    fn height(&self) -> f64 {
        self.content.height
    }

    fn full_text(&self) -> String {
        assemble(self.content.glyphs.iter().collect())
    }

    fn text_in_region(&self, x0: f64, bottom: f64, x1: f64, top: f64) -> String {
        assemble(
            self.content
                .glyphs
                .iter()
                .filter(|g| g.x >= x0 && g.x <= x1 && g.y >= bottom && g.y <= top)
                .collect(),
        )
    }
}

/// PDF document reader. The handle owns all extracted page content; the
/// underlying document is released as soon as loading finishes.
pub struct PdfReader {
    pages: Vec<PdfPage>,
}

impl PdfReader {
    /// Open and extract a PDF from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        Self::load(&data)
    }

    /// Load and extract a PDF from bytes.
    pub fn load(data: &[u8]) -> Result<Self> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("decrypted PDF with empty password");
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        let mut device = GlyphDevice::default();
        pdf_extract::output_doc(&doc, &mut device)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        debug!("loaded PDF with {} page(s)", device.pages.len());
        Ok(Self {
            pages: device
                .pages
                .into_iter()
                .map(|content| PdfPage { content })
                .collect(),
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[PdfPage] {
        &self.pages
    }
}
