//! Core library for coordinate-anchored invoice metadata extraction.
//!
//! This crate provides:
//! - Coordinate-region definitions parsed from an external definition file
//! - PDF page text extraction, whole-page or cropped to a field region
//! - Heuristic field derivation (invoice totals, order dates, customer
//!   blocks, VAT numbers, invoice numbers)
//! - Per-document metadata accumulation with an explicit overwrite policy
//! - JSON and fixed-schema CSV projection, one output pair per batch folder

pub mod coords;
pub mod error;
pub mod invoice;
pub mod kv;
pub mod models;
pub mod output;
pub mod pdf;
pub mod service;

pub use coords::{CoordinateField, CoordinateRegistry};
pub use error::{InvexError, Result};
pub use invoice::{InvoiceAccumulator, PageFields};
pub use models::config::InvexConfig;
pub use models::invoice::{DocumentMetadata, InvoiceRecord};
pub use output::FolderResult;
pub use pdf::{PageText, PdfPage, PdfReader};
pub use service::{ExtractorService, RunSummary};
