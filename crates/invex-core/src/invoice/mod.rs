//! Invoice field extraction module.

mod accumulator;
mod fields;
pub mod rules;

pub use accumulator::InvoiceAccumulator;
pub use fields::{extract_page_fields, PageFields};
