//! Heuristic field derivation rules.
//!
//! Each rule is a pure function from page text (or a previously derived
//! value) to an optional value. Matching is case-insensitive, and a
//! non-match is normal control flow, never an error. The accumulator in
//! [`crate::invoice`] drives the rules in their required order and applies
//! the per-field overwrite policy.

pub mod customer;
pub mod dates;
pub mod numbers;
pub mod patterns;
pub mod totals;
pub mod vat;

pub use customer::{
    clean_customer_label, derive_customer_stage_1, derive_customer_stage_2,
    derive_customer_stage_3, derive_customer_stage_4, derive_special_customer,
};
pub use dates::derive_date_special;
pub use numbers::{number_variant, scan_invoice_numbers};
pub use totals::derive_invoice_total;
pub use vat::{derive_customer_vat, scan_vat_candidates, MIN_VAT_CANDIDATES};
