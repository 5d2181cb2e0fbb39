//! Per-document metadata accumulation.
//!
//! Pages are folded in document order. Open-mapping fields and the invoice
//! total are overwritable page over page; document-scoped derivations stick
//! with the first page that produced them; VAT candidates and invoice
//! numbers accumulate across the whole document and resolve in
//! [`InvoiceAccumulator::finish`].

use tracing::debug;

use crate::coords::CoordinateRegistry;
use crate::kv::parse_key_values;
use crate::models::invoice::{DocumentMetadata, InvoiceRecord};
use crate::pdf::PageText;

use super::fields::{extract_page_fields, PageFields};
use super::rules::{
    clean_customer_label, derive_customer_stage_1, derive_customer_stage_2,
    derive_customer_stage_3, derive_customer_stage_4, derive_customer_vat, derive_date_special,
    derive_invoice_total, derive_special_customer, number_variant, scan_invoice_numbers,
    scan_vat_candidates, MIN_VAT_CANDIDATES,
};

/// Folds per-page extraction and derivation results into one document's
/// metadata.
pub struct InvoiceAccumulator<'a> {
    registry: &'a CoordinateRegistry,
    meta: DocumentMetadata,
    vat_candidates: Vec<String>,
    vat_fallback: Option<String>,
    invoice_numbers: Vec<String>,
    pages_seen: usize,
}

impl<'a> InvoiceAccumulator<'a> {
    pub fn new(registry: &'a CoordinateRegistry) -> Self {
        Self {
            registry,
            meta: DocumentMetadata::default(),
            vat_candidates: Vec::new(),
            vat_fallback: None,
            invoice_numbers: Vec::new(),
            pages_seen: 0,
        }
    }

    /// Fold one page into the document metadata. Pages must be fed in
    /// document order; the sticky-field policy depends on it.
    pub fn ingest_page<P: PageText>(&mut self, page: &P, page_index: usize) {
        let text = match extract_page_fields(page, self.registry, page_index) {
            PageFields::Fields(fields) => {
                self.merge_fields(fields);
                page.full_text()
            }
            PageFields::Unstructured(text) => {
                self.merge_key_values(&text);
                text
            }
        };

        // One page text, fanned out into independent matchers. Ordering
        // only matters inside the customer chain.
        if let Some(total) = derive_invoice_total(&text) {
            self.meta.invoice_total = Some(total);
        }
        if self.meta.date_special.is_none() {
            self.meta.date_special = derive_date_special(&text);
        }
        self.run_customer_chain(&text);
        self.vat_candidates.extend(scan_vat_candidates(&text));
        if self.vat_fallback.is_none() {
            self.vat_fallback = derive_customer_vat(&text);
        }
        self.invoice_numbers.extend(scan_invoice_numbers(&text));
        self.pages_seen += 1;
    }

    /// Resolve the document-wide scans and flatten into the final record.
    pub fn finish(mut self) -> InvoiceRecord {
        if self.meta.spec_vat.is_none() {
            self.meta.spec_vat = if self.vat_candidates.len() >= MIN_VAT_CANDIDATES {
                self.vat_candidates.last().cloned()
            } else {
                self.vat_fallback.take()
            };
        }
        if self.meta.invoice_number_1.is_none() {
            if let Some(first) = self.invoice_numbers.first() {
                self.meta.invoice_number_1 = Some(first.clone());
                self.meta.invoice_number_1_variant = Some(number_variant(first));
            }
        }
        if self.meta.invoice_number_2.is_none() {
            if let Some(second) = self.invoice_numbers.get(1) {
                self.meta.invoice_number_2 = Some(second.clone());
            }
        }
        debug!(
            pages = self.pages_seen,
            numbers = self.invoice_numbers.len(),
            "document accumulated"
        );
        self.meta.finalize()
    }

    fn merge_fields(&mut self, fields: Vec<(String, String)>) {
        for (name, raw) in fields {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            let value = if name == "customer" {
                clean_customer_label(trimmed)
            } else {
                trimmed.to_string()
            };
            if !value.is_empty() {
                self.meta.set_field(&name, value);
            }
            // a region often holds `key: value` lines of its own; surface
            // those as metadata too
            self.merge_key_values(trimmed);
        }
    }

    fn merge_key_values(&mut self, text: &str) {
        let mut pairs = parse_key_values(text);

        // A key like `Invoice to` carries the customer block under a label
        // spelling; reroute it to `customer` unless one was parsed already.
        let has_customer = pairs.iter().any(|(key, _)| key == "customer");
        let mut rerouted: Option<String> = None;
        pairs.retain(|(key, value)| {
            let lower = key.to_lowercase();
            if lower.contains("invoice") && lower.contains("to") {
                if !has_customer && rerouted.is_none() {
                    rerouted = Some(clean_customer_label(value));
                }
                false
            } else {
                true
            }
        });

        for (key, value) in pairs {
            let value = if key == "customer" {
                clean_customer_label(&value)
            } else {
                value
            };
            if !value.is_empty() {
                self.meta.set_field(&key, value);
            }
        }
        if let Some(customer) = rerouted {
            if !customer.is_empty() {
                self.meta.set_field("customer", customer);
            }
        }
    }

    /// Stages run only while their own slot is unset; the chain stops at
    /// the first stage producing nothing for this page. A stage that failed
    /// here may still succeed on a later page.
    fn run_customer_chain(&mut self, text: &str) {
        if self.meta.special_customer.is_none() {
            self.meta.special_customer = derive_special_customer(text);
        }
        let Some(base) = self.meta.special_customer.clone() else {
            return;
        };

        if self.meta.spec_customer_1.is_none() {
            self.meta.spec_customer_1 = derive_customer_stage_1(&base);
        }
        let Some(stage_1) = self.meta.spec_customer_1.clone() else {
            return;
        };

        if self.meta.spec_customer_2.is_none() {
            self.meta.spec_customer_2 = derive_customer_stage_2(&stage_1);
        }
        let Some(stage_2) = self.meta.spec_customer_2.clone() else {
            return;
        };

        if self.meta.spec_customer_3.is_none() {
            self.meta.spec_customer_3 = derive_customer_stage_3(&stage_2);
        }
        let Some(stage_3) = self.meta.spec_customer_3.clone() else {
            return;
        };

        if self.meta.spec_customer_4.is_none() {
            self.meta.spec_customer_4 = derive_customer_stage_4(&stage_3);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testing::FakePage;
    use pretty_assertions::assert_eq;

    fn empty_registry() -> CoordinateRegistry {
        CoordinateRegistry::default()
    }

    fn accumulate(pages: &[FakePage]) -> InvoiceRecord {
        let registry = empty_registry();
        let mut acc = InvoiceAccumulator::new(&registry);
        for (index, page) in pages.iter().enumerate() {
            acc.ingest_page(page, index);
        }
        acc.finish()
    }

    #[test]
    fn test_invoice_total_last_page_wins() {
        let record = accumulate(&[
            FakePage::with_text("INVOICETOTAL: USD 10.00"),
            FakePage::with_text("INVOICETOTAL: USD 20.00"),
        ]);
        assert_eq!(record.metadata["invoice_total"], "USD 20.00");
    }

    #[test]
    fn test_date_special_first_page_wins() {
        let record = accumulate(&[
            FakePage::with_text("Date: 2024-01-10 Order 1"),
            FakePage::with_text("Date: 2024-02-20 Order 2"),
        ]);
        assert_eq!(record.metadata["Date-Special"], "2024-01-10");
    }

    #[test]
    fn test_customer_chain_first_page_wins() {
        let record = accumulate(&[
            FakePage::with_text("Invoice to:\nCUSTOMER: Acme Corp"),
            FakePage::with_text("Invoice to:\nCUSTOMER: Other Ltd"),
        ]);
        assert_eq!(
            record.metadata["special_customer"],
            "Invoice to:\nCUSTOMER: Acme Corp"
        );
        assert_eq!(record.metadata["spec_customer_4"], "Acme Corp");
    }

    #[test]
    fn test_customer_chain_may_complete_on_later_page() {
        // page 1 has no anchor at all; page 2 supplies the block
        let record = accumulate(&[
            FakePage::with_text("nothing of note"),
            FakePage::with_text("Invoice to:\nAcme Corp"),
        ]);
        assert_eq!(record.metadata["spec_customer_4"], "Invoice to:\nAcme Corp");
    }

    #[test]
    fn test_vat_needs_two_candidates() {
        let record = accumulate(&[FakePage::with_text("Vat No: 10001111")]);
        assert!(!record.metadata.contains_key("spec_vat"));
    }

    #[test]
    fn test_vat_last_candidate_wins() {
        let record = accumulate(&[FakePage::with_text("220002222 Vat No: 10001111")]);
        assert_eq!(record.metadata["spec_vat"], "10001111");
    }

    #[test]
    fn test_vat_candidates_accumulate_across_pages() {
        let record = accumulate(&[
            FakePage::with_text("Vat No: 111"),
            FakePage::with_text("Vat No: 222"),
        ]);
        assert_eq!(record.metadata["spec_vat"], "222");
    }

    #[test]
    fn test_vat_fallback_on_single_candidate() {
        let record = accumulate(&[FakePage::with_text(
            "Vat No: 111\nCUSTOMER VAT: 998877",
        )]);
        assert_eq!(record.metadata["spec_vat"], "998877");
    }

    #[test]
    fn test_invoice_numbers_in_document_order() {
        let record = accumulate(&[
            FakePage::with_text("Invoice No: ABC-123   Invoice No: XYZ-9"),
            FakePage::with_text("Invoice No: LAST-1"),
        ]);
        assert_eq!(record.metadata["invoice_number_1"], "ABC-123");
        assert_eq!(record.metadata["invoice_number_1_variant"], "ABC-123");
        assert_eq!(record.metadata["invoice_number_2"], "XYZ-9");
    }

    #[test]
    fn test_single_invoice_number_has_no_second_slot() {
        let record = accumulate(&[FakePage::with_text("Invoice No: INV 9001")]);
        assert_eq!(record.metadata["invoice_number_1"], "INV 9001");
        assert_eq!(record.metadata["invoice_number_1_variant"], "INV");
        assert!(!record.metadata.contains_key("invoice_number_2"));
    }

    #[test]
    fn test_unstructured_page_routes_through_kv_parser() {
        let record = accumulate(&[FakePage::with_text(
            "Terms: Net 30\nInvoice to: Acme Corp",
        )]);
        assert_eq!(record.metadata["Terms"], "Net 30");
        // the `Invoice to` key is rerouted to `customer` and cleaned
        assert_eq!(record.metadata["customer"], "Acme Corp");
        assert!(!record.metadata.contains_key("Invoice to"));
    }

    #[test]
    fn test_kv_reroute_respects_existing_customer_key() {
        let record = accumulate(&[FakePage::with_text(
            "customer: Direct Ltd\nInvoice to: Acme Corp",
        )]);
        assert_eq!(record.metadata["customer"], "Direct Ltd");
    }

    #[test]
    fn test_coordinate_fields_stored_and_kv_merged() {
        let registry = CoordinateRegistry::parse(
            "customer_TL: { x: 30, y: 40, page: 1 }\n\
             customer_BR: { x: 200, y: 90, page: 1 }\n",
        );
        let page = FakePage {
            height: 792.0,
            text: String::new(),
            regions: vec![(
                (30.0, 702.0, 200.0, 752.0),
                "Invoice to: Acme Corp".to_string(),
            )],
        };
        let mut acc = InvoiceAccumulator::new(&registry);
        acc.ingest_page(&page, 0);
        let record = acc.finish();

        // the coordinate field is cleaned of its label, and the kv pass
        // reroutes the `Invoice to` key into the same (cleaned) value
        assert_eq!(record.metadata["customer"], "Acme Corp");
    }

    #[test]
    fn test_blank_coordinate_extraction_skipped() {
        let registry = CoordinateRegistry::parse(
            "vatnum_TL: { x: 10, y: 10, page: 1 }\n\
             vatnum_BR: { x: 50, y: 30, page: 1 }\n",
        );
        let page = FakePage {
            height: 792.0,
            text: String::new(),
            regions: vec![],
        };
        let mut acc = InvoiceAccumulator::new(&registry);
        acc.ingest_page(&page, 0);
        let record = acc.finish();
        assert!(record.metadata.is_empty());
    }
}
