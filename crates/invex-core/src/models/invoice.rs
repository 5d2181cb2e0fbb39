//! Invoice metadata models.
//!
//! [`DocumentMetadata`] is the in-flight accumulator for one document; it
//! separates the overwritable open mapping (coordinate and key/value fields,
//! later pages win) from the sticky document-scoped derivations (first
//! successful page wins) so the overwrite policy is explicit per field.
//! [`InvoiceRecord`] is the finalized, flat projection of a document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Flat field map of one finalized invoice document, as serialized to the
/// folder JSON: `{"metadata": {<field>: <value>, ...}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub metadata: BTreeMap<String, String>,
}

/// Typed per-document accumulator.
///
/// A derivation slot that is `Some` is settled for the document; callers
/// must check before writing. The open mapping carries no such protection.
#[derive(Debug, Clone, Default)]
pub struct DocumentMetadata {
    /// Open mapping for coordinate- and key/value-extracted fields.
    pub fields: BTreeMap<String, String>,

    /// Overwritable derivation: the last page with a match wins.
    pub invoice_total: Option<String>,

    // Document-scoped derivations: set once, first successful page wins.
    pub date_special: Option<String>,
    pub special_customer: Option<String>,
    pub spec_customer_1: Option<String>,
    pub spec_customer_2: Option<String>,
    pub spec_customer_3: Option<String>,
    pub spec_customer_4: Option<String>,
    pub spec_vat: Option<String>,
    pub invoice_number_1: Option<String>,
    pub invoice_number_1_variant: Option<String>,
    pub invoice_number_2: Option<String>,
}

impl DocumentMetadata {
    /// Store an open-mapping field, overwriting any earlier value.
    pub fn set_field(&mut self, key: &str, value: String) {
        self.fields.insert(key.to_string(), value);
    }

    /// Flatten into the output record. Derived fields win over open-mapping
    /// entries that happen to share a name.
    pub fn finalize(self) -> InvoiceRecord {
        let mut metadata = self.fields;
        let derived = [
            ("invoice_total", self.invoice_total),
            ("Date-Special", self.date_special),
            ("special_customer", self.special_customer),
            ("spec_customer_1", self.spec_customer_1),
            ("spec_customer_2", self.spec_customer_2),
            ("spec_customer_3", self.spec_customer_3),
            ("spec_customer_4", self.spec_customer_4),
            ("spec_vat", self.spec_vat),
            ("invoice_number_1", self.invoice_number_1),
            ("invoice_number_1_variant", self.invoice_number_1_variant),
            ("invoice_number_2", self.invoice_number_2),
        ];
        for (key, value) in derived {
            if let Some(value) = value {
                metadata.insert(key.to_string(), value);
            }
        }
        InvoiceRecord { metadata }
    }
}
