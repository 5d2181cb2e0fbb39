//! Fixed-schema CSV projection.

use std::path::Path;

use csv::Writer;

use crate::error::OutputError;

use super::FolderResult;

/// The seven output columns, in order.
const HEADER: [&str; 7] = [
    "filename",
    "Date",
    "VAT",
    "Invoice Number",
    "Customer",
    "USD",
    "Zig",
];

/// Write one row per document, sorted by filename. Missing source fields
/// render as empty strings, never null; an empty document set still
/// produces the header row.
pub fn write_folder_csv(path: &Path, documents: &FolderResult) -> Result<(), OutputError> {
    let mut writer = Writer::from_path(path)?;
    writer.write_record(HEADER)?;

    for (filename, record) in documents {
        let get = |key: &str| record.metadata.get(key).map(String::as_str).unwrap_or("");
        let (usd, zig) = split_currency(get("invoice_total"));
        writer.write_record([
            filename.as_str(),
            get("Date-Special"),
            get("spec_vat"),
            get("invoice_number_1_variant"),
            get("spec_customer_4"),
            usd.as_str(),
            zig.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Split an `invoice_total` into the `(USD, Zig)` column pair on its
/// currency prefix. A value starting with neither prefix leaves both
/// columns empty.
fn split_currency(total: &str) -> (String, String) {
    let Some(prefix) = total.get(..3) else {
        return (String::new(), String::new());
    };
    let rest = total[3..].trim();
    if prefix.eq_ignore_ascii_case("USD") {
        (rest.to_string(), String::new())
    } else if prefix.eq_ignore_ascii_case("ZWG") {
        (String::new(), rest.to_string())
    } else {
        (String::new(), String::new())
    }
}
