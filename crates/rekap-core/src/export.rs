//! Export. Serializes annotated rows for download.
//!
//! JSON keeps the wire field names. The CSV sheet has one header line whose
//! labels are the field names with `_` replaced by a space, upper-cased
//! (`no_pesanan` → `NO PESANAN`).

use std::io::Write;

use crate::error::Result;
use crate::types::AnnotatedRow;

/// Field names in serialization order.
pub const FIELDS: [&str; 10] = [
    "no_pesanan",
    "Marketplace",
    "Account",
    "tracking_number",
    "pesanan_dibuat",
    "skuVarian",
    "sku",
    "warna",
    "size",
    "jumlah",
];

/// Presentation label for a field name.
pub fn header_label(field: &str) -> String {
    field.replace('_', " ").to_uppercase()
}

pub fn to_json(rows: &[AnnotatedRow]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// Write `rows` as CSV with presentation labels. `null` values become empty
/// cells.
pub fn write_csv<W: Write>(rows: &[AnnotatedRow], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(FIELDS.iter().map(|field| header_label(field)))?;
    for row in rows {
        csv.write_record(cells(row))?;
    }
    csv.flush()?;
    Ok(())
}

fn cells(row: &AnnotatedRow) -> [String; 10] {
    [
        row.no_pesanan.clone(),
        row.marketplace.to_string(),
        row.account.clone(),
        row.tracking_number.clone(),
        row.pesanan_dibuat.clone(),
        row.sku_varian.clone(),
        row.sku.clone(),
        row.warna.clone().unwrap_or_default(),
        row.size.clone().unwrap_or_default(),
        row.jumlah.to_text(),
    ]
}
