//! TikTok Shop order export.
//!
//! The sheet has a header row, then a row describing each column, then data.
//! Columns are located by name, so their order does not matter. The colour
//! keeps the case it was typed in; only `skuVarian` is lowercased.

use super::{date_part, dmy_to_iso, sku_varian};
use crate::error::{RekapError, Result};
use crate::reader::GridTable;
use crate::types::{CellValue, NormalizedRow, Vendor};
use crate::validate::resolve_columns;

pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Tracking ID",
    "Order ID",
    "Created Time",
    "Seller SKU",
    "Variation",
    "Quantity",
];

/// Non-data rows between the header and the first order.
pub const DESCRIPTION_ROWS: usize = 1;

/// `Created Time` → `YYYY-MM-DD` when it is `DD/MM/YYYY`; anything else is
/// kept as the text before the first space.
pub fn normalize_created_time(raw: &str) -> String {
    let date = date_part(raw);
    dmy_to_iso(date).unwrap_or_else(|| date.to_string())
}

/// Split `Variation` on commas into `(warna, size)`, trimmed but not
/// lowercased. Missing parts are empty.
pub fn split_variation(variation: &str) -> (String, String) {
    let mut parts = variation.split(',').map(str::trim);
    let warna = parts.next().unwrap_or_default().to_string();
    let size = parts.next().unwrap_or_default().to_string();
    (warna, size)
}

/// Normalize a TikTok grid whose description row has already been skipped.
/// Every data row yields exactly one row.
pub fn normalize(table: &GridTable) -> Result<Vec<NormalizedRow>> {
    if table.is_empty() {
        return Err(RekapError::EmptyInput);
    }
    let [tracking, order, created, seller_sku, variation, quantity] =
        resolve_columns(Vendor::TikTok, &REQUIRED_COLUMNS, &table.header)?;

    let rows = table
        .rows
        .iter()
        .map(|row| {
            let cell = |index: usize| row.get(index).cloned().unwrap_or_default();

            let sku = cell(seller_sku).to_text().trim().to_lowercase();
            let (warna, size) = split_variation(&cell(variation).to_text());
            let sku_varian = sku_varian([Some(sku.as_str()), Some(warna.as_str()), Some(size.as_str())]);

            NormalizedRow {
                no_pesanan: cell(order).to_text(),
                tracking_number: cell(tracking).to_text(),
                pesanan_dibuat: normalize_created_time(&cell(created).to_text()),
                sku_varian,
                sku,
                warna: Some(warna),
                size: Some(size),
                variation: None,
                jumlah: match cell(quantity) {
                    CellValue::Empty => CellValue::text(""),
                    value => value,
                },
            }
        })
        .collect();
    Ok(rows)
}
