//! Shopee order export.
//!
//! One sheet row is one order. Its `product_info` cell is a free-text blob
//! holding one or more product entries, each introduced by a `[n]` marker:
//!
//! ```text
//! [1]Nama Produk: Kaos;Nama Variasi: Blue, L;Jumlah: 2;Nomor Referensi SKU: ABC;
//! [2]Nama Produk: Topi;Nama Variasi: Red;Jumlah: 1;Nomor Referensi SKU: HAT;
//! ```
//!
//! Every entry becomes its own [`NormalizedRow`], so a row expands to zero or
//! more output rows.

use regex::Regex;

use super::{date_part, dmy_to_iso, is_iso_date, sku_varian, NormalizeOptions};
use crate::error::{RekapError, Result};
use crate::reader::{Record, RecordTable};
use crate::types::{CellValue, NormalizedRow, Vendor};
use crate::validate::validate;

pub const REQUIRED_COLUMNS: [&str; 4] = [
    "tracking_number",
    "order_sn",
    "order_creation_date",
    "product_info",
];

const PRODUCT_NAME_LABEL: &str = "Nama Produk:";

/// Fields pulled out of one product entry. Empty values are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductEntry {
    pub variation: Option<String>,
    pub quantity: Option<String>,
    pub sku: Option<String>,
}

/// Compiled patterns for the `product_info` blob.
#[derive(Debug)]
pub struct ProductInfoParser {
    marker: Regex,
    variation: Regex,
    quantity: Regex,
    sku: Regex,
}

impl ProductInfoParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            marker: Regex::new(r"\[\d+\]")?,
            variation: Regex::new(r"Nama Variasi:([^;]+)")?,
            quantity: Regex::new(r"Jumlah:([^;]+)")?,
            sku: Regex::new(r"Nomor Referensi SKU:([^;]+)")?,
        })
    }

    /// Split a blob into its product entries. Text without any marker is a
    /// single entry; blank segments are skipped.
    pub fn entries(&self, blob: &str) -> Vec<ProductEntry> {
        self.marker
            .split(blob)
            .map(|segment| segment.trim().replacen(PRODUCT_NAME_LABEL, "", 1))
            .filter(|segment| !segment.is_empty())
            .map(|segment| ProductEntry {
                variation: capture(&self.variation, &segment),
                quantity: capture(&self.quantity, &segment),
                sku: capture(&self.sku, &segment),
            })
            .collect()
    }
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Split variation text on commas into `(warna, size)`, trimmed and
/// lowercased. Missing or blank parts are `None`.
pub fn split_variation(variation: Option<&str>) -> (Option<String>, Option<String>) {
    let Some(variation) = variation else {
        return (None, None);
    };
    let mut parts = variation
        .split(',')
        .map(|part| part.trim().to_lowercase())
        .map(|part| (!part.is_empty()).then_some(part));
    let warna = parts.next().flatten();
    let size = parts.next().flatten();
    (warna, size)
}

/// Normalize `order_creation_date`: keep `YYYY-MM-DD` (with either
/// separator), rewrite `DD/MM/YYYY`, otherwise swap `/` for `-`. Any time
/// part is dropped.
pub fn normalize_order_date(raw: &str) -> String {
    let date = date_part(raw);
    if is_iso_date(date) {
        return date.to_string();
    }
    let dashed = date.replace('/', "-");
    if is_iso_date(&dashed) {
        return dashed;
    }
    dmy_to_iso(date).unwrap_or(dashed)
}

/// Normalize a Shopee record table.
pub fn normalize(table: &RecordTable, options: NormalizeOptions) -> Result<Vec<NormalizedRow>> {
    if table.is_empty() {
        return Err(RekapError::EmptyInput);
    }
    validate(Vendor::Shopee, &REQUIRED_COLUMNS, &table.headers)?;

    let parser = ProductInfoParser::new()?;
    let mut rows = Vec::new();
    for (index, record) in table.records.iter().enumerate() {
        let before = rows.len();
        normalize_record(&parser, record, options, &mut rows);
        if rows.len() == before {
            tracing::warn!(row = index + 2, "shopee row has no parseable product_info");
        }
    }
    Ok(rows)
}

fn normalize_record(
    parser: &ProductInfoParser,
    record: &Record,
    options: NormalizeOptions,
    out: &mut Vec<NormalizedRow>,
) {
    let Some(blob) = record.get("product_info").and_then(CellValue::as_str) else {
        return;
    };
    let no_pesanan = text(record, "order_sn");
    let tracking_number = text(record, "tracking_number");
    let raw_date = text(record, "order_creation_date");
    let pesanan_dibuat = if options.shopee_normalize_dates && !raw_date.is_empty() {
        normalize_order_date(&raw_date)
    } else {
        raw_date
    };

    for entry in parser.entries(blob) {
        let (warna, size) = split_variation(entry.variation.as_deref());
        let sku = entry.sku.as_deref().unwrap_or_default().to_lowercase();
        let sku_varian = sku_varian([Some(sku.as_str()), warna.as_deref(), size.as_deref()]);
        out.push(NormalizedRow {
            no_pesanan: no_pesanan.clone(),
            tracking_number: tracking_number.clone(),
            pesanan_dibuat: pesanan_dibuat.clone(),
            sku_varian,
            sku,
            warna,
            size,
            variation: None,
            jumlah: entry.quantity.map(CellValue::Text).unwrap_or_default(),
        });
    }
}

fn text(record: &Record, column: &str) -> String {
    record.get(column).map(CellValue::to_text).unwrap_or_default()
}
