//! Lazada order export.
//!
//! One sheet row is one order line. `sellerSku` carries the product code and
//! colour (`BARBIE 533-BIRU TOSCA`) and `variation` the size
//! (`Family Color: Blue, Size: 36`). Some shops encode the size in the SKU
//! instead (`BARBIE 533-BIRU-UE: 21`); the two layouts are told apart by the
//! number of `-` segments.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};

use super::{date_part, sku_varian};
use crate::error::{RekapError, Result};
use crate::reader::{Record, RecordTable};
use crate::types::{CellValue, NormalizedRow, Vendor};
use crate::validate::validate;

pub const REQUIRED_COLUMNS: [&str; 5] = [
    "trackingCode",
    "orderNumber",
    "createTime",
    "sellerSku",
    "variation",
];

/// Prefix in front of the size in the three-segment SKU layout.
const SIZE_PREFIX: &str = "UE:";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d %b %Y"];

/// Largest Excel serial day number (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// `sellerSku` split into its components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerSku {
    pub sku: String,
    pub warna: String,
    /// Only set by the three-segment layout.
    pub size: Option<String>,
}

/// Split a seller SKU by segment count:
///
/// * exactly three (`SKU-COLOR-UE:SIZE`): the colour is the first word of the
///   middle segment and the size comes from the last one;
/// * two or more otherwise: segment 0 is the SKU, segment 1 the colour;
/// * fewer: the raw value is the SKU, as is.
pub fn split_seller_sku(raw: &str) -> SellerSku {
    let segments: Vec<&str> = raw.split('-').collect();
    match segments.as_slice() {
        [sku, color, size] => SellerSku {
            sku: sku.trim().to_lowercase(),
            warna: color
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_lowercase(),
            size: Some(strip_size_prefix(size)).filter(|s| !s.is_empty()),
        },
        [sku, color, ..] => SellerSku {
            sku: sku.trim().to_lowercase(),
            warna: color.trim().to_lowercase(),
            size: None,
        },
        _ => SellerSku {
            sku: raw.to_string(),
            warna: String::new(),
            size: None,
        },
    }
}

fn strip_size_prefix(segment: &str) -> String {
    let segment = segment.trim();
    segment
        .strip_prefix(SIZE_PREFIX)
        .unwrap_or(segment)
        .trim()
        .to_string()
}

/// Size from variation text: whatever follows the last `:`, trimmed.
pub fn size_from_variation(variation: &str) -> String {
    variation
        .rsplit(':')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Parse a Lazada `createTime` text as a calendar date.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        })
}

/// Day number → date, using the 1900 date system.
fn excel_serial_date(serial: f64) -> Option<NaiveDate> {
    if !(1.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(serial.floor() as u64))
}

/// `createTime` as `YYYY-MM-DD` when it can be read as a date, otherwise the
/// raw text up to the first space.
pub fn normalize_create_time(cell: Option<&CellValue>) -> String {
    let iso = |date: NaiveDate| date.format("%Y-%m-%d").to_string();
    match cell {
        None | Some(CellValue::Empty) => String::new(),
        Some(CellValue::Int(n)) => excel_serial_date(*n as f64)
            .map(iso)
            .unwrap_or_else(|| n.to_string()),
        Some(CellValue::Float(f)) => excel_serial_date(*f)
            .map(iso)
            .unwrap_or_else(|| f.to_string()),
        Some(CellValue::Text(s)) => parse_calendar_date(s)
            .map(iso)
            .unwrap_or_else(|| date_part(s).to_string()),
    }
}

/// Normalize a Lazada record table. Every record yields exactly one row.
pub fn normalize(table: &RecordTable) -> Result<Vec<NormalizedRow>> {
    if table.is_empty() {
        return Err(RekapError::EmptyInput);
    }
    validate(Vendor::Lazada, &REQUIRED_COLUMNS, &table.headers)?;
    Ok(table.records.iter().map(normalize_record).collect())
}

fn normalize_record(record: &Record) -> NormalizedRow {
    let seller_sku = text(record, "sellerSku");
    let variation = text(record, "variation");

    let SellerSku { sku, warna, size } = split_seller_sku(&seller_sku);
    let size = size.unwrap_or_else(|| size_from_variation(&variation));
    let sku_varian = sku_varian([Some(sku.as_str()), Some(warna.as_str()), Some(size.as_str())]);

    NormalizedRow {
        no_pesanan: text(record, "orderNumber"),
        tracking_number: text(record, "trackingCode"),
        pesanan_dibuat: normalize_create_time(record.get("createTime")),
        sku_varian,
        sku,
        warna: Some(warna),
        size: Some(size),
        variation: Some(variation),
        jumlah: CellValue::Int(1),
    }
}

fn text(record: &Record, column: &str) -> String {
    record.get(column).map(CellValue::to_text).unwrap_or_default()
}
