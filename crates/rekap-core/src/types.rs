//! Core types for rekap-core.
//!
//! This module defines the data structures shared across every layer: the
//! decoded [`CellValue`], the [`Vendor`] discriminant, the per-vendor
//! [`NormalizedRow`] and the metadata-stamped [`AnnotatedRow`] that leaves the
//! pipeline.

use serde::{Serialize, Serializer};
use std::str::FromStr;

use crate::error::RekapError;

/// A single spreadsheet cell after decoding.
///
/// Booleans and date-times are rendered to text by the reader; floats without
/// a fractional part are stored as [`CellValue::Int`] so order numbers and
/// quantities do not pick up a trailing `.0`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// True for [`CellValue::Empty`] and for empty text.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Borrow the text of a [`CellValue::Text`] cell. Numbers return `None`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render the cell as text. Empty cells render as `""`.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(x) => write!(f, "{x}"),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_none(),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Int(i) => serializer.serialize_i64(*i),
            CellValue::Float(f) => serializer.serialize_f64(*f),
        }
    }
}

/// Which marketplace produced an order export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Shopee,
    Lazada,
    TikTok,
}

impl Vendor {
    pub const ALL: [Vendor; 3] = [Vendor::Shopee, Vendor::Lazada, Vendor::TikTok];

    /// Human-readable name used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Vendor::Shopee => "Shopee",
            Vendor::Lazada => "Lazada",
            Vendor::TikTok => "TikTok",
        }
    }
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vendor::Shopee => write!(f, "shopee"),
            Vendor::Lazada => write!(f, "lazada"),
            Vendor::TikTok => write!(f, "tiktok"),
        }
    }
}

impl FromStr for Vendor {
    type Err = RekapError;

    /// Parse the selector sent by the upload form. Matching is exact apart
    /// from surrounding whitespace and ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shopee" => Ok(Vendor::Shopee),
            "lazada" => Ok(Vendor::Lazada),
            "tiktok" => Ok(Vendor::TikTok),
            _ => Err(RekapError::UnsupportedVendor(s.to_string())),
        }
    }
}

/// One order line in the canonical flat schema, as produced by a vendor
/// normalizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRow {
    /// Vendor order identifier.
    pub no_pesanan: String,
    /// Shipment tracking code.
    pub tracking_number: String,
    /// Order date, `YYYY-MM-DD` wherever the source could be understood.
    pub pesanan_dibuat: String,
    /// Lowercase `sku_warna_size` key; empty components are dropped together
    /// with their separator.
    #[serde(rename = "skuVarian")]
    pub sku_varian: String,
    pub sku: String,
    /// Colour token. Shopee yields `None` when the variation has no colour.
    pub warna: Option<String>,
    /// Size token. Shopee yields `None` when the variation has no size.
    pub size: Option<String>,
    /// Raw variation text, kept for audit. Lazada only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation: Option<String>,
    pub jumlah: CellValue,
}

/// A [`NormalizedRow`] stamped with marketplace and account metadata.
///
/// Field declaration order is the serialization order of the upload response
/// and of the CSV export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedRow {
    pub no_pesanan: String,
    #[serde(rename = "Marketplace")]
    pub marketplace: Vendor,
    #[serde(rename = "Account")]
    pub account: String,
    pub tracking_number: String,
    pub pesanan_dibuat: String,
    #[serde(rename = "skuVarian")]
    pub sku_varian: String,
    pub sku: String,
    pub warna: Option<String>,
    pub size: Option<String>,
    pub jumlah: CellValue,
}

impl AnnotatedRow {
    pub fn new(marketplace: Vendor, account: &str, row: NormalizedRow) -> Self {
        Self {
            no_pesanan: row.no_pesanan,
            marketplace,
            account: account.to_string(),
            tracking_number: row.tracking_number,
            pesanan_dibuat: row.pesanan_dibuat,
            sku_varian: row.sku_varian,
            sku: row.sku,
            warna: row.warna,
            size: row.size,
            jumlah: row.jumlah,
        }
    }
}
