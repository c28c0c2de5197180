//! Normalizer. Turns a decoded vendor table into [`NormalizedRow`] values.
//!
//! Each vendor has an independent, state-free normalizer; [`normalize_file`]
//! picks the decode mode the vendor needs and dispatches on [`Vendor`].
//! Parsing is permissive: a malformed field degrades to an empty or raw
//! value, only missing columns and empty sheets are errors.

pub mod lazada;
pub mod shopee;
pub mod tiktok;

use std::path::Path;

use crate::error::Result;
use crate::reader;
use crate::types::{NormalizedRow, Vendor};

/// Vendor-specific switches taken from [`Config`](crate::config::Config).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Rewrite Shopee `order_creation_date` to `YYYY-MM-DD`.
    pub shopee_normalize_dates: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self { shopee_normalize_dates: true }
    }
}

/// Decode `path` the way `vendor` needs and normalize every row.
pub fn normalize_file(vendor: Vendor, path: &Path, options: NormalizeOptions) -> Result<Vec<NormalizedRow>> {
    let rows = match vendor {
        Vendor::Shopee => shopee::normalize(&reader::decode_records(path)?, options)?,
        Vendor::Lazada => lazada::normalize(&reader::decode_records(path)?)?,
        Vendor::TikTok => {
            tiktok::normalize(&reader::decode_grid(path, tiktok::DESCRIPTION_ROWS)?)?
        }
    };
    tracing::debug!(%vendor, path = %path.display(), rows = rows.len(), "normalized file");
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Shared field helpers
// ---------------------------------------------------------------------------

/// Build the composite variant key: non-empty parts joined with `_`, then
/// lowercased.
pub fn sku_varian<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    parts
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Text before the first space (the date half of a `date time` value).
pub(crate) fn date_part(raw: &str) -> &str {
    raw.split(' ').next().unwrap_or_default()
}

/// Rewrite `DD/MM/YYYY` to `YYYY-MM-DD`. `None` unless there are exactly
/// three `/`-separated parts.
pub(crate) fn dmy_to_iso(date: &str) -> Option<String> {
    let parts: Vec<&str> = date.split('/').collect();
    match parts.as_slice() {
        [day, month, year] => Some(format!("{year}-{month}-{day}")),
        _ => None,
    }
}

/// True for `YYYY-MM-DD`-shaped text: three `-` parts, the first four long.
pub(crate) fn is_iso_date(date: &str) -> bool {
    let parts: Vec<&str> = date.split('-').collect();
    parts.len() == 3 && parts[0].chars().count() == 4
}
