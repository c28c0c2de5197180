//! Column-presence validation.
//!
//! Runs before any row is transformed: a file missing a required column is
//! rejected as a whole, with every missing name reported in the vendor's
//! declared order.

use crate::error::{RekapError, Result};
use crate::types::Vendor;

/// Required columns not present in `actual`, in `required` order.
pub fn missing_columns<S: AsRef<str>>(required: &[&str], actual: &[S]) -> Vec<String> {
    required
        .iter()
        .filter(|name| !actual.iter().any(|a| a.as_ref() == **name))
        .map(|name| name.to_string())
        .collect()
}

/// Fail with [`RekapError::MissingColumns`] unless every required column is
/// present.
pub fn validate<S: AsRef<str>>(vendor: Vendor, required: &[&str], actual: &[S]) -> Result<()> {
    let missing = missing_columns(required, actual);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(RekapError::MissingColumns { vendor, missing })
    }
}

/// Validate a grid header and resolve each required column to its index.
pub fn resolve_columns<const N: usize>(
    vendor: Vendor,
    required: &[&str; N],
    header: &[String],
) -> Result<[usize; N]> {
    validate(vendor, required, header)?;
    let mut indices = [0usize; N];
    for (slot, name) in indices.iter_mut().zip(required) {
        *slot = header
            .iter()
            .position(|h| h == name)
            .unwrap_or_default();
    }
    Ok(indices)
}
