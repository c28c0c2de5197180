//! Domain-specific assertion macros for rekap harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that say which
//! row-shape rule was broken and on which row.

// ---------------------------------------------------------------------------
// Row shape
// ---------------------------------------------------------------------------

/// Assert that a row's `skuVarian` is lowercase, has no doubled or edge
/// underscores, and starts with the row's SKU when the SKU is non-empty.
///
/// ```rust
/// assert_sku_varian_shape!(row);
/// ```
#[macro_export]
macro_rules! assert_sku_varian_shape {
    ($row:expr) => {{
        let row: &rekap_core::NormalizedRow = &$row;
        let key = row.sku_varian.as_str();
        if key != key.to_lowercase() {
            panic!("assert_sku_varian_shape! failed: {:?} is not lowercase\n  row: {:?}", key, row);
        }
        if key.contains("__") || key.starts_with('_') || key.ends_with('_') {
            panic!(
                "assert_sku_varian_shape! failed: {:?} has an empty component\n  row: {:?}",
                key, row
            );
        }
        if !row.sku.is_empty() && !key.starts_with(&row.sku.to_lowercase()) {
            panic!(
                "assert_sku_varian_shape! failed: {:?} does not start with sku {:?}",
                key, row.sku
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Assert that a result failed with `MissingColumns` for `vendor`, listing
/// exactly `missing` in order.
///
/// ```rust
/// assert_missing_columns!(result, Vendor::Lazada, ["createTime", "variation"]);
/// ```
#[macro_export]
macro_rules! assert_missing_columns {
    ($result:expr, $vendor:expr, [$($column:expr),* $(,)?]) => {{
        let expected_missing: Vec<String> = vec![$($column.to_string()),*];
        match $result {
            Err(rekap_core::RekapError::MissingColumns { vendor, missing }) => {
                pretty_assertions::assert_eq!(vendor, $vendor);
                pretty_assertions::assert_eq!(missing, expected_missing);
            }
            Err(other) => panic!(
                "assert_missing_columns! failed: expected MissingColumns, got error {:?}",
                other
            ),
            Ok(rows) => panic!(
                "assert_missing_columns! failed: expected MissingColumns, got {} rows",
                rows.len()
            ),
        }
    }};
}

/// Assert that a result failed with `EmptyInput`.
#[macro_export]
macro_rules! assert_empty_input {
    ($result:expr) => {{
        match $result {
            Err(rekap_core::RekapError::EmptyInput) => {}
            Err(other) => panic!("assert_empty_input! failed: got error {:?}", other),
            Ok(value) => panic!("assert_empty_input! failed: got Ok({:?})", value),
        }
    }};
}
