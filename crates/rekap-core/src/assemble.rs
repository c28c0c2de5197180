//! Row assembler. Merges normalizer output from several files and stamps
//! each row with marketplace and account metadata.

use crate::types::{AnnotatedRow, NormalizedRow, Vendor};

/// Stamp every row with `vendor` and `account`, preserving order.
pub fn assemble(vendor: Vendor, account: &str, rows: Vec<NormalizedRow>) -> Vec<AnnotatedRow> {
    rows.into_iter()
        .map(|row| AnnotatedRow::new(vendor, account, row))
        .collect()
}

/// Accumulates annotated rows across the files of one upload, in upload
/// order.
#[derive(Debug, Clone)]
pub struct Batch {
    vendor: Vendor,
    account: String,
    rows: Vec<AnnotatedRow>,
}

impl Batch {
    pub fn new(vendor: Vendor, account: impl Into<String>) -> Self {
        Self {
            vendor,
            account: account.into(),
            rows: Vec::new(),
        }
    }

    /// Append the rows normalized from one file.
    pub fn extend(&mut self, rows: Vec<NormalizedRow>) {
        self.rows.extend(assemble(self.vendor, &self.account, rows));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<AnnotatedRow> {
        self.rows
    }
}
