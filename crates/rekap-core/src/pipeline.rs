//! Decode → validate → normalize → assemble, for every file of one upload.
//!
//! Files are processed in order and the batch is all-or-nothing: the first
//! failing file aborts the whole call.

use std::path::Path;

use crate::assemble::Batch;
use crate::error::Result;
use crate::normalizer::{normalize_file, NormalizeOptions};
use crate::types::{AnnotatedRow, Vendor};

pub fn process_files<P: AsRef<Path>>(
    vendor: Vendor,
    account: &str,
    paths: &[P],
    options: NormalizeOptions,
) -> Result<Vec<AnnotatedRow>> {
    let mut batch = Batch::new(vendor, account);
    for path in paths {
        let path = path.as_ref();
        let span = tracing::info_span!("file", %vendor, path = %path.display());
        let _enter = span.enter();

        let rows = normalize_file(vendor, path, options)?;
        tracing::info!(rows = rows.len(), "file processed");
        batch.extend(rows);
    }
    tracing::info!(%vendor, files = paths.len(), rows = batch.len(), "batch assembled");
    Ok(batch.into_rows())
}
