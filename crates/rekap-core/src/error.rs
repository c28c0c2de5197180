//! Error taxonomy for the decode → validate → normalize pipeline.
//!
//! Only structural problems are errors. A field that is present but has an
//! unexpected shape never raises; the normalizers degrade it to an empty or
//! pass-through value instead.

use thiserror::Error;

use crate::types::Vendor;

/// Message shown to users for any error that is not [`RekapError::is_user_facing`].
pub const GENERIC_MESSAGE: &str =
    "An error occurred while processing the file. Make sure the file format matches the selected marketplace.";

#[derive(Debug, Error)]
pub enum RekapError {
    #[error("The sheet is empty. Nothing to process.")]
    EmptyInput,

    #[error(
        "File format is incorrect. Missing required columns for {}: {}",
        .vendor.label(),
        .missing.join(", ")
    )]
    MissingColumns { vendor: Vendor, missing: Vec<String> },

    #[error("Invalid marketplace selected: {0}")]
    UnsupportedVendor(String),

    #[error("workbook contains no sheets")]
    NoSheets,

    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RekapError {
    /// Whether the error message is safe and useful to show verbatim.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            RekapError::EmptyInput
                | RekapError::MissingColumns { .. }
                | RekapError::UnsupportedVendor(_)
        )
    }

    /// Single-line message for the caller. Internal errors collapse to
    /// [`GENERIC_MESSAGE`]; the caller is expected to log the detail.
    pub fn user_message(&self) -> String {
        if self.is_user_facing() {
            self.to_string()
        } else {
            GENERIC_MESSAGE.to_string()
        }
    }
}

pub type Result<T> = std::result::Result<T, RekapError>;
