//! rekap-core — marketplace order-export normalisation.
//!
//! This crate holds the whole transformation; the upload service and the
//! CLI are thin shells around [`pipeline::process_files`].
//!
//! # Architecture
//!
//! ```text
//! reader ──► validate ──► normalizer::{shopee, lazada, tiktok} ──► assemble ──► export
//! ```
//!
//! Every stage is synchronous and stateless. A decoded table lives only as
//! long as the call that normalizes it.

pub mod assemble;
pub mod config;
pub mod error;
pub mod export;
pub mod normalizer;
pub mod pipeline;
pub mod reader;
pub mod types;
pub mod validate;

pub use error::{RekapError, Result};
pub use normalizer::NormalizeOptions;
pub use types::{AnnotatedRow, CellValue, NormalizedRow, Vendor};
