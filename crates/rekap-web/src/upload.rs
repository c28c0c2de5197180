//! `POST /upload`: multipart spreadsheet upload.
//!
//! Form fields: one or more `file` parts, `marketplace` and `account`.
//! Accepted files are staged as scoped temp files in the configured upload
//! directory and removed when the request finishes, whatever the outcome.

use axum::extract::{Multipart, State};
use axum::Json;
use rekap_core::pipeline::process_files;
use rekap_core::{AnnotatedRow, Vendor};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::UploadError;
use crate::AppState;

const ALLOWED_MIME_TYPES: [&str; 2] = [
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
];

const DEFAULT_EXTENSION: &str = ".xlsx";

/// Whether a part is a spreadsheet, judged by MIME type or `.xlsx` name.
pub fn is_spreadsheet(file_name: &str, content_type: Option<&str>) -> bool {
    content_type.is_some_and(|mime| ALLOWED_MIME_TYPES.contains(&mime))
        || file_name.to_ascii_lowercase().ends_with(".xlsx")
}

pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<AnnotatedRow>>, UploadError> {
    let limits = &state.config.upload;
    let mut marketplace = String::new();
    let mut account = String::new();
    let mut files: Vec<NamedTempFile> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "marketplace" => marketplace = field.text().await?,
            "account" => account = field.text().await?,
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                if !is_spreadsheet(&file_name, field.content_type()) {
                    return Err(UploadError::UnsupportedFileType(file_name));
                }
                if files.len() >= limits.max_files {
                    return Err(UploadError::TooManyFiles(limits.max_files));
                }
                let bytes = field.bytes().await?;
                if bytes.len() > limits.max_file_size {
                    return Err(UploadError::FileTooLarge {
                        name: file_name,
                        limit: limits.max_file_size,
                    });
                }
                files.push(stage(&state.upload_dir, &file_name, &bytes)?);
            }
            _ => {}
        }
    }

    if files.is_empty() {
        return Err(UploadError::NoFiles);
    }
    let vendor: Vendor = marketplace.parse()?;
    let options = state.config.normalize_options();
    tracing::info!(%vendor, %account, files = files.len(), "processing upload");

    let rows = tokio::task::spawn_blocking(move || {
        let paths: Vec<&Path> = files.iter().map(NamedTempFile::path).collect();
        process_files(vendor, &account, &paths, options)
    })
    .await??;

    Ok(Json(rows))
}

/// Write one uploaded file into `dir`, keeping its extension so the
/// workbook format can be detected.
fn stage(dir: &Path, file_name: &str, bytes: &[u8]) -> std::io::Result<NamedTempFile> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    let mut file = tempfile::Builder::new()
        .prefix("file-")
        .suffix(&extension)
        .tempfile_in(dir)?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}
