//! Upload errors and their mapping to `{ "message": … }` responses.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rekap_core::error::GENERIC_MESSAGE;
use rekap_core::RekapError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No files uploaded.")]
    NoFiles,

    #[error("Only .xlsx files are allowed: {0}")]
    UnsupportedFileType(String),

    #[error("Too many files: at most {0} per upload")]
    TooManyFiles(usize),

    #[error("File {name} is larger than {limit} bytes")]
    FileTooLarge { name: String, limit: usize },

    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Processing(#[from] RekapError),

    #[error("failed to stage upload: {0}")]
    Io(#[from] std::io::Error),

    #[error("processing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl UploadError {
    pub fn status(&self) -> StatusCode {
        match self {
            UploadError::NoFiles
            | UploadError::UnsupportedFileType(_)
            | UploadError::TooManyFiles(_)
            | UploadError::FileTooLarge { .. }
            | UploadError::Multipart(_) => StatusCode::BAD_REQUEST,
            UploadError::Processing(_) | UploadError::Io(_) | UploadError::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message returned to the client. Internal failures are logged in full
    /// and reported generically.
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Processing(err) => {
                if !err.is_user_facing() {
                    tracing::error!(error = %err, "processing error");
                }
                err.user_message()
            }
            UploadError::Io(_) | UploadError::Task(_) => {
                tracing::error!(error = %self, "upload error");
                GENERIC_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            message: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}
