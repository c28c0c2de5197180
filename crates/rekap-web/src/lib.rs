//! rekap-web — HTTP upload service for rekap.
//!
//! A single route, `POST /upload`, accepts order-export spreadsheets and
//! answers with the normalised rows as a JSON array (or `{ "message": … }`
//! on failure). All transformation logic lives in `rekap-core`.

pub mod error;
pub mod upload;

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use rekap_core::config::Config;
use std::path::PathBuf;
use std::sync::Arc;

/// Room for multipart boundaries and the text fields on top of the files.
const FORM_OVERHEAD: usize = 1024 * 1024;

/// Shared, read-only state for every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub upload_dir: PathBuf,
}

impl AppState {
    /// Build state from config, creating the upload directory if needed.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let upload_dir = config.upload.resolve_dir();
        Self::with_upload_dir(config, upload_dir)
    }

    pub fn with_upload_dir(config: Config, upload_dir: PathBuf) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&upload_dir)?;
        Ok(Self {
            config: Arc::new(config),
            upload_dir,
        })
    }
}

pub fn router(state: AppState) -> Router {
    let upload = &state.config.upload;
    let body_limit = upload
        .max_files
        .saturating_mul(upload.max_file_size)
        .saturating_add(FORM_OVERHEAD);

    Router::new()
        .route("/upload", post(upload::upload))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(state: AppState, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        upload_dir = %state.upload_dir.display(),
        "rekap upload service listening"
    );
    axum::serve(listener, router(state)).await?;
    Ok(())
}
