//! Configuration types for rekap.
//!
//! [`Config::load`] layers the built-in defaults, an optional
//! `~/.config/rekap/config.toml` and `REKAP__*` environment variables.
//! [`Config::defaults`] returns the defaults without touching the filesystem
//! or the environment (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::normalizer::NormalizeOptions;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[server]
bind = "0.0.0.0:3000"

[upload]
dir           = "local"
local_dir     = "uploads"
max_files     = 10
max_file_size = 10485760

[shopee]
normalize_dates = true
"#;

const ENV_PREFIX: &str = "REKAP";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub shopee: ShopeeConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "0.0.0.0:3000".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

/// Where uploaded files are staged while a request is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadDir {
    /// A persistent folder (`upload.local_dir`), created on startup.
    Local,
    /// The system temp directory, for read-only or serverless deployments.
    Temp,
}

/// `[upload]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_upload_dir")]
    pub dir: UploadDir,
    #[serde(default = "default_local_dir")]
    pub local_dir: PathBuf,
    #[serde(default = "default_max_files")]
    pub max_files: usize,
    /// Per-file limit in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,
}

fn default_upload_dir() -> UploadDir { UploadDir::Local }
fn default_local_dir() -> PathBuf { PathBuf::from("uploads") }
fn default_max_files() -> usize { 10 }
fn default_max_file_size() -> usize { 10 * 1024 * 1024 }

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            local_dir: default_local_dir(),
            max_files: default_max_files(),
            max_file_size: default_max_file_size(),
        }
    }
}

impl UploadConfig {
    /// The directory uploads are written to.
    pub fn resolve_dir(&self) -> PathBuf {
        match self.dir {
            UploadDir::Local => self.local_dir.clone(),
            UploadDir::Temp => std::env::temp_dir(),
        }
    }
}

/// `[shopee]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopeeConfig {
    /// Rewrite `order_creation_date` to `YYYY-MM-DD`. When off the vendor
    /// text is passed through untouched.
    #[serde(default = "default_normalize_dates")]
    pub normalize_dates: bool,
}

fn default_normalize_dates() -> bool { true }

impl Default for ShopeeConfig {
    fn default() -> Self {
        Self { normalize_dates: default_normalize_dates() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/rekap/config.toml` (if present) and the
    /// environment, layered on top of the built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path())
    }

    /// Same as [`Config::load`] with an explicit config file path. A missing
    /// file is not an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            shopee_normalize_dates: self.shopee.normalize_dates,
        }
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("rekap")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
