//! # Data Directory
//!
//! Compositions and `paypage.toml` live together in one data directory.
//! [`initialize`] resolves it in this order:
//!
//! 1. `data_override` (the CLI's `--data`), used as-is.
//! 2. `PAYPAGE_DATA` environment variable. Tests use it to isolate state.
//! 3. The OS data directory from the `directories` crate, e.g.
//!    `~/.local/share/paypage` on Linux.
//!
//! The directory is created lazily by the first save.

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::debug;

use crate::api::PaypageApi;
use crate::config::PaypageConfig;
use crate::error::{PaypageError, Result};
use crate::store::fs::FileStore;

pub const DATA_ENV: &str = "PAYPAGE_DATA";

pub struct PaypageContext {
    pub api: PaypageApi<FileStore>,
    pub data_dir: PathBuf,
}

pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "paypage", "paypage")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| PaypageError::Config("could not determine a data directory".into()))
}

/// Build the file-backed API for the resolved data directory.
pub fn initialize(data_override: Option<PathBuf>) -> Result<PaypageContext> {
    let data_dir = resolve_data_dir(data_override)?;
    debug!(data_dir = %data_dir.display(), "initializing");
    let config = PaypageConfig::load_or_default(&data_dir);
    let store = FileStore::new(data_dir.clone());
    Ok(PaypageContext {
        api: PaypageApi::new(store, config),
        data_dir,
    })
}
