//! # Configuration
//!
//! Paypage configuration is managed by [`confique`], which layers
//! environment variables over a TOML file over compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `PAYPAGE_VIEW_MODE`, `PAYPAGE_RAIL_WIDTH`, etc.
//! 2. **Config file**: `paypage.toml` in the data directory.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! A config file that is missing is fine. One that does not parse is
//! reported with a warning and the defaults are used instead.
//!
//! ## Available Settings
//!
//! | Key | Env | Default | Description |
//! |-----|-----|---------|-------------|
//! | `default_view_mode` | `PAYPAGE_VIEW_MODE` | `desktop` | View mode when none is requested |
//! | `rail_width` | `PAYPAGE_RAIL_WIDTH` | `320` | Rail width (px) for columns without a width hint |
//! | `image_placeholder` | `PAYPAGE_IMAGE_PLACEHOLDER` | placeholder URL | Shown for broken images |
//! | `tick_millis` | `PAYPAGE_TICK_MILLIS` | `1000` | Countdown tick period |

use std::path::Path;
use std::time::Duration;

use confique::Config;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{PaypageError, Result};
use crate::model::ViewMode;

pub const CONFIG_FILE: &str = "paypage.toml";
pub const DEFAULT_IMAGE_PLACEHOLDER: &str = "https://via.placeholder.com/300x200?text=Imagem";

/// Configuration for paypage, stored in `paypage.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PaypageConfig {
    /// "desktop" or "mobile"
    #[config(env = "PAYPAGE_VIEW_MODE", default = "desktop")]
    pub default_view_mode: String,

    /// Width in px of left/right rails whose column has no width hint.
    #[config(env = "PAYPAGE_RAIL_WIDTH", default = 320)]
    pub rail_width: u32,

    /// Substituted for image references that cannot be shown.
    #[config(
        env = "PAYPAGE_IMAGE_PLACEHOLDER",
        default = "https://via.placeholder.com/300x200?text=Imagem"
    )]
    pub image_placeholder: String,

    #[config(env = "PAYPAGE_TICK_MILLIS", default = 1000)]
    pub tick_millis: u64,
}

impl Default for PaypageConfig {
    fn default() -> Self {
        Self {
            default_view_mode: "desktop".to_string(),
            rail_width: 320,
            image_placeholder: DEFAULT_IMAGE_PLACEHOLDER.to_string(),
            tick_millis: 1000,
        }
    }
}

impl PaypageConfig {
    /// Load env + `paypage.toml` from `dir`, erroring on bad input.
    pub fn load_from(dir: &Path) -> Result<Self> {
        Self::builder()
            .env()
            .file(dir.join(CONFIG_FILE))
            .load()
            .map_err(|e| PaypageError::Config(e.to_string()))
    }

    /// Like [`load_from`](Self::load_from), but falls back to defaults.
    pub fn load_or_default(dir: &Path) -> Self {
        Self::load_from(dir).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring unreadable configuration");
            Self::default()
        })
    }

    /// Unknown values fall back to desktop.
    pub fn view_mode(&self) -> ViewMode {
        self.default_view_mode.parse().unwrap_or_else(|e: String| {
            warn!(error = %e, "unknown default_view_mode, using desktop");
            ViewMode::Desktop
        })
    }

    /// Never zero.
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }
}
