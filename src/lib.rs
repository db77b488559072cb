//! Pixel Pantry
//!
//! A tiny pixel-art editor with a PNG rasterizer, a client for the gallery
//! store and (behind the `store` feature) the store itself.
//!
//! # Features
//!
//! - **Editor**: a 4..=64 square-cell grid with paint/erase and drag painting
//! - **Rendering**: grid to scaled, transparent-background PNG and data URL
//! - **Gallery client**: list, save, delete and fetch against the HTTP API
//! - **App controller**: all state behind a single `update(action)` function
//! - **Store** (default): axum + SQLite server for the same API
//!
//! # Example
//!
//! ```no_run
//! use pixel_pantry::{ClientConfig, editor::{Color, Editor}, gallery::GalleryClient};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut editor = Editor::new(16, 16);
//! editor.set_color("#00ff00".parse::<Color>()?);
//! editor.paint(3, 4);
//!
//! let client = GalleryClient::new(ClientConfig {
//!     base_url: "http://127.0.0.1:8000".to_string(),
//!     ..Default::default()
//! })?;
//! let raster = editor.rasterize(16)?;
//! let art = client.save(&raster.to_data_url(), editor.width(), editor.height())?;
//! println!("saved #{} at {}", art.id, art.url);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod app;
pub mod editor;
pub mod gallery;
pub mod rendering;
pub mod runtime;
pub mod script;

// Artwork Store server (axum + SQLite)
#[cfg(feature = "store")]
pub mod store;

pub use app::{Action, App, Effect};

/// Environment variable consulted by the CLI for the store base URL
pub const BASE_URL_ENV: &str = "PIXEL_PANTRY_BASE";

/// Configuration for the gallery client
///
/// # Examples
///
/// ```
/// let cfg = pixel_pantry::ClientConfig::default();
/// assert!(cfg.user_agent.starts_with("pixel-pantry/"));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host (optionally a path prefix) of the store
    pub base_url: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_ms: 30000,
            user_agent: concat!("pixel-pantry/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Check that `base_url` is an http(s) URL
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| Error::ConfigError(format!("base url {:?}: {}", self.base_url, e)))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(Error::ConfigError(format!("unsupported scheme {:?}", other))),
        }
    }
}
