//! Rendering: grid to paint commands to PNG

pub mod paint;
pub mod raster;

pub use raster::{rasterize, DEFAULT_SCALE};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// A rasterized grid: PNG bytes plus their pixel dimensions
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl Raster {
    /// `data:image/png;base64,...` form used by the upload endpoint
    pub fn to_data_url(&self) -> String {
        format!("{}{}", PNG_DATA_URL_PREFIX, STANDARD.encode(&self.png_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_carries_png_prefix() {
        let r = Raster { width: 1, height: 1, png_data: vec![1, 2, 3] };
        assert_eq!(r.to_data_url(), "data:image/png;base64,AQID");
    }
}
