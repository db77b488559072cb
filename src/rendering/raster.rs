/// Rasterizer: paint commands into an RGBA buffer, then PNG

use super::paint::{paint_commands, PaintCommand};
use super::Raster;
use crate::editor::Grid;
use crate::{Error, Result};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Export scale used by download and save
pub const DEFAULT_SCALE: u32 = 16;

/// Largest output side in pixels
pub const MAX_DIMENSION: u32 = 16_384;

/// Rasterize `grid` so each cell becomes a `scale` x `scale` block.
pub fn rasterize(grid: &Grid, scale: u32) -> Result<Raster> {
    let pixels = render_pixels(grid, scale)?;
    let (width, height) = pixels.dimensions();

    let mut png_data = Vec::new();
    pixels
        .write_to(&mut Cursor::new(&mut png_data), ImageFormat::Png)
        .map_err(|e| Error::RenderError(format!("PNG encoding failed: {}", e)))?;

    log::debug!("rasterized {}x{} grid at scale {} ({} bytes)", grid.width(), grid.height(), scale, png_data.len());
    Ok(Raster { width, height, png_data })
}

/// Same as `rasterize` but stops before PNG encoding
pub fn render_pixels(grid: &Grid, scale: u32) -> Result<RgbaImage> {
    if scale == 0 {
        return Err(Error::RenderError("scale must be at least 1".into()));
    }
    let (width, height) = output_size(grid, scale)?;
    let mut img = RgbaImage::new(width, height);

    for cmd in paint_commands(grid, scale) {
        match cmd {
            PaintCommand::Clear { rgba } => {
                for p in img.pixels_mut() {
                    *p = Rgba(rgba);
                }
            }
            PaintCommand::SolidRect { x, y, width: w, height: h, rgba } => {
                for py in y..y.saturating_add(h).min(height) {
                    for px in x..x.saturating_add(w).min(width) {
                        img.put_pixel(px, py, Rgba(rgba));
                    }
                }
            }
        }
    }
    Ok(img)
}

/// Pixel size of `grid` at `scale`, rejecting anything past `MAX_DIMENSION`
fn output_size(grid: &Grid, scale: u32) -> Result<(u32, u32)> {
    let side = |cells: u32| {
        cells
            .checked_mul(scale)
            .filter(|&px| px <= MAX_DIMENSION)
            .ok_or_else(|| {
                Error::RenderError(format!(
                    "scale {} gives an image larger than {}px per side",
                    scale, MAX_DIMENSION
                ))
            })
    };
    Ok((side(grid.width())?, side(grid.height())?))
}
