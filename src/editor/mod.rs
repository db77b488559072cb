//! Grid editor: the canvas, the active color and the paint/erase toggle

pub mod color;
pub mod grid;

pub use color::Color;
pub use grid::{clamp_size, Grid, DEFAULT_SIZE, MAX_SIZE, MIN_SIZE};

use crate::rendering::{self, Raster};
use crate::Result;
use std::path::{Path, PathBuf};

/// Primary pointer button in a `buttons` bitmask
pub const PRIMARY_BUTTON: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    #[default]
    Paint,
    Erase,
}

#[derive(Debug, Clone, Default)]
pub struct Editor {
    grid: Grid,
    color: Color,
    mode: DrawMode,
}

impl Editor {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            grid: Grid::new(width, height),
            ..Default::default()
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_mode(&mut self, mode: DrawMode) {
        self.mode = mode;
    }

    /// Reinitialize to an empty `height` x `width` grid (clamped to 4..=64)
    pub fn resize(&mut self, width: u32, height: u32) {
        self.grid.resize(width, height);
    }

    pub fn set_width(&mut self, width: u32) {
        self.resize(width, self.height());
    }

    pub fn set_height(&mut self, height: u32) {
        self.resize(self.width(), height);
    }

    pub fn clear(&mut self) {
        self.grid.clear();
    }

    /// Apply the current mode at (x, y). Returns whether a cell was touched.
    pub fn paint(&mut self, x: u32, y: u32) -> bool {
        let value = match self.mode {
            DrawMode::Paint => Some(self.color),
            DrawMode::Erase => None,
        };
        self.grid.set(x, y, value)
    }

    pub fn pointer_down(&mut self, x: u32, y: u32) -> bool {
        self.paint(x, y)
    }

    /// Pointer moved into (x, y); paints only while just the primary button
    /// is held.
    pub fn pointer_enter(&mut self, x: u32, y: u32, buttons: u8) -> bool {
        buttons == PRIMARY_BUTTON && self.paint(x, y)
    }

    /// Paint along a path of cells, skipping any outside the grid. Returns
    /// the number of cells touched.
    pub fn drag_paint<I>(&mut self, cells: I) -> usize
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let mut cells = cells.into_iter();
        let Some((x, y)) = cells.next() else {
            return 0;
        };
        let mut touched = usize::from(self.pointer_down(x, y));
        for (x, y) in cells {
            touched += usize::from(self.pointer_enter(x, y, PRIMARY_BUTTON));
        }
        touched
    }

    pub fn rasterize(&self, scale: u32) -> Result<Raster> {
        rendering::rasterize(&self.grid, scale)
    }

    /// `pixel-{width}x{height}.png`
    pub fn download_filename(&self) -> String {
        format!("pixel-{}x{}.png", self.width(), self.height())
    }

    /// Write the default-scale PNG into `dir` and return its path
    pub fn export_download(&self, dir: &Path) -> Result<PathBuf> {
        let raster = self.rasterize(rendering::DEFAULT_SCALE)?;
        let path = dir.join(self.download_filename());
        std::fs::write(&path, &raster.png_data)?;
        log::info!("exported {}", path.display());
        Ok(path)
    }
}
