/// The pixel grid being edited

use super::color::Color;

pub const MIN_SIZE: u32 = 4;
pub const MAX_SIZE: u32 = 64;
pub const DEFAULT_SIZE: u32 = 16;

/// Clamp a requested dimension into `[MIN_SIZE, MAX_SIZE]`
pub fn clamp_size(n: u32) -> u32 {
    n.clamp(MIN_SIZE, MAX_SIZE)
}

/// A `height` x `width` array of optional colors, rows top to bottom.
///
/// Every row always has exactly `width` cells and there are always exactly
/// `height` rows; the only way to change the shape is `resize`, which empties
/// every cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: u32,
    height: u32,
    rows: Vec<Vec<Option<Color>>>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        let width = clamp_size(width);
        let height = clamp_size(height);
        Self {
            width,
            height,
            rows: vec![vec![None; width as usize]; height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rows(&self) -> &[Vec<Option<Color>>] {
        &self.rows
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Grid::new(width, height);
    }

    pub fn clear(&mut self) {
        self.resize(self.width, self.height);
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Cell at (x, y); `None` for both empty and out-of-bounds cells
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.rows.get(y as usize)?.get(x as usize).copied().flatten()
    }

    /// Set or clear one cell. Returns `false` without touching anything when
    /// (x, y) lies outside the grid.
    pub fn set(&mut self, x: u32, y: u32, value: Option<Color>) -> bool {
        match self.rows.get_mut(y as usize).and_then(|r| r.get_mut(x as usize)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Colored cells in row-major order
    pub fn filled(&self) -> impl Iterator<Item = (u32, u32, Color)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(x, c)| c.map(|c| (x as u32, y as u32, c)))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.filled().next().is_none()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new(DEFAULT_SIZE, DEFAULT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_size_in_range_has_exact_shape() {
        for w in MIN_SIZE..=MAX_SIZE {
            for h in MIN_SIZE..=MAX_SIZE {
                let g = Grid::new(w, h);
                assert_eq!(g.rows().len(), h as usize);
                assert!(g.rows().iter().all(|r| r.len() == w as usize));
                assert!(g.is_empty());
            }
        }
    }

    #[test]
    fn out_of_range_sizes_are_clamped() {
        let g = Grid::new(0, 500);
        assert_eq!((g.width(), g.height()), (MIN_SIZE, MAX_SIZE));
    }

    #[test]
    fn resize_drops_content() {
        let mut g = Grid::new(8, 8);
        assert!(g.set(1, 1, Some(Color::default())));
        g.resize(8, 9);
        assert!(g.is_empty());
        assert_eq!(g.height(), 9);
    }

    #[test]
    fn set_outside_is_rejected() {
        let mut g = Grid::new(4, 4);
        assert!(!g.set(4, 0, Some(Color::default())));
        assert!(!g.set(0, 4, Some(Color::default())));
        assert!(g.is_empty());
    }
}
