/// Paint command list produced from a grid

use crate::editor::Grid;

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Fill the whole target with one color (transparent for a fresh canvas)
    Clear { rgba: [u8; 4] },
    SolidRect {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        rgba: [u8; 4],
    },
}

/// One `SolidRect` per colored cell, each `scale` pixels square, preceded by
/// a transparent clear. Empty cells emit nothing.
pub fn paint_commands(grid: &Grid, scale: u32) -> Vec<PaintCommand> {
    let mut cmds = vec![PaintCommand::Clear { rgba: [0, 0, 0, 0] }];
    cmds.extend(grid.filled().map(|(x, y, color)| PaintCommand::SolidRect {
        x: x.saturating_mul(scale),
        y: y.saturating_mul(scale),
        width: scale,
        height: scale,
        rgba: color.to_rgba(),
    }));
    cmds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Color;

    #[test]
    fn one_rect_per_colored_cell() {
        let mut g = Grid::new(4, 4);
        g.set(2, 3, Some(Color::rgb(1, 2, 3)));
        let cmds = paint_commands(&g, 8);
        assert_eq!(cmds.len(), 2);
        assert_eq!(
            cmds[1],
            PaintCommand::SolidRect { x: 16, y: 24, width: 8, height: 8, rgba: [1, 2, 3, 255] }
        );
    }
}
