//! Mapping pointer positions on the display surface to board cells.

use strictly_gomoku::Coordinate;

/// Where the board grid sits on screen.
///
/// Positions are in display units (terminal columns and rows for the TUI).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    /// Left edge of cell `(0, 0)`.
    pub origin_x: u16,
    /// Top edge of cell `(0, 0)`.
    pub origin_y: u16,
    /// Width of one cell.
    pub cell_width: u16,
    /// Height of one cell.
    pub cell_height: u16,
    /// Board edge length.
    pub size: usize,
    /// First column past the drawn area.
    pub right: u16,
    /// First row past the drawn area.
    pub bottom: u16,
}

impl BoardGeometry {
    /// Geometry with every cell of the board visible.
    pub fn new(origin_x: u16, origin_y: u16, cell_width: u16, cell_height: u16, size: usize) -> Self {
        let cells = u16::try_from(size).unwrap_or(u16::MAX);
        Self {
            origin_x,
            origin_y,
            cell_width,
            cell_height,
            size,
            right: origin_x.saturating_add(cell_width.saturating_mul(cells)),
            bottom: origin_y.saturating_add(cell_height.saturating_mul(cells)),
        }
    }

    /// Limits resolution to cells drawn entirely before `right` and `bottom`.
    pub fn clip_to(self, right: u16, bottom: u16) -> Self {
        Self {
            right: self.right.min(right),
            bottom: self.bottom.min(bottom),
            ..self
        }
    }

    /// Resolves a pointer position to a cell. Positions off the grid, or on a
    /// cell cut off by the drawn area, give `None`.
    pub fn resolve(&self, x: u16, y: u16) -> Option<Coordinate> {
        if self.cell_width == 0 || self.cell_height == 0 {
            return None;
        }
        let dx = x.checked_sub(self.origin_x)?;
        let dy = y.checked_sub(self.origin_y)?;
        let col = dx / self.cell_width;
        let row = dy / self.cell_height;
        let cell_right = u32::from(self.origin_x) + (u32::from(col) + 1) * u32::from(self.cell_width);
        let cell_bottom =
            u32::from(self.origin_y) + (u32::from(row) + 1) * u32::from(self.cell_height);
        if cell_right > u32::from(self.right) || cell_bottom > u32::from(self.bottom) {
            return None;
        }
        let (row, col) = (usize::from(row), usize::from(col));
        (row < self.size && col < self.size).then(|| Coordinate::new(row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> BoardGeometry {
        BoardGeometry::new(4, 2, 3, 1, 15)
    }

    #[test]
    fn test_resolves_inside_grid() {
        let g = geometry();
        assert_eq!(g.resolve(4, 2), Some(Coordinate::new(0, 0)));
        assert_eq!(g.resolve(6, 2), Some(Coordinate::new(0, 0)));
        assert_eq!(g.resolve(7, 3), Some(Coordinate::new(1, 1)));
        assert_eq!(g.resolve(4 + 3 * 14 + 2, 2 + 14), Some(Coordinate::new(14, 14)));
    }

    #[test]
    fn test_outside_is_ignored() {
        let g = geometry();
        assert_eq!(g.resolve(3, 2), None);
        assert_eq!(g.resolve(4, 1), None);
        assert_eq!(g.resolve(4 + 3 * 15, 2), None);
        assert_eq!(g.resolve(4, 2 + 15), None);
    }

    #[test]
    fn test_clipped_cells_are_ignored() {
        // Only columns 0..=4 and rows 0..=2 fit on screen.
        let g = geometry().clip_to(4 + 3 * 5 + 2, 2 + 3);
        assert_eq!(g.resolve(4 + 3 * 4, 2), Some(Coordinate::new(0, 4)));
        assert_eq!(g.resolve(4 + 3 * 5, 2), None);
        assert_eq!(g.resolve(4 + 3 * 6, 2), None);
        assert_eq!(g.resolve(4, 2 + 2), Some(Coordinate::new(2, 0)));
        assert_eq!(g.resolve(4, 2 + 3), None);
    }
}
