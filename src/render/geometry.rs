use ratatui::layout::Rect;

use crate::game::Cell;

/// Maps grid cells onto a drawing surface and back
///
/// Each cell is `surface.width / columns` by `surface.height / rows`
/// terminal cells, drawn at `(col * cell_width, row * cell_height)` from the
/// surface origin. Leftover space after the division stays blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGeometry {
    pub origin_x: u16,
    pub origin_y: u16,
    pub cell_width: u16,
    pub cell_height: u16,
    pub columns: usize,
    pub rows: usize,
}

impl CellGeometry {
    /// Returns None when the surface is too small to give every cell at least one terminal cell
    pub fn new(surface: Rect, columns: usize, rows: usize) -> Option<Self> {
        if columns == 0 || rows == 0 {
            return None;
        }

        let cell_width = (surface.width as usize / columns) as u16;
        let cell_height = (surface.height as usize / rows) as u16;
        if cell_width == 0 || cell_height == 0 {
            return None;
        }

        Some(Self {
            origin_x: surface.x,
            origin_y: surface.y,
            cell_width,
            cell_height,
            columns,
            rows,
        })
    }

    /// The area actually covered by the grid
    pub fn board_area(&self) -> Rect {
        Rect::new(
            self.origin_x,
            self.origin_y,
            self.cell_width * self.columns as u16,
            self.cell_height * self.rows as u16,
        )
    }

    /// On-screen rectangle of an in-grid cell
    pub fn cell_rect(&self, cell: Cell) -> Option<Rect> {
        if cell.col < 0
            || cell.row < 0
            || cell.col as usize >= self.columns
            || cell.row as usize >= self.rows
        {
            return None;
        }

        Some(Rect::new(
            self.origin_x + cell.col as u16 * self.cell_width,
            self.origin_y + cell.row as u16 * self.cell_height,
            self.cell_width,
            self.cell_height,
        ))
    }

    /// Grid coordinates under a screen point
    ///
    /// Points outside the board map to cells outside the grid, which is
    /// what pointer input needs to steer towards an edge.
    pub fn cell_at(&self, x: u16, y: u16) -> Cell {
        let dx = x as i32 - self.origin_x as i32;
        let dy = y as i32 - self.origin_y as i32;
        Cell::new(
            dx.div_euclid(self.cell_width as i32),
            dy.div_euclid(self.cell_height as i32),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_size_from_surface() {
        let geometry = CellGeometry::new(Rect::new(2, 1, 62, 31), 31, 31).unwrap();
        assert_eq!(geometry.cell_width, 2);
        assert_eq!(geometry.cell_height, 1);
        assert_eq!(geometry.board_area(), Rect::new(2, 1, 62, 31));
    }

    #[test]
    fn test_cell_rect_position() {
        let geometry = CellGeometry::new(Rect::new(10, 5, 54, 27), 27, 27).unwrap();
        assert_eq!(
            geometry.cell_rect(Cell::new(3, 4)),
            Some(Rect::new(16, 9, 2, 1))
        );
        assert_eq!(geometry.cell_rect(Cell::new(27, 0)), None);
        assert_eq!(geometry.cell_rect(Cell::new(-1, 0)), None);
    }

    #[test]
    fn test_surface_too_small() {
        assert!(CellGeometry::new(Rect::new(0, 0, 20, 40), 31, 31).is_none());
        assert!(CellGeometry::new(Rect::new(0, 0, 40, 20), 31, 31).is_none());
    }

    #[test]
    fn test_cell_at_inverts_cell_rect() {
        let geometry = CellGeometry::new(Rect::new(3, 2, 100, 40), 31, 31).unwrap();
        for cell in [Cell::new(0, 0), Cell::new(30, 30), Cell::new(12, 7)] {
            let rect = geometry.cell_rect(cell).unwrap();
            assert_eq!(geometry.cell_at(rect.x, rect.y), cell);
            assert_eq!(
                geometry.cell_at(rect.x + rect.width - 1, rect.y + rect.height - 1),
                cell
            );
        }
    }

    #[test]
    fn test_cell_at_outside_board() {
        let geometry = CellGeometry::new(Rect::new(4, 4, 10, 10), 5, 5).unwrap();
        assert_eq!(geometry.cell_at(0, 4), Cell::new(-2, 0));
        assert_eq!(geometry.cell_at(3, 3), Cell::new(-1, -1));
    }
}
