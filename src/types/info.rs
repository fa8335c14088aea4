//! Grid extent and screen mapping.

use glam::{DVec2, UVec2};

use crate::types::{DEFAULT_SURFACE_PX, Point};

/// Fixed extent of the obstruction grid. Only callers use it for bounds
/// checks; the step engine works on the unbounded lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridExtent {
    pub rows: u32,
    pub cols: u32,
}

impl GridExtent {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// True if the point lies inside `[0, cols] x [0, rows]`. Points on the
    /// outer boundary count as inside, since crossings land there.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x <= self.cols as f64
            && point.y <= self.rows as f64
    }

    #[inline]
    pub fn contains_cell(&self, cell: UVec2) -> bool {
        cell.x < self.cols && cell.y < self.rows
    }

    /// Size in grid units, `(cols, rows)`.
    #[inline]
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.cols as f64, self.rows as f64)
    }
}

/// Pixel surface showing a grid. Row 0 is at the top of the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width_px: u32,
    pub height_px: u32,
    pub extent: GridExtent,
}

impl Viewport {
    pub fn new(width_px: u32, height_px: u32, extent: GridExtent) -> Self {
        Self {
            width_px,
            height_px,
            extent,
        }
    }

    /// 800x800 surface.
    pub fn reference(extent: GridExtent) -> Self {
        Self::new(DEFAULT_SURFACE_PX, DEFAULT_SURFACE_PX, extent)
    }

    /// Viewport sized so every cell is `cell_size_px` pixels wide.
    pub fn with_cell_size(extent: GridExtent, cell_size_px: u32) -> Self {
        Self::new(extent.cols * cell_size_px, extent.rows * cell_size_px, extent)
    }

    /// Size of one cell in pixels along each axis.
    pub fn cell_size(&self) -> DVec2 {
        DVec2::new(self.width_px as f64, self.height_px as f64) / self.extent.size()
    }

    /// Pointer position in pixels to grid units.
    pub fn screen_to_grid(&self, px: f64, py: f64) -> Point {
        DVec2::new(px, py) / self.cell_size()
    }

    /// Grid units to pixels.
    pub fn grid_to_screen(&self, point: Point) -> DVec2 {
        point * self.cell_size()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn contains_includes_outer_boundary() {
        let extent = GridExtent::square(10);
        assert!(extent.contains(Point::new(0.0, 0.0)));
        assert!(extent.contains(Point::new(10.0, 10.0)));
        assert!(extent.contains(Point::new(5.5, 9.99)));
        assert!(!extent.contains(Point::new(-0.01, 5.0)));
        assert!(!extent.contains(Point::new(5.0, 10.01)));
        assert!(extent.contains_cell(UVec2::new(9, 9)));
        assert!(!extent.contains_cell(UVec2::new(10, 0)));
    }

    #[test]
    fn screen_to_grid_divides_by_cell_size() {
        let viewport = Viewport::reference(GridExtent::square(10));
        assert_relative_eq!(viewport.cell_size().x, 80.0);

        let p = viewport.screen_to_grid(440.0, 400.0);
        assert_relative_eq!(p.x, 5.5);
        assert_relative_eq!(p.y, 5.0);

        let back = viewport.grid_to_screen(p);
        assert_relative_eq!(back.x, 440.0);
        assert_relative_eq!(back.y, 400.0);
    }

    #[test]
    fn non_square_grid() {
        let viewport = Viewport::new(800, 400, GridExtent::new(4, 16));
        let size = viewport.cell_size();
        assert_relative_eq!(size.x, 50.0);
        assert_relative_eq!(size.y, 100.0);

        let viewport = Viewport::with_cell_size(GridExtent::new(3, 5), 20);
        assert_eq!((viewport.width_px, viewport.height_px), (100, 60));
    }
}
