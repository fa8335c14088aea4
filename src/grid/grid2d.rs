use glam::UVec2;

use crate::types::{FREE, GridError, GridExtent, Point, PointExt, WALL};

/// Row-major cell storage over a fixed [`GridExtent`]. Cell `(x, y)` is column
/// `x` of row `y`.
#[derive(Debug, Clone)]
pub struct Grid2d<T> {
    extent: GridExtent,
    data: Vec<T>,
}

/// Static obstruction grid handed to the rendering side.
pub type ObstructionGrid = Grid2d<u8>;

impl<T> Grid2d<T> {
    pub fn new(extent: GridExtent, data: Vec<T>) -> Result<Self, GridError> {
        let expected_len = extent.cell_count();
        if data.len() != expected_len {
            return Err(GridError::InvalidScene(format!(
                "data length {} does not match grid size {}",
                data.len(),
                expected_len
            )));
        }

        Ok(Self { extent, data })
    }

    pub fn filled(extent: GridExtent, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            extent,
            data: vec![value; extent.cell_count()],
        }
    }

    pub fn extent(&self) -> &GridExtent {
        &self.extent
    }

    pub fn rows(&self) -> u32 {
        self.extent.rows
    }

    pub fn cols(&self) -> u32 {
        self.extent.cols
    }

    pub fn get(&self, pos: &UVec2) -> Option<&T> {
        if !self.extent.contains_cell(*pos) {
            return None;
        }
        let idx = self.index(pos);
        Some(&self.data[idx])
    }

    pub fn set(&mut self, pos: &UVec2, value: T) -> Result<(), GridError> {
        if !self.extent.contains_cell(*pos) {
            return Err(GridError::OutOfBounds(format!(
                "cell ({}, {}) out of bounds for grid {}x{}",
                pos.x, pos.y, self.extent.cols, self.extent.rows
            )));
        }
        let idx = self.index(pos);
        self.data[idx] = value;
        Ok(())
    }

    /// Cell containing `point`, if it lies inside the grid.
    pub fn cell_at(&self, point: Point) -> Option<UVec2> {
        let cell = point.cell();
        if cell.x < 0 || cell.y < 0 {
            return None;
        }
        let cell = cell.as_uvec2();
        self.extent.contains_cell(cell).then_some(cell)
    }

    fn index(&self, pos: &UVec2) -> usize {
        (pos.y as usize) * (self.extent.cols as usize) + (pos.x as usize)
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }
}

impl ObstructionGrid {
    pub fn empty(extent: GridExtent) -> Self {
        Self::filled(extent, FREE)
    }

    /// Out-of-bounds cells are not walls.
    pub fn is_wall(&self, pos: &UVec2) -> bool {
        self.get(pos).is_some_and(|v| *v == WALL)
    }

    pub fn wall_count(&self) -> usize {
        self.data.iter().filter(|v| **v == WALL).count()
    }
}
