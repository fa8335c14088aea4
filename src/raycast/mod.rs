use crate::types::{Point, PointExt};

pub mod step;
pub mod trace;
mod utils;

pub use step::{LastCrossing, step, step_from};
pub use trace::{GridTrace, TraceOptions, trace, trace_points, trace_with};
pub use utils::{RoundingMode, directional_round};

/// Which gridline(s) a crossing point lies on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Crossing {
    /// On a vertical line (`x` integral).
    Vertical,
    /// On a horizontal line (`y` integral).
    Horizontal,
    /// On both, at a lattice corner.
    Corner,
}

impl Crossing {
    /// Classify a point by exact integrality. `None` if it is on no gridline.
    pub fn of(point: Point) -> Option<Self> {
        match (point.is_on_vertical_line(), point.is_on_horizontal_line()) {
            (true, true) => Some(Self::Corner),
            (true, false) => Some(Self::Vertical),
            (false, true) => Some(Self::Horizontal),
            (false, false) => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridCrossing {
    /// Crossing point in grid units.
    pub point: Point,
    pub kind: Crossing,
}
