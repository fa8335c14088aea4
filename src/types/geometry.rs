//! Geometric types shared by the step engine, the traversal driver and the
//! collaborators that feed them.

use glam::{DVec2, IVec2};

use crate::raycast::{GridTrace, TraceOptions};
use crate::types::GridError;

/// A point (or vector) in grid units. Cell `(i, j)` covers `[i, i+1) x [j, j+1)`.
///
/// All vector arithmetic comes from `glam`: `+`, `-`, `* f64`, `* Point`
/// (componentwise), `/ Point`, `length`, `length_squared` and
/// `normalize_or_zero` (zero in, zero out).
pub type Point = DVec2;

/// Grid queries on [`Point`].
pub trait PointExt {
    /// `x` is integral, so the point sits on a vertical gridline.
    fn is_on_vertical_line(&self) -> bool;
    /// `y` is integral, so the point sits on a horizontal gridline.
    fn is_on_horizontal_line(&self) -> bool;
    fn is_on_grid_line(&self) -> bool {
        self.is_on_vertical_line() || self.is_on_horizontal_line()
    }
    /// Cell containing the point.
    fn cell(&self) -> IVec2;
    fn is_finite_point(&self) -> bool;
}

impl PointExt for Point {
    #[inline]
    fn is_on_vertical_line(&self) -> bool {
        self.x.fract() == 0.0
    }

    #[inline]
    fn is_on_horizontal_line(&self) -> bool {
        self.y.fract() == 0.0
    }

    #[inline]
    fn cell(&self) -> IVec2 {
        self.floor().as_ivec2()
    }

    #[inline]
    fn is_finite_point(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Directed segment being traced. Direction and remaining distance are always
/// derived from the two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    origin: Point,
    target: Point,
}

impl Segment {
    pub fn new(origin: Point, target: Point) -> Result<Self, GridError> {
        if !origin.is_finite_point() {
            return Err(GridError::NonFinite(format!("origin {origin}")));
        }
        if !target.is_finite_point() {
            return Err(GridError::NonFinite(format!("target {target}")));
        }
        Ok(Self { origin, target })
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn target(&self) -> Point {
        self.target
    }

    /// Unit direction from origin to target, zero for a degenerate segment.
    pub fn direction(&self) -> Point {
        (self.target - self.origin).normalize_or_zero()
    }

    pub fn length(&self) -> f64 {
        self.origin.distance(self.target)
    }

    pub fn is_degenerate(&self) -> bool {
        self.origin == self.target
    }

    /// Gridline crossings from origin toward target, at most `max_steps` of them.
    pub fn crossings(&self, max_steps: usize) -> GridTrace {
        self.crossings_with(&TraceOptions {
            max_steps,
            ..Default::default()
        })
    }

    pub fn crossings_with(&self, options: &TraceOptions) -> GridTrace {
        GridTrace::new(self.origin, self.target, options)
    }
}
