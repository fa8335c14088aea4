use tracing::{trace, warn};

use crate::raycast::utils::{RoundingMode, directional_round, step_past_line};
use crate::raycast::{Crossing, GridCrossing};
use crate::types::Point;

/// Gridline(s) the current point was reached through.
///
/// On a tagged axis the current coordinate is a line that has already been
/// crossed, so the search on that axis starts at the line strictly beyond it.
/// [`step_from`] also treats every line the current point sits on as crossed
/// (see [`LastCrossing::at`]), so an untagged point on a gridline still moves
/// forward.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum LastCrossing {
    #[default]
    None,
    Vertical,
    Horizontal,
    Corner,
}

impl LastCrossing {
    /// Tag for an arbitrary starting point: every gridline it sits on counts
    /// as already crossed.
    pub fn at(point: Point) -> Self {
        Crossing::of(point).map(Self::from).unwrap_or_default()
    }

    /// Union of the lines crossed by both tags.
    pub fn merge(self, other: Self) -> Self {
        let vertical = self.crossed_vertical() || other.crossed_vertical();
        let horizontal = self.crossed_horizontal() || other.crossed_horizontal();
        match (vertical, horizontal) {
            (true, true) => Self::Corner,
            (true, false) => Self::Vertical,
            (false, true) => Self::Horizontal,
            (false, false) => Self::None,
        }
    }

    #[inline]
    fn crossed_vertical(self) -> bool {
        matches!(self, Self::Vertical | Self::Corner)
    }

    #[inline]
    fn crossed_horizontal(self) -> bool {
        matches!(self, Self::Horizontal | Self::Corner)
    }
}

impl From<Crossing> for LastCrossing {
    fn from(kind: Crossing) -> Self {
        match kind {
            Crossing::Vertical => Self::Vertical,
            Crossing::Horizontal => Self::Horizontal,
            Crossing::Corner => Self::Corner,
        }
    }
}

/// Relative tolerance under which the two axes reach their next lines at the
/// same fraction of the segment, making the crossing a corner.
const CORNER_TOLERANCE: f64 = 1e-12;

/// Next gridline on one axis, or `None` if there is no travel along it.
#[inline]
fn next_line(coord: f64, delta: f64, crossed: bool, rounding: RoundingMode) -> Option<f64> {
    if delta == 0.0 {
        None
    } else if crossed {
        Some(step_past_line(coord, delta))
    } else {
        Some(directional_round(coord, delta, rounding))
    }
}

/// Fraction of `delta` needed to reach `line` from `coord`.
#[inline]
fn fraction_to(line: Option<f64>, coord: f64, delta: f64) -> f64 {
    line.map_or(f64::INFINITY, |line| (line - coord) / delta)
}

#[inline]
fn is_corner(t_x: f64, t_y: f64) -> bool {
    t_x.is_finite() && t_y.is_finite() && (t_x - t_y).abs() <= CORNER_TOLERANCE * t_x.max(t_y)
}

/// Next gridline crossing on the segment from `current` toward `target`.
///
/// Returns `None` when the next crossing lies beyond `target`, i.e. the ray
/// reaches the target inside the current cell. A crossing exactly at `target`
/// is returned. `current == target` has no direction and returns `None`.
///
/// The crossing is the nearer of the next vertical and horizontal lines,
/// measured as a fraction of `target - current`. When both are reached at the
/// same fraction the exact lattice point is returned as [`Crossing::Corner`].
pub fn step_from(
    current: Point,
    target: Point,
    last: LastCrossing,
    rounding: RoundingMode,
) -> Option<GridCrossing> {
    if current == target {
        return None;
    }

    let last = last.merge(LastCrossing::at(current));
    let delta = target - current;
    let next_x = next_line(current.x, delta.x, last.crossed_vertical(), rounding);
    let next_y = next_line(current.y, delta.y, last.crossed_horizontal(), rounding);

    let t_x = fraction_to(next_x, current.x, delta.x);
    let t_y = fraction_to(next_y, current.y, delta.y);

    let next = match (next_x, next_y) {
        (Some(x_line), Some(y_line)) if is_corner(t_x, t_y) => Point::new(x_line, y_line),
        (Some(x_line), _) if t_x < t_y => Point::new(x_line, current.y + delta.y * t_x),
        (_, Some(y_line)) => Point::new(current.x + delta.x * t_y, y_line),
        (Some(x_line), None) => Point::new(x_line, current.y),
        (None, None) => return None,
    };

    if next == current {
        warn!(?current, ?last, "grid step made no progress");
        return None;
    }

    if current.distance_squared(next) > current.distance_squared(target) {
        trace!(?current, ?next, ?target, "next crossing lies beyond target");
        return None;
    }

    let kind = Crossing::of(next)?;
    trace!(?current, ?next, ?kind, "grid step");
    Some(GridCrossing { point: next, kind })
}

/// Next gridline crossing from `current` toward `target`, or `None` if the
/// target is reached first.
///
/// Gridlines `current` already sits on are treated as crossed, so calling
/// this again from a returned point never yields that point twice. Backward
/// travel uses [`RoundingMode::Truncate`].
pub fn step(current: Point, target: Point) -> Option<Point> {
    step_from(
        current,
        target,
        LastCrossing::at(current),
        RoundingMode::Truncate,
    )
    .map(|c| c.point)
}
