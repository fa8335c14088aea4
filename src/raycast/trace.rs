use std::iter::FusedIterator;

use tracing::{debug, warn};

use crate::raycast::step::{LastCrossing, step_from};
use crate::raycast::utils::RoundingMode;
use crate::raycast::GridCrossing;
use crate::types::{DEFAULT_MAX_STEPS, Point, PointExt};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TraceOptions {
    /// Upper bound on the number of steps taken, and so on crossings produced.
    pub max_steps: usize,
    pub rounding: RoundingMode,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            rounding: RoundingMode::default(),
        }
    }
}

/// Lazy sequence of gridline crossings from an origin toward a target.
///
/// Every item lies on a gridline and is strictly farther from the origin than
/// the one before it. Iteration ends when the target is reached inside the
/// current cell, when a crossing lands exactly on the target, or after
/// `max_steps` items. Clone the iterator (or build a new one) to restart.
#[derive(Debug, Clone)]
pub struct GridTrace {
    origin: Point,
    target: Point,
    current: Point,
    /// Squared distance from `origin` of the last yielded crossing.
    reached: f64,
    last: LastCrossing,
    rounding: RoundingMode,
    remaining: usize,
    done: bool,
}

impl GridTrace {
    pub fn new(origin: Point, target: Point, options: &TraceOptions) -> Self {
        let finite = origin.is_finite_point() && target.is_finite_point();
        if !finite {
            warn!(?origin, ?target, "refusing to trace non-finite segment");
        }

        Self {
            origin,
            target,
            current: origin,
            reached: 0.0,
            last: LastCrossing::at(origin),
            rounding: options.rounding,
            remaining: options.max_steps,
            done: !finite || origin == target,
        }
    }
}

impl Iterator for GridTrace {
    type Item = GridCrossing;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while self.remaining > 0 {
            let Some(crossing) = step_from(self.current, self.target, self.last, self.rounding)
            else {
                self.done = true;
                return None;
            };

            self.remaining -= 1;
            self.current = crossing.point;
            self.last = crossing.kind.into();
            if crossing.point == self.target {
                self.done = true;
            }

            let distance = self.origin.distance_squared(crossing.point);
            if distance <= self.reached {
                debug!(
                    point = ?crossing.point,
                    origin = ?self.origin,
                    "skipping crossing that does not move away from origin"
                );
                if self.done {
                    return None;
                }
                continue;
            }

            self.reached = distance;
            return Some(crossing);
        }

        debug!(current = ?self.current, target = ?self.target, "trace hit step bound");
        self.done = true;
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, Some(self.remaining))
        }
    }
}

impl FusedIterator for GridTrace {}

/// Crossings from `origin` toward `target`, at most `max_steps` of them.
pub fn trace(origin: Point, target: Point, max_steps: usize) -> GridTrace {
    trace_with(
        origin,
        target,
        &TraceOptions {
            max_steps,
            ..Default::default()
        },
    )
}

pub fn trace_with(origin: Point, target: Point, options: &TraceOptions) -> GridTrace {
    GridTrace::new(origin, target, options)
}

/// Collected crossing points, in order, for callers that only draw them.
pub fn trace_points(origin: Point, target: Point, max_steps: usize) -> Vec<Point> {
    trace(origin, target, max_steps).map(|c| c.point).collect()
}
