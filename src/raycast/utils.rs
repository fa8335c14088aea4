use serde::Deserialize;

/// How a coordinate is rounded to the next gridline when travelling toward
/// negative infinity.
///
/// Forward travel always rounds up with `ceil`. Backward travel uses `trunc`
/// in the reference behavior, which only agrees with `floor` for
/// non-negative coordinates.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    #[default]
    Truncate,
    Floor,
}

/// Next integer boundary ahead of travel along one axis. Returns `x` unchanged
/// when there is no travel along the axis.
#[inline]
pub fn directional_round(x: f64, dx: f64, mode: RoundingMode) -> f64 {
    if dx > 0.0 {
        x.ceil()
    } else if dx < 0.0 {
        match mode {
            RoundingMode::Truncate => x.trunc(),
            RoundingMode::Floor => x.floor(),
        }
    } else {
        x
    }
}

/// Next gridline strictly beyond a line that was just crossed.
#[inline]
pub fn step_past_line(x: f64, dx: f64) -> f64 {
    if dx > 0.0 {
        x.floor() + 1.0
    } else if dx < 0.0 {
        x.ceil() - 1.0
    } else {
        x
    }
}
