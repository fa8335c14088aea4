use std::path::Path;

use glam::UVec2;
use serde::Deserialize;

use crate::grid::ObstructionGrid;
use crate::raycast::{GridTrace, RoundingMode, TraceOptions};
use crate::types::{
    DEFAULT_CELL_SIZE_PX, DEFAULT_MAX_STEPS, FREE, GridError, GridExtent, Point, Segment,
    Viewport, WALL,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneFile {
    rows: u32,
    cols: u32,
    #[serde(
        default = "default_cell_size_px",
        deserialize_with = "deserialize_cell_size"
    )]
    cell_size_px: u32,
    origin: Point,
    target: Point,
    #[serde(default = "default_max_steps")]
    max_steps: usize,
    #[serde(default)]
    rounding: RoundingMode,
    #[serde(default)]
    walls: Vec<String>,
}

fn default_cell_size_px() -> u32 {
    DEFAULT_CELL_SIZE_PX
}

fn default_max_steps() -> usize {
    DEFAULT_MAX_STEPS
}

fn deserialize_cell_size<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = u32::deserialize(deserializer)?;
    if value > 0 {
        Ok(value)
    } else {
        Err(serde::de::Error::custom("cell_size_px must be positive"))
    }
}

/// Everything the rendering side needs for one trace: the obstruction grid,
/// the pixel surface it is drawn on, and the segment to trace.
#[derive(Debug, Clone)]
pub struct Scene {
    pub grid: ObstructionGrid,
    pub viewport: Viewport,
    pub segment: Segment,
    pub options: TraceOptions,
}

impl Scene {
    pub fn trace(&self) -> GridTrace {
        self.segment.crossings_with(&self.options)
    }
}

pub fn load_scene(yaml_path: impl AsRef<Path>) -> Result<Scene, GridError> {
    let yaml_str = std::fs::read_to_string(yaml_path.as_ref())?;
    parse_scene(&yaml_str)
}

pub fn parse_scene(yaml_str: &str) -> Result<Scene, GridError> {
    let file: SceneFile = serde_yaml::from_str(yaml_str)?;

    let extent = GridExtent::new(file.rows, file.cols);
    if extent.is_empty() {
        return Err(GridError::InvalidScene(format!(
            "grid extent must be non-empty, got {}x{}",
            file.cols, file.rows
        )));
    }

    let grid = parse_walls(extent, &file.walls)?;
    let segment = Segment::new(file.origin, file.target)?;

    Ok(Scene {
        grid,
        viewport: Viewport::with_cell_size(extent, file.cell_size_px),
        segment,
        options: TraceOptions {
            max_steps: file.max_steps,
            rounding: file.rounding,
        },
    })
}

/// One string per row, top row first. `#` is a wall, `.` is free space.
fn parse_walls(extent: GridExtent, rows: &[String]) -> Result<ObstructionGrid, GridError> {
    let mut grid = ObstructionGrid::empty(extent);
    if rows.is_empty() {
        return Ok(grid);
    }

    if rows.len() != extent.rows as usize {
        return Err(GridError::InvalidScene(format!(
            "expected {} wall rows, found {}",
            extent.rows,
            rows.len()
        )));
    }

    for (y, row) in rows.iter().enumerate() {
        let width = row.chars().count();
        if width != extent.cols as usize {
            return Err(GridError::InvalidScene(format!(
                "wall row {y} has {width} cells, expected {}",
                extent.cols
            )));
        }

        for (x, ch) in row.chars().enumerate() {
            let value = match ch {
                '#' => WALL,
                '.' => FREE,
                other => {
                    return Err(GridError::InvalidScene(format!(
                        "unknown wall cell {other:?} at ({x}, {y})"
                    )));
                }
            };
            grid.set(&UVec2::new(x as u32, y as u32), value)?;
        }
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "
rows: 10
cols: 10
origin: [5.5, 5.5]
target: [8.5, 5.51]
";

    #[test]
    fn defaults_apply() {
        let scene = parse_scene(MINIMAL).expect("scene should parse");
        assert_eq!(scene.options.max_steps, DEFAULT_MAX_STEPS);
        assert_eq!(scene.options.rounding, RoundingMode::Truncate);
        assert_eq!(scene.viewport.width_px, 800);
        assert_eq!(scene.grid.wall_count(), 0);
        assert_eq!(scene.segment.origin(), Point::new(5.5, 5.5));
        assert_eq!(scene.trace().count(), 3);
    }

    #[test]
    fn parses_walls_top_row_first() {
        let yaml = "
rows: 2
cols: 3
origin: [0.5, 0.5]
target: [2.5, 1.5]
rounding: floor
walls:
  - '#..'
  - '..#'
";
        let scene = parse_scene(yaml).expect("scene should parse");
        assert_eq!(scene.options.rounding, RoundingMode::Floor);
        assert!(scene.grid.is_wall(&UVec2::new(0, 0)));
        assert!(scene.grid.is_wall(&UVec2::new(2, 1)));
        assert_eq!(scene.grid.wall_count(), 2);
    }

    #[test]
    fn rejects_bad_walls() {
        let short_row = "
rows: 2
cols: 3
origin: [0.5, 0.5]
target: [2.5, 1.5]
walls: ['#..', '..']
";
        assert!(matches!(
            parse_scene(short_row),
            Err(GridError::InvalidScene(_))
        ));

        let bad_char = "
rows: 1
cols: 2
origin: [0.5, 0.5]
target: [1.5, 0.5]
walls: ['#x']
";
        assert!(matches!(parse_scene(bad_char), Err(GridError::InvalidScene(_))));
    }

    #[test]
    fn rejects_empty_extent_and_zero_cell_size() {
        let empty = "
rows: 0
cols: 4
origin: [0.5, 0.5]
target: [1.5, 0.5]
";
        assert!(matches!(parse_scene(empty), Err(GridError::InvalidScene(_))));

        let zero_cell = "
rows: 4
cols: 4
cell_size_px: 0
origin: [0.5, 0.5]
target: [1.5, 0.5]
";
        assert!(matches!(parse_scene(zero_cell), Err(GridError::Yaml(_))));
    }

    #[test]
    fn rejects_non_finite_points() {
        let yaml = "
rows: 4
cols: 4
origin: [.nan, 0.5]
target: [1.5, 0.5]
";
        assert!(matches!(parse_scene(yaml), Err(GridError::NonFinite(_))));
    }

    #[test]
    fn zero_max_steps_is_an_empty_trace() {
        let yaml = format!("{MINIMAL}max_steps: 0\n");
        let scene = parse_scene(&yaml).expect("scene should parse");
        assert_eq!(scene.trace().count(), 0);
    }
}
