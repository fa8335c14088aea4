pub mod grid;
pub mod loaders;
pub mod raycast;
pub mod types;
pub mod visualization;

pub use grid::{Grid2d, ObstructionGrid};
pub use loaders::scene::{Scene, load_scene};
pub use raycast::{GridCrossing, GridTrace, TraceOptions, step, trace};
pub use types::{GridError, GridExtent, Point, Segment, Viewport};
