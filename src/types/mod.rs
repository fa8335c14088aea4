pub mod constants;
pub mod error;
pub mod geometry;
pub mod info;

pub use constants::*;
pub use error::GridError;
pub use geometry::{Point, PointExt, Segment};
pub use info::{GridExtent, Viewport};
