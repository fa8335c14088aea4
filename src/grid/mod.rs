pub mod grid2d;

pub use grid2d::{Grid2d, ObstructionGrid};
