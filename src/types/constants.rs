pub const FREE: u8 = 0;
pub const WALL: u8 = 1;

/// Safety valve for a single trace. Well-formed rays on the reference grid
/// never need this many crossings.
pub const DEFAULT_MAX_STEPS: usize = 20;

pub const DEFAULT_CELL_SIZE_PX: u32 = 80;
pub const DEFAULT_SURFACE_PX: u32 = 800;
