pub mod scene;

pub use scene::{Scene, load_scene, parse_scene};
