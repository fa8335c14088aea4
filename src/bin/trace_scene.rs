use std::error::Error;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use grid_march::visualization::render_trace;
use grid_march::{GridCrossing, Segment, load_scene};

const USAGE: &str = "usage: trace_scene <scene.yaml> [out.png] [pointer_px,pointer_py]";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let Args {
        yaml_path,
        out_path,
        pointer,
    } = parse_args(std::env::args().skip(1))?;

    let mut scene = load_scene(&yaml_path)?;
    if let Some((px, py)) = pointer {
        let target = scene.viewport.screen_to_grid(px, py);
        info!(px, py, ?target, "target taken from pointer position");
        scene.segment = Segment::new(scene.segment.origin(), target)?;
    }

    let extent = *scene.grid.extent();
    for endpoint in [scene.segment.origin(), scene.segment.target()] {
        if !extent.contains(endpoint) {
            warn!(?endpoint, rows = extent.rows, cols = extent.cols, "endpoint outside grid");
        }
    }

    let crossings: Vec<GridCrossing> = scene.trace().collect();
    info!(
        origin = ?scene.segment.origin(),
        target = ?scene.segment.target(),
        count = crossings.len(),
        max_steps = scene.options.max_steps,
        "traced segment"
    );
    for (i, crossing) in crossings.iter().enumerate() {
        info!(
            step = i,
            x = crossing.point.x,
            y = crossing.point.y,
            kind = ?crossing.kind,
            "crossing"
        );
    }

    if let Some(out_path) = out_path {
        let img = render_trace(&scene.grid, &scene.viewport, &scene.segment, &crossings);
        img.save(&out_path)?;
        info!(path = %out_path, "wrote trace image");
    }

    Ok(())
}

#[derive(Debug, PartialEq)]
struct Args {
    yaml_path: String,
    out_path: Option<String>,
    pointer: Option<(f64, f64)>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, Box<dyn Error>> {
    let yaml_path = args.next().ok_or(USAGE)?;
    let out_path = args.next();
    let pointer = args.next().map(|arg| parse_pointer(&arg)).transpose()?;
    Ok(Args {
        yaml_path,
        out_path,
        pointer,
    })
}

fn parse_pointer(arg: &str) -> Result<(f64, f64), Box<dyn Error>> {
    let (x, y) = arg
        .split_once(',')
        .ok_or_else(|| format!("pointer must be `x,y`, got {arg:?}"))?;
    Ok((x.trim().parse()?, y.trim().parse()?))
}
