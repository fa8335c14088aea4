use glam::{DVec2, IVec2, UVec2};
use image::{Rgb, RgbImage};

use crate::grid::ObstructionGrid;
use crate::raycast::GridCrossing;
use crate::types::{Segment, Viewport};

pub const BACKGROUND: Rgb<u8> = Rgb([0x20, 0x20, 0x20]);
pub const GRID_LINE: Rgb<u8> = Rgb([0x30, 0x30, 0x30]);
pub const WALL_FILL: Rgb<u8> = Rgb([0x30, 0x30, 0x90]);
pub const RAY: Rgb<u8> = Rgb([0x69, 0x69, 0x69]);
pub const CROSSING: Rgb<u8> = Rgb([0x69, 0xff, 0x69]);
pub const ORIGIN: Rgb<u8> = Rgb([0xff, 0x55, 0x55]);
pub const TARGET: Rgb<u8> = Rgb([0xff, 0xff, 0x55]);

const MARKER_RADIUS_PX: i32 = 4;

/// Draw the grid, its walls and one trace onto an image the size of `viewport`.
///
/// Row 0 is at the top of the image. The ray is drawn as a polyline from the
/// origin through every crossing, in order, and on to the target.
pub fn render_trace(
    grid: &ObstructionGrid,
    viewport: &Viewport,
    segment: &Segment,
    crossings: &[GridCrossing],
) -> RgbImage {
    let mut img = RgbImage::from_pixel(
        viewport.width_px.max(1),
        viewport.height_px.max(1),
        BACKGROUND,
    );

    draw_walls(&mut img, grid, viewport);
    draw_grid_lines(&mut img, viewport);

    let mut prev = segment.origin();
    for crossing in crossings {
        draw_line(
            &mut img,
            viewport.grid_to_screen(prev),
            viewport.grid_to_screen(crossing.point),
            RAY,
        );
        prev = crossing.point;
    }
    draw_line(
        &mut img,
        viewport.grid_to_screen(prev),
        viewport.grid_to_screen(segment.target()),
        RAY,
    );

    for crossing in crossings {
        draw_marker(&mut img, viewport.grid_to_screen(crossing.point), CROSSING);
    }
    draw_marker(&mut img, viewport.grid_to_screen(segment.origin()), ORIGIN);
    draw_marker(&mut img, viewport.grid_to_screen(segment.target()), TARGET);

    img
}

fn draw_walls(img: &mut RgbImage, grid: &ObstructionGrid, viewport: &Viewport) {
    let cell_size = viewport.cell_size();
    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            if !grid.is_wall(&UVec2::new(x, y)) {
                continue;
            }
            let min = (DVec2::new(x as f64, y as f64) * cell_size).as_uvec2();
            let max = (DVec2::new((x + 1) as f64, (y + 1) as f64) * cell_size).as_uvec2();
            for py in min.y..max.y.min(img.height()) {
                for px in min.x..max.x.min(img.width()) {
                    img.put_pixel(px, py, WALL_FILL);
                }
            }
        }
    }
}

fn draw_grid_lines(img: &mut RgbImage, viewport: &Viewport) {
    let cell_size = viewport.cell_size();
    let (width, height) = img.dimensions();

    for col in 1..viewport.extent.cols {
        let px = (col as f64 * cell_size.x) as u32;
        if px < width {
            for py in 0..height {
                img.put_pixel(px, py, GRID_LINE);
            }
        }
    }
    for row in 1..viewport.extent.rows {
        let py = (row as f64 * cell_size.y) as u32;
        if py < height {
            for px in 0..width {
                img.put_pixel(px, py, GRID_LINE);
            }
        }
    }
}

fn put_clipped(img: &mut RgbImage, p: IVec2, color: Rgb<u8>) {
    if p.x >= 0 && p.y >= 0 && (p.x as u32) < img.width() && (p.y as u32) < img.height() {
        img.put_pixel(p.x as u32, p.y as u32, color);
    }
}

/// Bresenham between two pixel positions, clipped to the image.
fn draw_line(img: &mut RgbImage, from: DVec2, to: DVec2, color: Rgb<u8>) {
    let start = from.round().as_ivec2();
    let end = to.round().as_ivec2();

    let dx = (end.x - start.x).abs();
    let sx = if start.x < end.x { 1 } else { -1 };
    let dy = -(end.y - start.y).abs();
    let sy = if start.y < end.y { 1 } else { -1 };
    let mut err = dx + dy;
    let mut p = start;

    loop {
        put_clipped(img, p, color);
        if p == end {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            p.x += sx;
        }
        if e2 <= dx {
            err += dx;
            p.y += sy;
        }
    }
}

fn draw_marker(img: &mut RgbImage, center: DVec2, color: Rgb<u8>) {
    let c = center.round().as_ivec2();
    let r = MARKER_RADIUS_PX;
    for oy in -r..=r {
        for ox in -r..=r {
            if ox * ox + oy * oy <= r * r {
                put_clipped(img, c + IVec2::new(ox, oy), color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raycast::trace;
    use crate::types::{GridExtent, Point, WALL};

    fn pixel(img: &RgbImage, p: DVec2) -> Rgb<u8> {
        *img.get_pixel(p.x as u32, p.y as u32)
    }

    #[test]
    fn image_matches_viewport() {
        let extent = GridExtent::new(4, 8);
        let viewport = Viewport::with_cell_size(extent, 10);
        let segment = Segment::new(Point::new(0.5, 0.5), Point::new(0.7, 0.6)).unwrap();

        let img = render_trace(&ObstructionGrid::empty(extent), &viewport, &segment, &[]);
        assert_eq!(img.dimensions(), (80, 40));
        assert_eq!(*img.get_pixel(79, 39), BACKGROUND);
        assert_eq!(*img.get_pixel(10, 25), GRID_LINE);
    }

    #[test]
    fn walls_fill_their_cell() {
        let extent = GridExtent::square(4);
        let mut grid = ObstructionGrid::empty(extent);
        grid.set(&UVec2::new(3, 0), WALL).unwrap();
        let viewport = Viewport::with_cell_size(extent, 10);
        let segment = Segment::new(Point::new(0.5, 3.5), Point::new(0.6, 3.6)).unwrap();

        let img = render_trace(&grid, &viewport, &segment, &[]);
        assert_eq!(*img.get_pixel(35, 5), WALL_FILL);
        assert_eq!(*img.get_pixel(25, 5), BACKGROUND);
    }

    #[test]
    fn crossings_get_markers() {
        let extent = GridExtent::square(10);
        let viewport = Viewport::reference(extent);
        let origin = Point::new(5.5, 5.5);
        let target = Point::new(8.5, 5.51);
        let segment = Segment::new(origin, target).unwrap();
        let crossings: Vec<GridCrossing> = trace(origin, target, 20).collect();

        let grid = ObstructionGrid::empty(extent);
        let img = render_trace(&grid, &viewport, &segment, &crossings);

        for c in &crossings {
            assert_eq!(pixel(&img, viewport.grid_to_screen(c.point).round()), CROSSING);
        }
        assert_eq!(pixel(&img, viewport.grid_to_screen(origin).round()), ORIGIN);
        assert_eq!(pixel(&img, viewport.grid_to_screen(target).round()), TARGET);

        // Ray passes between the first two crossings.
        let mid = viewport.grid_to_screen((crossings[0].point + crossings[1].point) * 0.5);
        assert_eq!(pixel(&img, mid.round()), RAY);
    }
}
