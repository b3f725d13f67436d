//! Thick lines and circle markers built on `imageproc`'s drawing
//! primitives. Works on any `Canvas`; pixels outside the target are dropped.
use crate::types::Point;
use imageproc::drawing::{
    draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut, BresenhamLineIter,
    Canvas,
};

/// Clip the segment `a → b` to `[xmin, xmax] × [ymin, ymax]`
/// (Liang–Barsky). Returns `None` when nothing of it is inside.
fn clip_segment(a: Point, b: Point, xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Option<(Point, Point)> {
    let (x0, y0) = (a.x as f64, a.y as f64);
    let dx = b.x as f64 - x0;
    let dy = b.y as f64 - y0;
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [
        (-dx, x0 - xmin),
        (dx, xmax - x0),
        (-dy, y0 - ymin),
        (dy, ymax - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return None;
            }
            t0 = t0.max(t);
        } else {
            if t < t0 {
                return None;
            }
            t1 = t1.min(t);
        }
    }
    let at = |t: f64| Point::new((x0 + t * dx).round() as i32, (y0 + t * dy).round() as i32);
    Some((at(t0), at(t1)))
}

/// Draw a line of the given thickness. Each point of the 8-connected path
/// is stamped with a filled circle of radius `thickness / 2`.
///
/// Endpoints far outside the canvas (full-height polar lines) are clipped
/// first so the path only covers the visible part.
pub fn draw_line<C: Canvas>(canvas: &mut C, a: Point, b: Point, color: C::Pixel, thickness: i32) {
    let radius = (thickness / 2).max(0);
    let (w, h) = canvas.dimensions();
    let pad = radius as f64;
    let Some((a, b)) = clip_segment(a, b, -pad, -pad, w as f64 - 1.0 + pad, h as f64 - 1.0 + pad) else {
        return;
    };
    let (start, end) = ((a.x as f32, a.y as f32), (b.x as f32, b.y as f32));
    if radius == 0 {
        draw_line_segment_mut(canvas, start, end, color);
        return;
    }
    for center in BresenhamLineIter::new(start, end) {
        draw_filled_circle_mut(canvas, center, radius, color);
    }
}

/// Circle outline of the given thickness centred on `radius`. A negative
/// thickness, or one wide enough to reach the centre, fills the disk.
pub fn draw_circle<C: Canvas>(canvas: &mut C, center: Point, radius: i32, color: C::Pixel, thickness: i32) {
    let c = (center.x, center.y);
    if thickness < 0 {
        draw_filled_circle_mut(canvas, c, radius.max(0), color);
        return;
    }
    let half = thickness / 2;
    let outer = radius + half;
    let inner = radius - half;
    if inner <= 0 {
        draw_filled_circle_mut(canvas, c, outer.max(0), color);
        return;
    }
    for r in inner..=outer {
        draw_hollow_circle_mut(canvas, c, r, color);
    }
}
