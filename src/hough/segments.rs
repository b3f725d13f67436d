//! Progressive probabilistic Hough transform returning finite segments.
//!
//! Edge points are visited in pseudo-random order. Each visited point votes;
//! once its strongest bin reaches `min_vote` the corresponding line is walked
//! from the point in both directions, bridging gaps of up to `max_gap`
//! pixels. Walked pixels are removed from further consideration and, when
//! the segment is long enough, their votes are withdrawn so that one line is
//! not reported twice.
use super::accumulator::{nonzero_points, HoughSpace};
use super::rng::MwcRng;
use crate::image::{GrayImage, ImageView};
use crate::types::LineSegment;

const SHIFT: u32 = 16;

/// Direction of the walk along a detected line, in 16.16 fixed point on the
/// minor axis.
#[derive(Clone, Copy, Debug)]
struct Walk {
    /// Step is one pixel along x (true) or along y (false).
    x_major: bool,
    x0: i64,
    y0: i64,
    dx: i64,
    dy: i64,
}

impl Walk {
    fn new(x: usize, y: usize, a: f64, b: f64) -> Self {
        let one = (1i64 << SHIFT) as f64;
        let half = 1i64 << (SHIFT - 1);
        if a.abs() > b.abs() {
            Self {
                x_major: true,
                x0: x as i64,
                y0: ((y as i64) << SHIFT) + half,
                dx: if a > 0.0 { 1 } else { -1 },
                dy: (b * one / a.abs()).round() as i64,
            }
        } else {
            Self {
                x_major: false,
                x0: ((x as i64) << SHIFT) + half,
                y0: y as i64,
                dx: (a * one / b.abs()).round() as i64,
                dy: if b > 0.0 { 1 } else { -1 },
            }
        }
    }

    /// Pixel at fixed-point position `(x, y)`.
    #[inline]
    fn pixel(&self, x: i64, y: i64) -> (i64, i64) {
        if self.x_major {
            (x, y >> SHIFT)
        } else {
            (x >> SHIFT, y)
        }
    }

    /// Starting position and step for direction `k` (0 forward, 1 backward).
    #[inline]
    fn start(&self, k: usize) -> (i64, i64, i64, i64) {
        if k == 0 {
            (self.x0, self.y0, self.dx, self.dy)
        } else {
            (self.x0, self.y0, -self.dx, -self.dy)
        }
    }
}

struct Votes<'a> {
    space: &'a HoughSpace,
    acc: Vec<i32>,
}

impl<'a> Votes<'a> {
    fn new(space: &'a HoughSpace) -> Self {
        Self {
            space,
            acc: vec![0; space.num_angle * space.num_rho],
        }
    }

    /// Add the point's votes and return the first angle whose bin is the
    /// strongest one above `floor`.
    fn add(&mut self, x: usize, y: usize, floor: i32) -> Option<(usize, i32)> {
        let mut best: Option<(usize, i32)> = None;
        let mut max_val = floor;
        for n in 0..self.space.num_angle {
            let r = self.space.rho_index(x, y, n);
            if r >= self.space.num_rho {
                continue;
            }
            let cell = &mut self.acc[n * self.space.num_rho + r];
            *cell += 1;
            if *cell > max_val {
                max_val = *cell;
                best = Some((n, *cell));
            }
        }
        best
    }

    fn remove(&mut self, x: usize, y: usize) {
        for n in 0..self.space.num_angle {
            let r = self.space.rho_index(x, y, n);
            if r < self.space.num_rho {
                self.acc[n * self.space.num_rho + r] -= 1;
            }
        }
    }
}

/// Detect segments supported by at least `min_vote` votes, spanning at least
/// `min_length` pixels along x or y, with gaps of at most `max_gap` pixels.
///
/// Segments are returned in detection order.
pub fn hough_segments(
    edges: &GrayImage,
    rho_res: f64,
    theta_res: f64,
    min_vote: i32,
    min_length: i32,
    max_gap: i32,
) -> Vec<LineSegment> {
    let width = edges.width();
    let height = edges.height();
    let Some(space) = HoughSpace::new(width, height, rho_res, theta_res) else {
        return Vec::new();
    };

    let mut pending = nonzero_points(edges);
    let mut mask: Vec<bool> = vec![false; width * height];
    for &(x, y) in &pending {
        mask[y * width + x] = true;
    }

    let mut votes = Votes::new(&space);
    let mut rng = MwcRng::default();
    let mut segments = Vec::new();
    let in_bounds = |(x, y): (i64, i64)| x >= 0 && y >= 0 && x < width as i64 && y < height as i64;

    let mut count = pending.len();
    while count > 0 {
        let idx = rng.uniform(0, count);
        let (px, py) = pending[idx];
        pending[idx] = pending[count - 1];
        count -= 1;

        if !mask[py * width + px] {
            continue;
        }
        let Some((best_n, _)) = votes.add(px, py, min_vote - 1) else {
            continue;
        };

        let a = -space.sin_table[best_n];
        let b = space.cos_table[best_n];
        let walk = Walk::new(px, py, a, b);

        // Locate both ends, tolerating gaps up to `max_gap`.
        let mut ends = [(px as i64, py as i64); 2];
        for (k, end) in ends.iter_mut().enumerate() {
            let (mut x, mut y, dx, dy) = walk.start(k);
            let mut gap = 0;
            loop {
                let p = walk.pixel(x, y);
                if !in_bounds(p) {
                    break;
                }
                if mask[p.1 as usize * width + p.0 as usize] {
                    gap = 0;
                    *end = p;
                } else {
                    gap += 1;
                    if gap > max_gap {
                        break;
                    }
                }
                x += dx;
                y += dy;
            }
        }

        let good_line = (ends[1].0 - ends[0].0).abs() >= min_length as i64
            || (ends[1].1 - ends[0].1).abs() >= min_length as i64;

        // Consume the walked pixels; withdraw their votes for accepted lines.
        for (k, end) in ends.iter().enumerate() {
            let (mut x, mut y, dx, dy) = walk.start(k);
            loop {
                let p = walk.pixel(x, y);
                if !in_bounds(p) {
                    break;
                }
                let (ux, uy) = (p.0 as usize, p.1 as usize);
                let cell = &mut mask[uy * width + ux];
                if *cell {
                    if good_line {
                        votes.remove(ux, uy);
                    }
                    *cell = false;
                }
                if p == *end {
                    break;
                }
                x += dx;
                y += dy;
            }
        }

        if good_line {
            segments.push(LineSegment::new(
                ends[0].0 as i32,
                ends[0].1 as i32,
                ends[1].0 as i32,
                ends[1].1 as i32,
            ));
        }
    }

    log::debug!(
        "hough_segments: {} segments (vote {}, length {}, gap {})",
        segments.len(),
        min_vote,
        min_length,
        max_gap
    );
    segments
}
