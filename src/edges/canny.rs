//! Canny edge detection: Sobel gradients, direction-aligned non-maximum
//! suppression, and hysteresis thresholding.
//!
//! Suppression quantizes the gradient direction into four bins
//! (0°, 45°, 90°, 135°). Along the horizontal and vertical bins a pixel must
//! be strictly greater than the lower neighbour and greater-or-equal to the
//! upper one, so a two-pixel-wide magnitude ridge (the response of a binary
//! step) keeps exactly one pixel. Diagonal bins require strict maxima.
//!
//! Neighbours outside the raster count as zero magnitude.
use super::grad::{sobel_gradients, Grad};
use crate::image::{GrayImage, ImageView};
use serde::{Deserialize, Serialize};

const TAN_22_5_DEG: f32 = 0.414_213_56;
const TAN_67_5_DEG: f32 = 2.414_213_6;

/// Thresholds and aperture for one edge extraction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyParams {
    /// Hysteresis lower bound on the L1 gradient magnitude.
    pub low: f32,
    /// Seeds must exceed this magnitude.
    pub high: f32,
    /// Sobel aperture size (3, 5 or 7).
    pub aperture: usize,
}

impl CannyParams {
    pub fn new(low: f32, high: f32, aperture: usize) -> Self {
        Self {
            low,
            high,
            aperture,
        }
    }
}

impl Default for CannyParams {
    fn default() -> Self {
        Self::new(160.0, 480.0, 3)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Suppressed,
    Candidate,
    Edge,
}

fn non_max_suppression(grad: &Grad, low: f32, high: f32) -> Vec<Mark> {
    let w = grad.mag.w;
    let h = grad.mag.h;
    let mag_at = |x: isize, y: isize| -> f32 {
        if x < 0 || y < 0 || x >= w as isize || y >= h as isize {
            0.0
        } else {
            grad.mag.get(x as usize, y as usize)
        }
    };

    let mut marks = vec![Mark::Suppressed; w * h];
    for y in 0..h {
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);
        let mag_row = grad.mag.row(y);
        let yi = y as isize;
        for x in 0..w {
            let m = mag_row[x];
            if m <= low {
                continue;
            }
            let xi = x as isize;
            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();

            let is_max = if abs_gy < abs_gx * TAN_22_5_DEG {
                m > mag_at(xi - 1, yi) && m >= mag_at(xi + 1, yi)
            } else if abs_gy > abs_gx * TAN_67_5_DEG {
                m > mag_at(xi, yi - 1) && m >= mag_at(xi, yi + 1)
            } else {
                let s: isize = if (gx < 0.0) != (gy < 0.0) { -1 } else { 1 };
                m > mag_at(xi - s, yi - 1) && m > mag_at(xi + s, yi + 1)
            };

            if is_max {
                marks[y * w + x] = if m > high {
                    Mark::Edge
                } else {
                    Mark::Candidate
                };
            }
        }
    }
    marks
}

fn hysteresis(marks: &mut [Mark], w: usize, h: usize) {
    let mut stack: Vec<usize> = marks
        .iter()
        .enumerate()
        .filter_map(|(i, m)| (*m == Mark::Edge).then_some(i))
        .collect();

    while let Some(idx) = stack.pop() {
        let x = (idx % w) as isize;
        let y = (idx / w) as isize;
        for dy in -1..=1isize {
            for dx in -1..=1isize {
                let nx = x + dx;
                let ny = y + dy;
                if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                    continue;
                }
                let nidx = ny as usize * w + nx as usize;
                if marks[nidx] == Mark::Candidate {
                    marks[nidx] = Mark::Edge;
                    stack.push(nidx);
                }
            }
        }
    }
}

/// Extract a binary edge map (0 / 255) from a grayscale raster.
///
/// When `low > high` the thresholds are swapped.
pub fn canny(gray: &GrayImage, params: &CannyParams) -> GrayImage {
    let w = gray.width();
    let h = gray.height();
    let (low, high) = if params.low > params.high {
        (params.high, params.low)
    } else {
        (params.low, params.high)
    };

    let grad = sobel_gradients(&gray.as_view(), params.aperture);
    let mut marks = non_max_suppression(&grad, low, high);
    hysteresis(&mut marks, w, h);

    let data = marks
        .iter()
        .map(|m| if *m == Mark::Edge { 255 } else { 0 })
        .collect();
    GrayImage::from_raw(w, h, data).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_image(width: usize, height: usize, split_x: usize, value: u8) -> GrayImage {
        let mut img = GrayImage::new(width, height);
        for y in 0..height {
            for x in split_x..width {
                img.set(x, y, value);
            }
        }
        img
    }

    #[test]
    fn step_edge_is_one_pixel_wide() {
        let img = step_image(32, 16, 16, 255);
        let edges = canny(&img, &CannyParams::default());
        for y in 0..16 {
            let cols: Vec<usize> = (0..32).filter(|&x| edges.get(x, y) == 255).collect();
            assert_eq!(cols, vec![15], "row {y} edge columns {cols:?}");
        }
    }

    #[test]
    fn weak_step_is_rejected() {
        let img = step_image(32, 16, 16, 40);
        let edges = canny(&img, &CannyParams::default());
        assert_eq!(edges.count_nonzero(), 0);
    }

    #[test]
    fn swapped_thresholds_behave_like_ordered() {
        let img = step_image(24, 12, 10, 255);
        let a = canny(&img, &CannyParams::new(160.0, 480.0, 3));
        let b = canny(&img, &CannyParams::new(480.0, 160.0, 3));
        assert_eq!(a, b);
    }

    #[test]
    fn flat_image_has_no_edges() {
        let img = GrayImage::filled(20, 20, 128);
        assert_eq!(canny(&img, &CannyParams::default()).count_nonzero(), 0);
    }
}
