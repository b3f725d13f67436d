//! Standard Hough transform returning infinite lines in polar form.
//!
//! Every non-zero pixel votes once per angle. A bin is reported when its
//! count is strictly above the threshold and it is a local maximum among its
//! four neighbours: strictly greater than the lower-index neighbour and
//! greater-or-equal to the higher-index one along both axes, so a plateau of
//! equal counts yields a single line. Results are ordered by votes
//! (descending) and then by accumulator position.
//!
//! Voting is parallelised over angles; each angle owns one accumulator row,
//! so the result does not depend on scheduling.
use super::accumulator::{nonzero_points, HoughSpace};
use crate::image::{GrayImage, ImageView};
use crate::types::PolarLine;
use rayon::prelude::*;

/// Detect lines with more than `threshold` votes.
pub fn hough_lines(
    edges: &GrayImage,
    rho_res: f64,
    theta_res: f64,
    threshold: i32,
) -> Vec<PolarLine> {
    let Some(space) = HoughSpace::new(edges.width(), edges.height(), rho_res, theta_res) else {
        return Vec::new();
    };
    let points = nonzero_points(edges);
    let acc = vote(&space, &points);
    collect_peaks(&space, &acc, threshold)
}

/// Padded accumulator: `(num_angle + 2) × (num_rho + 2)` with a zero border.
fn vote(space: &HoughSpace, points: &[(usize, usize)]) -> Vec<u32> {
    let stride = space.num_rho + 2;
    let mut acc = vec![0u32; (space.num_angle + 2) * stride];
    acc[stride..(space.num_angle + 1) * stride]
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(n, row)| {
            for &(x, y) in points {
                let r = space.rho_index(x, y, n);
                if r < space.num_rho {
                    row[r + 1] += 1;
                }
            }
        });
    acc
}

fn collect_peaks(space: &HoughSpace, acc: &[u32], threshold: i32) -> Vec<PolarLine> {
    let stride = space.num_rho + 2;
    let mut peaks: Vec<(u32, usize)> = Vec::new();
    for n in 0..space.num_angle {
        for r in 0..space.num_rho {
            let base = (n + 1) * stride + r + 1;
            let v = acc[base];
            if (v as i64) > threshold as i64
                && v > acc[base - 1]
                && v >= acc[base + 1]
                && v > acc[base - stride]
                && v >= acc[base + stride]
            {
                peaks.push((v, base));
            }
        }
    }
    peaks.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    peaks
        .into_iter()
        .map(|(_, base)| {
            let n = base / stride - 1;
            let r = base - (n + 1) * stride - 1;
            PolarLine::new(space.rho_value(r) as f32, space.theta_value(n) as f32)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn vertical_line_is_found_at_theta_zero() {
        let mut edges = GrayImage::new(100, 80);
        for y in 0..80 {
            edges.set(30, y, 255);
        }
        // Neighbouring angles collect at most ~1/sin(1°) ≈ 57 votes.
        let lines = hough_lines(&edges, 1.0, PI / 180.0, 60);
        assert_eq!(lines.len(), 1, "lines: {lines:?}");
        assert_eq!(lines[0].theta, 0.0);
        assert_eq!(lines[0].rho, 30.0);
    }

    #[test]
    fn horizontal_line_is_found_at_half_pi() {
        let mut edges = GrayImage::new(100, 80);
        for x in 0..100 {
            edges.set(x, 20, 255);
        }
        let lines = hough_lines(&edges, 1.0, PI / 180.0, 70);
        assert_eq!(lines.len(), 1, "lines: {lines:?}");
        assert!((lines[0].theta - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
        assert_eq!(lines[0].rho, 20.0);
    }

    #[test]
    fn threshold_is_strict() {
        let mut edges = GrayImage::new(50, 50);
        for y in 0..40 {
            edges.set(10, y, 255);
        }
        assert!(hough_lines(&edges, 1.0, PI / 180.0, 40).is_empty());
        assert_eq!(hough_lines(&edges, 1.0, PI / 180.0, 39).len(), 1);
    }

    #[test]
    fn stronger_lines_come_first() {
        let mut edges = GrayImage::new(120, 100);
        for y in 0..70 {
            edges.set(20, y, 255);
        }
        for y in 0..100 {
            edges.set(90, y, 255);
        }
        let lines = hough_lines(&edges, 1.0, PI / 180.0, 62);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].rho, 90.0);
        assert_eq!(lines[1].rho, 20.0);
    }

    #[test]
    fn empty_map_yields_nothing() {
        let edges = GrayImage::new(40, 40);
        assert!(hough_lines(&edges, 1.0, PI / 180.0, 1).is_empty());
    }
}
