//! Image gradients by separable Sobel kernels of configurable aperture.
//!
//! - Builds the smoothing (binomial) and derivative kernels for apertures
//!   3, 5 and 7 and convolves rows then columns with border replication.
//! - Outputs per-pixel `gx`, `gy` and the L1 magnitude `|gx| + |gy|`, which
//!   is the scale the Canny thresholds are expressed in.
//! - `orientation_field` exposes `atan2(gy, gx)` per pixel for the
//!   orientation consistency filter.
//!
//! Complexity: O(W·H·k) per pass; memory: four float buffers.
use crate::image::{GrayImage, ImageF32, ImageU8, ImageView, ImageViewMut};
use log::warn;

/// Per-pixel gradient buffers.
#[derive(Clone, Debug, Default)]
pub struct Grad {
    /// Horizontal derivative
    pub gx: ImageF32,
    /// Vertical derivative
    pub gy: ImageF32,
    /// L1 magnitude per pixel: `|gx| + |gy|`
    pub mag: ImageF32,
}

/// Snap an aperture request to a supported odd size in 3..=7.
pub fn supported_aperture(aperture: usize) -> usize {
    let snapped = match aperture {
        0..=3 => 3,
        4 | 5 => 5,
        _ => 7,
    };
    if snapped != aperture {
        warn!("aperture {aperture} unsupported, using {snapped}");
    }
    snapped
}

/// Derivative and smoothing kernels for a Sobel operator of size `aperture`.
///
/// Smoothing is the binomial row of length `k`; the derivative is the
/// binomial row of length `k - 1` convolved with `[-1, 1]`.
pub fn sobel_kernels(aperture: usize) -> (Vec<f32>, Vec<f32>) {
    let k = supported_aperture(aperture);
    let smooth = binomial_row(k);
    let base = binomial_row(k - 1);
    let mut deriv = vec![0.0f32; k];
    for (i, &b) in base.iter().enumerate() {
        deriv[i] -= b;
        deriv[i + 1] += b;
    }
    (deriv, smooth)
}

fn binomial_row(len: usize) -> Vec<f32> {
    let mut row = vec![1.0f32];
    for _ in 1..len {
        let mut next = vec![1.0f32; row.len() + 1];
        for i in 1..row.len() {
            next[i] = row[i - 1] + row[i];
        }
        row = next;
    }
    row
}

#[inline]
fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}

/// Compute Sobel gradients on an 8-bit grayscale view.
pub fn sobel_gradients(gray: &ImageU8, aperture: usize) -> Grad {
    let w = gray.width();
    let h = gray.height();
    let mut gx = ImageF32::new(w, h);
    let mut gy = ImageF32::new(w, h);
    let mut mag = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return Grad { gx, gy, mag };
    }

    let (deriv, smooth) = sobel_kernels(aperture);
    let radius = (deriv.len() / 2) as isize;

    // Horizontal pass: derivative-along-x and smoothing-along-x per row.
    let mut row_deriv = ImageF32::new(w, h);
    let mut row_smooth = ImageF32::new(w, h);
    for y in 0..h {
        let src = gray.row(y);
        let out_d = row_deriv.row_mut(y);
        for (x, out) in out_d.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (i, &kv) in deriv.iter().enumerate() {
                let xx = clamp_index(x as isize + i as isize - radius, w);
                acc += kv * src[xx] as f32;
            }
            *out = acc;
        }
        let out_s = row_smooth.row_mut(y);
        for (x, out) in out_s.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (i, &kv) in smooth.iter().enumerate() {
                let xx = clamp_index(x as isize + i as isize - radius, w);
                acc += kv * src[xx] as f32;
            }
            *out = acc;
        }
    }

    // Vertical pass.
    for y in 0..h {
        let rows: Vec<usize> = (0..deriv.len())
            .map(|j| clamp_index(y as isize + j as isize - radius, h))
            .collect();
        for x in 0..w {
            let mut sx = 0.0;
            let mut sy = 0.0;
            for (j, &yy) in rows.iter().enumerate() {
                sx += smooth[j] * row_deriv.get(x, yy);
                sy += deriv[j] * row_smooth.get(x, yy);
            }
            gx.set(x, y, sx);
            gy.set(x, y, sy);
            mag.set(x, y, sx.abs() + sy.abs());
        }
    }

    Grad { gx, gy, mag }
}

/// Per-pixel gradient orientation `atan2(gy, gx)` in (−π, π].
///
/// Flat pixels report `0.0`.
pub fn orientation_field(gray: &GrayImage) -> ImageF32 {
    let grad = sobel_gradients(&gray.as_view(), 3);
    let mut out = ImageF32::new(gray.width(), gray.height());
    for (dst, (gx, gy)) in out
        .data
        .iter_mut()
        .zip(grad.gx.data.iter().zip(grad.gy.data.iter()))
    {
        *dst = gy.atan2(*gx);
    }
    out
}
