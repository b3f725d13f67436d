//! Shared (ρ, θ) accumulator geometry for both Hough variants.

/// Discretisation of the parameter space and its trigonometric tables.
///
/// Angles run over `[0, π)` in steps of `theta_res`; distances cover
/// `±(w + h)` in steps of `rho_res`, centred on index `(num_rho - 1) / 2`.
#[derive(Clone, Debug)]
pub struct HoughSpace {
    pub num_angle: usize,
    pub num_rho: usize,
    pub rho_res: f64,
    pub theta_res: f64,
    /// `cos(θ_n) / rho_res`
    pub cos_table: Vec<f64>,
    /// `sin(θ_n) / rho_res`
    pub sin_table: Vec<f64>,
}

impl HoughSpace {
    /// Returns `None` when the resolutions leave no bins.
    pub fn new(width: usize, height: usize, rho_res: f64, theta_res: f64) -> Option<Self> {
        if !(rho_res > 0.0) || !(theta_res > 0.0) {
            return None;
        }
        let num_angle = (std::f64::consts::PI / theta_res).round() as usize;
        let num_rho = (((width + height) * 2 + 1) as f64 / rho_res).round() as usize;
        if num_angle == 0 || num_rho == 0 {
            return None;
        }
        let irho = 1.0 / rho_res;
        let (sin_table, cos_table) = (0..num_angle)
            .map(|n| {
                let (s, c) = (n as f64 * theta_res).sin_cos();
                (s * irho, c * irho)
            })
            .unzip();
        Some(Self {
            num_angle,
            num_rho,
            rho_res,
            theta_res,
            cos_table,
            sin_table,
        })
    }

    /// Accumulator column of point `(x, y)` for angle index `n`.
    #[inline]
    pub fn rho_index(&self, x: usize, y: usize, n: usize) -> usize {
        let r = (x as f64 * self.cos_table[n] + y as f64 * self.sin_table[n]).round() as isize;
        (r + (self.num_rho as isize - 1) / 2) as usize
    }

    /// Signed distance represented by column `r`.
    #[inline]
    pub fn rho_value(&self, r: usize) -> f64 {
        (r as f64 - (self.num_rho as f64 - 1.0) * 0.5) * self.rho_res
    }

    #[inline]
    pub fn theta_value(&self, n: usize) -> f64 {
        n as f64 * self.theta_res
    }
}

/// Row-major list of non-zero pixel coordinates.
pub fn nonzero_points(edges: &crate::image::GrayImage) -> Vec<(usize, usize)> {
    use crate::image::ImageView;
    let mut points = Vec::new();
    for (y, row) in edges.rows().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            if v != 0 {
                points.push((x, y));
            }
        }
    }
    points
}
