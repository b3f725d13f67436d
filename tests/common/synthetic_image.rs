use lane_detector::image::{GrayImage, ImageView, RgbFrame};

/// Edge map with the pixels of the polar line `(rho, theta_deg)` set.
///
/// The line is sampled along its major axis and every pixel is placed so
/// that it votes into exactly the `(rho, theta)` bin of a 1 px / 1° Hough
/// accumulator.
pub fn draw_polar_edge_line(edges: &mut GrayImage, rho: f64, theta_deg: f64) {
    let theta = theta_deg.to_radians();
    let (sin, cos) = theta.sin_cos();
    let (w, h) = (edges.width(), edges.height());
    if cos.abs() >= sin.abs() {
        for y in 0..h {
            let x = ((rho - y as f64 * sin) / cos).round();
            if x >= 0.0 && (x as usize) < w {
                edges.set(x as usize, y, 255);
            }
        }
    } else {
        for x in 0..w {
            let y = ((rho - x as f64 * cos) / sin).round();
            if y >= 0.0 && (y as usize) < h {
                edges.set(x, y as usize, 255);
            }
        }
    }
}

pub fn draw_vertical_edge(edges: &mut GrayImage, x: usize) {
    for y in 0..edges.height() {
        edges.set(x, y, 255);
    }
}

pub fn draw_horizontal_edge(edges: &mut GrayImage, y: usize) {
    for x in 0..edges.width() {
        edges.set(x, y, 255);
    }
}

/// Lane markings as seen from a forward camera: two bright stripes on dark
/// asphalt converging towards the top of the frame.
pub struct RoadScene {
    pub width: usize,
    pub height: usize,
    /// Stripe centre x at the bottom and top rows, left marking.
    pub left: (f64, f64),
    /// Stripe centre x at the bottom and top rows, right marking.
    pub right: (f64, f64),
    pub stripe_width: f64,
}

impl Default for RoadScene {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            left: (120.0, 190.0),
            right: (300.0, 230.0),
            stripe_width: 8.0,
        }
    }
}

impl RoadScene {
    /// Stripe centre x of a marking `(bottom, top)` at row `y`.
    pub fn center_at(&self, marking: (f64, f64), y: usize) -> f64 {
        let t = (self.height - 1 - y) as f64 / (self.height - 1) as f64;
        marking.0 + (marking.1 - marking.0) * t
    }

    pub fn render(&self) -> RgbFrame {
        let asphalt = [40, 40, 40];
        let paint = [255, 255, 255];
        let mut frame = RgbFrame::filled(self.width, self.height, asphalt);
        let half = self.stripe_width / 2.0;
        for y in 0..self.height {
            for marking in [self.left, self.right] {
                let cx = self.center_at(marking, y);
                let x0 = (cx - half).round().max(0.0) as usize;
                let x1 = ((cx + half).round() as usize).min(self.width);
                for x in x0..x1 {
                    frame.set(x, y, paint);
                }
            }
        }
        frame
    }
}
