use serde::{Deserialize, Serialize};

/// Integer pixel coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Infinite line in normal form `x·cos θ + y·sin θ = ρ`, with θ in [0, π).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolarLine {
    pub rho: f32,
    pub theta: f32,
}

impl PolarLine {
    pub fn new(rho: f32, theta: f32) -> Self {
        Self { rho, theta }
    }

    /// Intersections with row 0 and row `height`.
    ///
    /// Lines with `cos θ == 0` never cross a row at a finite x; the
    /// orientation filter removes them before this is called.
    pub fn row_endpoints(&self, height: usize) -> (Point, Point) {
        let rho = self.rho as f64;
        let (sin, cos) = (self.theta as f64).sin_cos();
        let top = rho / cos;
        let bottom = (rho - height as f64 * sin) / cos;
        (
            Point::new(round_to_i32(top), 0),
            Point::new(round_to_i32(bottom), height as i32),
        )
    }
}

#[inline]
fn round_to_i32(v: f64) -> i32 {
    v.round().clamp(i32::MIN as f64, i32::MAX as f64) as i32
}

/// Finite segment with integer endpoints, as returned by the segment transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl LineSegment {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Both endpoints moved down by `dy` rows.
    pub fn shifted_down(&self, dy: i32) -> Self {
        Self::new(self.x1, self.y1 + dy, self.x2, self.y2 + dy)
    }

    /// Zero-length segments are invalid; the consistency filter produces them
    /// by zeroing rejected entries.
    pub fn is_degenerate(&self) -> bool {
        self.x1 == self.x2 && self.y1 == self.y2
    }
}

/// Lane-center candidate emitted by the pairing scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneCenter {
    pub x: i32,
    pub y: i32,
}

impl LaneCenter {
    /// Integer midpoint of two points (truncating division).
    pub fn midpoint(a: Point, b: Point) -> Self {
        Self {
            x: (a.x + b.x) / 2,
            y: (a.y + b.y) / 2,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_polar_line_hits_rows_at_rho() {
        let line = PolarLine::new(120.0, 0.0);
        let (top, bottom) = line.row_endpoints(300);
        assert_eq!(top, Point::new(120, 0));
        assert_eq!(bottom, Point::new(120, 300));
    }

    #[test]
    fn slanted_polar_line_endpoints_lie_on_line() {
        let line = PolarLine::new(200.0, 0.5);
        let (top, bottom) = line.row_endpoints(240);
        for p in [top, bottom] {
            let rho = p.x as f32 * 0.5f32.cos() + p.y as f32 * 0.5f32.sin();
            assert!((rho - 200.0).abs() < 1.0, "point {p:?} rho {rho}");
        }
    }

    #[test]
    fn midpoint_truncates() {
        let c = LaneCenter::midpoint(Point::new(100, 11), Point::new(145, 20));
        assert_eq!((c.x, c.y), (122, 15));
    }

    #[test]
    fn zeroed_segment_is_degenerate() {
        assert!(LineSegment::default().is_degenerate());
        assert!(!LineSegment::new(0, 0, 1, 0).is_degenerate());
    }
}
