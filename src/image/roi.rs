use serde::{Deserialize, Serialize};

/// Axis-aligned crop rectangle in frame pixel coordinates.
///
/// Annotation only compensates the vertical offset: segments found inside a
/// crop with `x > 0` are drawn (and border-tested) in crop-local x on the
/// full frame. Use `x = 0` crops for overlays that line up with the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionOfInterest {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl RegionOfInterest {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Intersect with a `width × height` frame. `None` when nothing remains.
    pub fn clamp_to(&self, width: usize, height: usize) -> Option<Self> {
        if self.x >= width || self.y >= height {
            return None;
        }
        let w = self.width.min(width - self.x);
        let h = self.height.min(height - self.y);
        if w == 0 || h == 0 {
            return None;
        }
        Some(Self::new(self.x, self.y, w, h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_trims_overhang() {
        let roi = RegionOfInterest::new(30, 10, 550, 200);
        assert_eq!(
            roi.clamp_to(400, 300),
            Some(RegionOfInterest::new(30, 10, 370, 200))
        );
    }

    #[test]
    fn clamp_outside_frame_is_empty() {
        assert_eq!(RegionOfInterest::new(500, 0, 10, 10).clamp_to(400, 300), None);
        assert_eq!(RegionOfInterest::new(0, 0, 0, 10).clamp_to(400, 300), None);
    }
}
