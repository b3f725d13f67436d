//! Orientation consistency filter.
//!
//! A segment is kept when enough pixels along it carry a gradient
//! orientation perpendicular to the segment, i.e. the edge that produced it
//! actually runs along it. Rejected segments are zeroed in place, so the list
//! keeps its length and callers must skip degenerate entries.
use crate::image::{ImageF32, ImageView};
use crate::types::LineSegment;
use imageproc::drawing::BresenhamLineIter;
use std::f64::consts::PI;

#[inline]
fn wrap_upper(angle: f64) -> f64 {
    if angle > PI {
        angle - 2.0 * PI
    } else {
        angle
    }
}

/// Fraction of sampled pixels matching the segment orientation, or `None`
/// when the path does not cross the field.
pub fn consistency_ratio(orientations: &ImageF32, segment: &LineSegment, delta: f64) -> Option<f64> {
    let (x1, y1, x2, y2) = (segment.x1, segment.y1, segment.x2, segment.y2);
    let ori1 = wrap_upper(((y1 - y2) as f64).atan2((x1 - x2) as f64) + PI / 2.0);
    let ori2 = wrap_upper(((y2 - y1) as f64).atan2((x2 - x1) as f64) + PI / 2.0);

    let mut sampled = 0usize;
    let mut matching = 0usize;
    let path = BresenhamLineIter::new((x1 as f32, y1 as f32), (x2 as f32, y2 as f32));
    for (x, y) in path {
        let Some(ori) = orientations.get_checked(x, y) else {
            continue;
        };
        sampled += 1;
        let ori = ori as f64;
        if (ori - ori1).abs().min((ori - ori2).abs()) < delta {
            matching += 1;
        }
    }
    (sampled > 0).then(|| matching as f64 / sampled as f64)
}

/// Zero every segment whose consistency ratio is below `percentage`.
///
/// Returns the number of segments zeroed by this call.
pub fn remove_inconsistent_orientations(
    orientations: &ImageF32,
    segments: &mut [LineSegment],
    percentage: f64,
    delta: f64,
) -> usize {
    let mut removed = 0;
    for segment in segments.iter_mut() {
        let Some(ratio) = consistency_ratio(orientations, segment, delta) else {
            continue;
        };
        if ratio < percentage {
            log::debug!("inconsistent segment {segment:?}: ratio {ratio:.3}");
            *segment = LineSegment::default();
            removed += 1;
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::orientation_field;
    use crate::image::GrayImage;

    /// Bright half-plane `x >= split`: gradient points along +x.
    fn vertical_step(width: usize, height: usize, split: usize) -> GrayImage {
        let mut img = GrayImage::new(width, height);
        for y in 0..height {
            for x in split..width {
                img.set(x, y, 200);
            }
        }
        img
    }

    #[test]
    fn segment_along_edge_is_kept() {
        let field = orientation_field(&vertical_step(40, 40, 20));
        let mut segments = [LineSegment::new(20, 5, 20, 35)];
        let removed = remove_inconsistent_orientations(&field, &mut segments, 0.8, 0.1);
        assert_eq!(removed, 0);
        assert_eq!(segments[0], LineSegment::new(20, 5, 20, 35));
    }

    #[test]
    fn segment_across_edge_is_zeroed() {
        let field = orientation_field(&vertical_step(40, 40, 20));
        let mut segments = [LineSegment::new(5, 20, 35, 20)];
        let removed = remove_inconsistent_orientations(&field, &mut segments, 0.5, 0.1);
        assert_eq!(removed, 1);
        assert!(segments[0].is_degenerate());
    }

    #[test]
    fn repeated_application_is_stable() {
        let field = orientation_field(&vertical_step(40, 40, 20));
        let mut segments = vec![
            LineSegment::new(20, 5, 20, 35),
            LineSegment::new(5, 20, 35, 20),
            LineSegment::new(19, 0, 21, 39),
            LineSegment::new(0, 0, 39, 39),
        ];
        remove_inconsistent_orientations(&field, &mut segments, 0.6, 0.2);
        let once = segments.clone();
        remove_inconsistent_orientations(&field, &mut segments, 0.6, 0.2);
        assert_eq!(segments, once);
    }

    #[test]
    fn path_outside_field_is_left_alone() {
        let field = ImageF32::new(10, 10);
        let mut segments = [LineSegment::new(50, 50, 60, 60)];
        assert_eq!(remove_inconsistent_orientations(&field, &mut segments, 1.0, 0.1), 0);
        assert_eq!(segments[0], LineSegment::new(50, 50, 60, 60));
    }
}
