//! Refinement combiner: keeps only the pixels both detectors agree on and
//! re-derives an edge map from them for the loose second pass.
use super::params::RefineParams;
use crate::edges::{canny, CannyParams};
use crate::image::GrayImage;
use crate::imgproc::{bitwise_and, threshold, ThresholdKind};

#[derive(Clone, Debug)]
pub struct Refinement {
    /// AND of the full-line mask and the first-pass segment mask.
    pub combined: GrayImage,
    /// Combined mask thresholded and inverted: black lines on white.
    pub inverted: GrayImage,
    /// Edges of the inverted mask; input of the second pass.
    pub edges: GrayImage,
}

pub fn refine(
    full_line_mask: &GrayImage,
    segment_mask: &GrayImage,
    params: &RefineParams,
    edge_params: &CannyParams,
) -> Refinement {
    let combined = bitwise_and(segment_mask, full_line_mask);
    let (inverted, _) = threshold(
        &combined,
        params.combine_threshold,
        ThresholdKind::BinaryInv,
        false,
    );
    let edges = canny(&inverted, edge_params);
    log::debug!(
        "refine: {} combined px, {} edge px",
        combined.count_nonzero(),
        edges.count_nonzero()
    );
    Refinement {
        combined,
        inverted,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imgproc::draw_line;
    use crate::types::Point;
    use image::Luma;

    #[test]
    fn disagreement_is_suppressed() {
        let mut full = GrayImage::new(80, 60);
        let mut seg = GrayImage::new(80, 60);
        draw_line(&mut full, Point::new(20, 0), Point::new(20, 59), Luma([255]), 8);
        draw_line(&mut seg, Point::new(20, 5), Point::new(20, 50), Luma([255]), 6);
        draw_line(&mut seg, Point::new(60, 5), Point::new(60, 50), Luma([255]), 6);

        let r = refine(&full, &seg, &RefineParams::default(), &CannyParams::new(100.0, 350.0, 3));
        assert_eq!(r.combined.get(20, 30), 255);
        assert_eq!(r.combined.get(60, 30), 0);
        assert_eq!(r.inverted.get(20, 30), 0);
        assert_eq!(r.inverted.get(60, 30), 255);
        // Edges appear only around the agreed line.
        for y in 0..60 {
            for x in 40..80 {
                assert_eq!(r.edges.get(x, y), 0, "unexpected edge at ({x}, {y})");
            }
        }
        assert!(r.edges.count_nonzero() > 0);
    }
}
