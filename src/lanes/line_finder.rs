//! Segment detection and annotation ("LineFinder").
//!
//! Detection is a pure function of the edge map and a [`DetectorConfig`];
//! the two passes of a frame simply use two configurations.
use super::pairing::{pair_sequential, retain_inside_border};
use super::params::{DetectorConfig, PairingParams};
use crate::hough::hough_segments;
use crate::image::GrayImage;
use crate::imgproc::{draw_circle, draw_line};
use crate::types::{LaneCenter, LineSegment};
use imageproc::drawing::Canvas;

/// Run the segment transform with the given profile.
pub fn find_segments(edges: &GrayImage, config: &DetectorConfig) -> Vec<LineSegment> {
    hough_segments(
        edges,
        config.rho_res,
        config.theta_res,
        config.min_vote,
        config.min_length,
        config.max_gap,
    )
}

/// Lane-center marker drawn at each paired midpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker<P> {
    pub color: P,
    pub radius: i32,
    pub thickness: i32,
}

/// How segments and centers are rendered onto a target raster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawStyle<P> {
    pub color: P,
    pub thickness: i32,
    pub marker: Option<Marker<P>>,
}

/// Result of drawing one segment set.
#[derive(Clone, Debug, Default)]
pub struct DrawOutcome {
    /// Shifted segments that passed the border filter, in input order.
    pub drawn: Vec<LineSegment>,
    pub centers: Vec<LaneCenter>,
}

/// Shift, border-filter, pair and draw `segments` onto `target`.
///
/// Every surviving segment is drawn; a marker is drawn at each lane
/// center when the style carries one.
pub fn draw<C: Canvas>(
    target: &mut C,
    segments: &[LineSegment],
    config: &DetectorConfig,
    pairing: &PairingParams,
    style: &DrawStyle<C::Pixel>,
) -> DrawOutcome {
    let (width, _) = target.dimensions();
    let shifted: Vec<LineSegment> = segments
        .iter()
        .map(|s| s.shifted_down(config.vertical_shift))
        .collect();
    let drawn = retain_inside_border(&shifted, width as usize, pairing.border_margin);
    let centers = pair_sequential(&drawn, pairing);

    for s in &drawn {
        draw_line(target, s.start(), s.end(), style.color, style.thickness);
    }
    if let Some(marker) = &style.marker {
        for c in &centers {
            draw_circle(target, c.point(), marker.radius, marker.color, marker.thickness);
        }
    }
    log::debug!(
        "drew {} of {} segments, {} paired centers",
        drawn.len(),
        segments.len(),
        centers.len()
    );

    DrawOutcome { drawn, centers }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::RgbFrame;
    use image::{Luma, Rgb};
    use std::f64::consts::PI;

    #[test]
    fn default_profile_matches_accumulator_defaults() {
        let cfg = DetectorConfig::default();
        assert_eq!(cfg.rho_res, 1.0);
        assert!((cfg.theta_res - PI / 180.0).abs() < 1e-12);
        assert_eq!((cfg.min_vote, cfg.min_length, cfg.max_gap), (10, 0, 0));
    }

    #[test]
    fn each_call_returns_a_fresh_set() {
        let mut edges = GrayImage::new(120, 120);
        for y in 10..110 {
            edges.set(60, y, 255);
        }
        let cfg = DetectorConfig::pass1();
        let first = find_segments(&edges, &cfg);
        let second = find_segments(&edges, &cfg);
        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn draw_shifts_filters_and_pairs() {
        let mut frame = RgbFrame::filled(400, 300, [0, 0, 0]);
        let segments = [
            LineSegment::new(100, 10, 90, 100),
            LineSegment::new(5, 10, 60, 100),
            LineSegment::new(145, 20, 160, 100),
        ];
        let cfg = DetectorConfig::pass2().with_vertical_shift(10);
        let style = DrawStyle {
            color: Rgb([0, 0, 255]),
            thickness: 6,
            marker: Some(Marker {
                color: Rgb([0, 255, 0]),
                radius: 3,
                thickness: 10,
            }),
        };
        let out = draw(&mut frame, &segments, &cfg, &PairingParams::default(), &style);
        assert_eq!(out.drawn.len(), 2);
        assert_eq!(out.drawn[0], LineSegment::new(100, 20, 90, 110));
        assert_eq!(out.centers, vec![LaneCenter { x: 122, y: 25 }]);
        assert_eq!(frame.get(122, 25), [0, 255, 0]);
        assert_eq!(frame.get(95, 65), [0, 0, 255]);
        // The rejected segment near the left border is not drawn.
        assert_eq!(frame.get(33, 65), [0, 0, 0]);
    }

    #[test]
    fn mask_drawing_without_markers() {
        let mut mask = GrayImage::new(200, 100);
        let style = DrawStyle {
            color: Luma([255u8]),
            thickness: 6,
            marker: None,
        };
        let segments = [LineSegment::new(50, 10, 50, 90), LineSegment::new(90, 10, 90, 90)];
        let out = draw(
            &mut mask,
            &segments,
            &DetectorConfig::pass1(),
            &PairingParams::default(),
            &style,
        );
        assert_eq!(out.centers, vec![LaneCenter { x: 70, y: 10 }]);
        assert_eq!(mask.get(70, 10), 0);
        assert_eq!(mask.get(50, 50), 255);
    }
}
