//! Per-frame driver chaining the lane detection stages.
//!
//! ```text
//! frame → gray (optional crop) → edges → full-line stage ─┐
//!                                   └→ segments pass 1 ───┴→ AND → edges → segments pass 2 → annotate
//! ```
//!
//! The pipeline itself is immutable; the vote-threshold state is passed in
//! and returned with every frame.
use crate::diagnostics::{elapsed_ms, FrameReport, FullLineStage, SegmentStage, TimingBreakdown};
use crate::edges::canny;
use crate::image::{GrayImage, ImageView, RegionOfInterest, RgbFrame};
use crate::imgproc::{draw_label, threshold, LabelFont, ThresholdKind};
use crate::lanes::{
    draw, find_segments, refine, run_full_line_stage, DrawStyle, LaneCenter, LaneParams,
    LineSegment, Marker, PolarLine, VoteThresholdState,
};
use image::{Luma, Rgb};
use std::time::Instant;

/// Intermediate rasters of one frame, in pipeline order.
#[derive(Clone, Debug)]
pub struct StageImages {
    /// Primary edges, inverted: dark edges on white.
    pub contours_inv: GrayImage,
    /// Full-line mask.
    pub full_lines: GrayImage,
    /// First-pass segment mask.
    pub segments_pass1: GrayImage,
    /// Agreement mask thresholded and inverted.
    pub combined_inv: GrayImage,
    /// Edges feeding the second pass.
    pub contours2: GrayImage,
}

impl StageImages {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &GrayImage)> {
        [
            ("contours_inv", &self.contours_inv),
            ("full_lines", &self.full_lines),
            ("segments_pass1", &self.segments_pass1),
            ("combined_inv", &self.combined_inv),
            ("contours2", &self.contours2),
        ]
        .into_iter()
    }
}

/// Result of processing one frame.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub annotated: RgbFrame,
    pub lane_centers: Vec<LaneCenter>,
    pub kept_lines: Vec<PolarLine>,
    /// Second-pass segments in detection coordinates (before the shift).
    pub segments: Vec<LineSegment>,
    /// State to pass to the next frame.
    pub state: VoteThresholdState,
    pub stages: Option<StageImages>,
    pub report: FrameReport,
}

/// Lane detection over a stream of frames.
#[derive(Clone, Debug)]
pub struct LanePipeline {
    params: LaneParams,
    label_font: Option<LabelFont>,
}

impl Default for LanePipeline {
    fn default() -> Self {
        Self::new(LaneParams::default())
    }
}

impl LanePipeline {
    /// Build a pipeline; the label font is resolved once here.
    pub fn new(params: LaneParams) -> Self {
        let label_font = if params.overlay.line_count_label {
            LabelFont::discover(params.overlay.font_path.as_deref())
        } else {
            None
        };
        Self { params, label_font }
    }

    /// Replace the label font; `None` disables the line-count label.
    pub fn with_label_font(mut self, font: Option<LabelFont>) -> Self {
        self.label_font = font;
        self
    }

    pub fn label_font(&self) -> Option<&LabelFont> {
        self.label_font.as_ref()
    }

    pub fn params(&self) -> &LaneParams {
        &self.params
    }

    /// State for the first frame of a stream.
    pub fn initial_state(&self) -> VoteThresholdState {
        VoteThresholdState::initial(&self.params.full_line)
    }

    /// Crop actually applied to a `width × height` frame.
    pub fn effective_roi(&self, width: usize, height: usize) -> Option<RegionOfInterest> {
        let roi = self.params.roi?;
        let clamped = roi.clamp_to(width, height);
        match clamped {
            None => log::warn!(
                "ROI {:?} does not intersect the {}x{} frame; using the full frame",
                roi,
                width,
                height
            ),
            Some(c) if c != roi => log::warn!("ROI {:?} clamped to {:?}", roi, c),
            _ => {}
        }
        clamped
    }

    /// Process one frame.
    pub fn process(
        &self,
        frame: &RgbFrame,
        state: VoteThresholdState,
        capture_stages: bool,
    ) -> FrameOutput {
        let p = &self.params;
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let gray = frame.to_gray();
        let roi = self.effective_roi(frame.width(), frame.height());
        let work = match &roi {
            Some(r) => gray.crop(r),
            None => gray,
        };

        let t = Instant::now();
        let edges = canny(&work, &p.edges);
        let contours_inv = capture_stages.then(|| {
            threshold(
                &edges,
                p.refine.contour_threshold,
                ThresholdKind::BinaryInv,
                p.refine.contour_otsu,
            )
            .0
        });
        let t = timings.lap("edges", t);

        let full = run_full_line_stage(&edges, state, &p.full_line, p.overlay.mask_value);
        let t = timings.lap("full_line", t);

        let pass1 = find_segments(&edges, &p.pass1);
        let mut pass1_mask = GrayImage::new(work.width(), work.height());
        let mask_style = DrawStyle {
            color: Luma([p.overlay.mask_value]),
            thickness: p.overlay.segment_thickness,
            marker: None,
        };
        draw(
            &mut pass1_mask,
            &pass1,
            &p.pass1.with_vertical_shift(0),
            &p.pairing,
            &mask_style,
        );
        let t = timings.lap("segments_pass1", t);

        let refined = refine(&full.mask, &pass1_mask, &p.refine, &p.refine_edges);
        let t = timings.lap("refine", t);

        let pass2 = find_segments(&refined.edges, &p.pass2);
        let t = timings.lap("segments_pass2", t);

        let shift = roi.map_or(p.pass2.vertical_shift, |r| r.y as i32);
        let mut annotated = frame.clone();
        let frame_style = DrawStyle {
            color: Rgb(p.overlay.segment_color),
            thickness: p.overlay.segment_thickness,
            marker: Some(Marker {
                color: Rgb(p.overlay.center_color),
                radius: p.overlay.center_radius,
                thickness: p.overlay.center_thickness,
            }),
        };
        let drawn = draw(
            &mut annotated,
            &pass2,
            &p.pass2.with_vertical_shift(shift),
            &p.pairing,
            &frame_style,
        );
        for c in &drawn.centers {
            log::info!("lane center x: {} y: {}", c.x, c.y);
        }
        if let Some(font) = &self.label_font {
            let label = format!("Lines Segments: {}", full.raw_count);
            let bottom = annotated.height() as i32 - 10;
            draw_label(
                &mut annotated,
                &label,
                10,
                bottom,
                p.overlay.label_scale,
                p.overlay.label_color,
                font,
            );
        }
        timings.lap("annotate", t);
        timings.total_ms = elapsed_ms(total_start);

        log::debug!(
            "pass1 {} segments, pass2 {} segments, {} drawn, {} centers",
            pass1.len(),
            pass2.len(),
            drawn.drawn.len(),
            drawn.centers.len()
        );

        let report = FrameReport {
            frame_index: 0,
            width: frame.width(),
            height: frame.height(),
            full_line: FullLineStage {
                start_threshold: full.start_threshold,
                end_threshold: full.next_state.threshold,
                transform_calls: full.calls,
                raw_lines: full.raw_count,
                kept_lines: full.lines.clone(),
            },
            segments: SegmentStage {
                pass1_segments: pass1.len(),
                pass2_segments: pass2.len(),
                drawn: drawn.drawn,
            },
            lane_centers: drawn.centers.clone(),
            timings,
        };

        let stages = contours_inv.map(|contours_inv| StageImages {
            contours_inv,
            full_lines: full.mask.clone(),
            segments_pass1: pass1_mask,
            combined_inv: refined.inverted,
            contours2: refined.edges,
        });

        FrameOutput {
            annotated,
            lane_centers: drawn.centers,
            kept_lines: full.lines,
            segments: pass2,
            state: full.next_state,
            stages,
            report,
        }
    }
}
