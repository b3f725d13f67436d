//! Adaptive full-line stage.
//!
//! The vote threshold is a small feedback loop across frames: it grows by a
//! fixed step while the previous frame found a stable number of lines and
//! snaps back to the baseline otherwise. Within a frame the threshold is
//! lowered until enough lines are returned or it reaches zero.
use super::params::{AngleBand, FullLineParams};
use crate::hough::hough_lines;
use crate::image::{GrayImage, ImageView};
use crate::imgproc::draw_line;
use crate::types::PolarLine;
use image::Luma;
use serde::{Deserialize, Serialize};

/// Vote-threshold state carried from one frame to the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteThresholdState {
    /// Threshold left by the previous frame's search.
    pub threshold: i32,
    /// Lines returned by the previous frame's last transform call.
    pub line_count: usize,
}

impl VoteThresholdState {
    /// State before the first frame; forces the baseline.
    pub fn initial(params: &FullLineParams) -> Self {
        Self {
            threshold: params.baseline_vote,
            line_count: 0,
        }
    }

    /// Starting threshold for the next search. A line count outside the
    /// stable range restarts from the baseline; otherwise the previous
    /// threshold grows by one step, even when the search ran it down to zero.
    pub fn next_baseline(&self, params: &FullLineParams) -> i32 {
        if self.line_count < params.stable_min || self.line_count > params.stable_max {
            params.baseline_vote
        } else {
            self.threshold + params.vote_step_up
        }
    }
}

impl Default for VoteThresholdState {
    fn default() -> Self {
        Self::initial(&FullLineParams::default())
    }
}

#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub lines: Vec<PolarLine>,
    /// Threshold after the final decrement.
    pub threshold: i32,
    pub calls: usize,
}

/// Lower the threshold from `baseline` until `transform` returns at least
/// `min_lines_to_stop` lines or the threshold is no longer positive.
///
/// `transform` is never called with a non-positive threshold.
pub fn search_lines<F>(baseline: i32, params: &FullLineParams, mut transform: F) -> SearchOutcome
where
    F: FnMut(i32) -> Vec<PolarLine>,
{
    let step = params.search_decrement.max(1);
    let mut threshold = baseline;
    let mut lines = Vec::new();
    let mut calls = 0;
    while lines.len() < params.min_lines_to_stop && threshold > 0 {
        lines = transform(threshold);
        calls += 1;
        threshold -= step;
    }
    SearchOutcome {
        lines,
        threshold,
        calls,
    }
}

/// True when `theta` falls inside one of the accepted bands.
pub fn passes_orientation_filter(theta: f32, bands: &[AngleBand]) -> bool {
    bands.iter().any(|band| band.contains(theta))
}

/// Everything the full-line stage produces for one frame.
#[derive(Clone, Debug)]
pub struct FullLineResult {
    /// Lines that passed the orientation filter, in transform order.
    pub lines: Vec<PolarLine>,
    /// Lines returned by the last transform call, before filtering.
    pub raw_count: usize,
    pub calls: usize,
    pub start_threshold: i32,
    pub next_state: VoteThresholdState,
    /// Kept lines rasterised across the full height.
    pub mask: GrayImage,
}

/// Run the adaptive search on `edges` and rasterise the kept lines.
pub fn run_full_line_stage(
    edges: &GrayImage,
    state: VoteThresholdState,
    params: &FullLineParams,
    mask_value: u8,
) -> FullLineResult {
    let start_threshold = state.next_baseline(params);
    let outcome = search_lines(start_threshold, params, |threshold| {
        hough_lines(edges, params.rho_res, params.theta_res, threshold)
    });
    let raw_count = outcome.lines.len();
    let lines: Vec<PolarLine> = outcome
        .lines
        .into_iter()
        .filter(|line| passes_orientation_filter(line.theta, &params.bands))
        .collect();

    log::debug!(
        "full-line stage: start {} end {} calls {} raw {} kept {}",
        start_threshold,
        outcome.threshold,
        outcome.calls,
        raw_count,
        lines.len()
    );

    let mut mask = GrayImage::new(edges.width(), edges.height());
    for line in &lines {
        let (top, bottom) = line.row_endpoints(edges.height());
        draw_line(&mut mask, top, bottom, Luma([mask_value]), params.mask_thickness);
    }

    FullLineResult {
        lines,
        raw_count,
        calls: outcome.calls,
        start_threshold,
        next_state: VoteThresholdState {
            threshold: outcome.threshold,
            line_count: raw_count,
        },
        mask,
    }
}
