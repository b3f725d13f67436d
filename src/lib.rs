#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod image;
pub mod lanes;
pub mod pipeline;
pub mod types;

// Building blocks the stages are made of.
pub mod edges;
pub mod hough;
pub mod imgproc;

// Tool plumbing.
pub mod config;
pub mod video;

// --- High-level re-exports -------------------------------------------------

pub use crate::lanes::{LaneParams, VoteThresholdState};
pub use crate::pipeline::{FrameOutput, LanePipeline};
pub use crate::types::{LaneCenter, LineSegment, Point, PolarLine};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use lane_detector::prelude::*;
///
/// # fn main() {
/// let pipeline = LanePipeline::new(LaneParams::default());
/// let mut state = pipeline.initial_state();
/// let frame = RgbFrame::filled(640, 480, [0, 0, 0]);
///
/// let out = pipeline.process(&frame, state, false);
/// state = out.state;
/// println!("centers={:?} next_threshold={}", out.lane_centers, state.threshold);
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{GrayImage, RgbFrame};
    pub use crate::{LaneCenter, LaneParams, LanePipeline, VoteThresholdState};
}
