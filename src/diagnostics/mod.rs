//! Serialisable per-frame and per-run reports.

pub mod frame;
pub mod timing;

pub use frame::{FrameReport, FullLineStage, RunReport, SegmentStage};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
