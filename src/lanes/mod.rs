//! Lane detection stages.
//!
//! - [`full_line`]: adaptive vote-threshold search for long lines, with
//!   orientation filtering and mask rasterisation.
//! - [`line_finder`]: two-profile segment detection and annotation.
//! - [`refine`]: agreement mask between both detectors and its edges.
//! - [`pairing`]: border rejection and the sequential lane-center scan.
//! - [`consistency`]: optional gradient-orientation check of segments.
//!
//! All tunables live in [`LaneParams`]; the only state crossing frames is
//! [`VoteThresholdState`].

pub mod consistency;
pub mod full_line;
pub mod line_finder;
pub mod pairing;
pub mod params;
pub mod refine;

pub use crate::types::{LaneCenter, LineSegment, PolarLine};
pub use consistency::{consistency_ratio, remove_inconsistent_orientations};
pub use full_line::{
    passes_orientation_filter, run_full_line_stage, search_lines, FullLineResult, SearchOutcome,
    VoteThresholdState,
};
pub use line_finder::{draw, find_segments, DrawOutcome, DrawStyle, Marker};
pub use pairing::{inside_border, pair_sequential, retain_inside_border, PairingSlot};
pub use params::{
    AngleBand, DetectorConfig, FullLineParams, LaneParams, OverlayStyle, PairingParams,
    RefineParams,
};
pub use refine::{refine, Refinement};
