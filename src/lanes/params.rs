use crate::edges::CannyParams;
use crate::image::{RegionOfInterest, Rgb};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::PathBuf;

/// Open angular interval `(min, max)` in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AngleBand {
    pub min: f32,
    pub max: f32,
}

impl AngleBand {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Both bounds exclusive.
    #[inline]
    pub fn contains(&self, theta: f32) -> bool {
        self.min < theta && theta < self.max
    }
}

/// Adaptive full-line search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FullLineParams {
    /// Starting vote threshold after a lost or noisy frame.
    pub baseline_vote: i32,
    /// Increment applied to the previous threshold after a stable frame.
    pub vote_step_up: i32,
    /// Threshold decrement between two transform invocations.
    pub search_decrement: i32,
    /// The search stops once the transform returns this many lines.
    pub min_lines_to_stop: usize,
    /// A previous line count in `[stable_min, stable_max]` keeps the threshold growing.
    pub stable_min: usize,
    pub stable_max: usize,
    /// Accepted orientations; the gap between them excludes near-vertical lines.
    pub bands: Vec<AngleBand>,
    pub rho_res: f64,
    pub theta_res: f64,
    pub mask_thickness: i32,
}

impl Default for FullLineParams {
    fn default() -> Self {
        Self {
            baseline_vote: 200,
            vote_step_up: 25,
            search_decrement: 5,
            min_lines_to_stop: 5,
            stable_min: 2,
            stable_max: 2,
            bands: vec![AngleBand::new(0.09, 1.48), AngleBand::new(1.66, 3.14)],
            rho_res: 1.0,
            theta_res: PI / 180.0,
            mask_thickness: 8,
        }
    }
}

/// Geometry profile of one segment detection pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Distance resolution of the accumulator in pixels.
    pub rho_res: f64,
    /// Angle resolution of the accumulator in radians.
    pub theta_res: f64,
    pub min_vote: i32,
    pub min_length: i32,
    pub max_gap: i32,
    /// Added to both endpoint rows before drawing.
    pub vertical_shift: i32,
}

impl DetectorConfig {
    pub fn new(
        rho_res: f64,
        theta_res: f64,
        min_vote: i32,
        min_length: i32,
        max_gap: i32,
        vertical_shift: i32,
    ) -> Self {
        Self {
            rho_res,
            theta_res,
            min_vote,
            min_length,
            max_gap,
            vertical_shift,
        }
    }

    /// Strict first pass: long segments with small gaps.
    pub fn pass1() -> Self {
        Self::new(1.0, PI / 180.0, 4, 60, 10, 0)
    }

    /// Loose second pass over the refined edges.
    pub fn pass2() -> Self {
        Self::new(1.0, PI / 180.0, 1, 1, 1, 0)
    }

    pub fn with_vertical_shift(mut self, shift: i32) -> Self {
        self.vertical_shift = shift;
        self
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self::new(1.0, PI / 180.0, 10, 0, 0, 0)
    }
}

/// Border rejection and lane-width window of the pairing scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairingParams {
    pub border_margin: i32,
    /// Exclusive bounds on the horizontal distance between paired endpoints.
    pub lane_width_min: i32,
    pub lane_width_max: i32,
}

impl Default for PairingParams {
    fn default() -> Self {
        Self {
            border_margin: 10,
            lane_width_min: 30,
            lane_width_max: 70,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefineParams {
    /// Threshold applied (inverted) to the combined mask.
    pub combine_threshold: u8,
    /// Threshold of the inverted contour visual.
    pub contour_threshold: u8,
    pub contour_otsu: bool,
}

impl Default for RefineParams {
    fn default() -> Self {
        Self {
            combine_threshold: 150,
            contour_threshold: 128,
            contour_otsu: true,
        }
    }
}

/// Colours and sizes of the annotation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    pub segment_color: Rgb,
    pub segment_thickness: i32,
    pub center_color: Rgb,
    pub center_radius: i32,
    pub center_thickness: i32,
    /// Value written into masks.
    pub mask_value: u8,
    /// Print the full-line count in the bottom-left corner.
    pub line_count_label: bool,
    pub label_color: Rgb,
    /// Glyph height in pixels.
    pub label_scale: f32,
    /// TrueType/OpenType font for the label; common system fonts are tried
    /// when unset or unreadable.
    pub font_path: Option<PathBuf>,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            segment_color: [0, 0, 255],
            segment_thickness: 6,
            center_color: [0, 255, 0],
            center_radius: 3,
            center_thickness: 10,
            mask_value: 255,
            line_count_label: true,
            label_color: [255, 0, 0],
            label_scale: 20.0,
            font_path: None,
        }
    }
}

/// Every tunable of the per-frame pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneParams {
    pub edges: CannyParams,
    pub refine_edges: CannyParams,
    pub full_line: FullLineParams,
    pub pass1: DetectorConfig,
    pub pass2: DetectorConfig,
    pub pairing: PairingParams,
    pub refine: RefineParams,
    /// Crop applied before detection; `None` processes the full frame.
    pub roi: Option<RegionOfInterest>,
    pub overlay: OverlayStyle,
}

impl Default for LaneParams {
    fn default() -> Self {
        Self {
            edges: CannyParams::new(160.0, 480.0, 3),
            refine_edges: CannyParams::new(100.0, 350.0, 3),
            full_line: FullLineParams::default(),
            pass1: DetectorConfig::pass1(),
            pass2: DetectorConfig::pass2(),
            pairing: PairingParams::default(),
            refine: RefineParams::default(),
            roi: None,
            overlay: OverlayStyle::default(),
        }
    }
}
