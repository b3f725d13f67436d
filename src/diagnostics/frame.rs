use super::timing::TimingBreakdown;
use crate::types::{LaneCenter, LineSegment, PolarLine};
use serde::{Deserialize, Serialize};

/// Summary of the full-line search of one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullLineStage {
    pub start_threshold: i32,
    pub end_threshold: i32,
    pub transform_calls: usize,
    pub raw_lines: usize,
    pub kept_lines: Vec<PolarLine>,
}

/// Segment counts of both detection passes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentStage {
    pub pass1_segments: usize,
    pub pass2_segments: usize,
    /// Pass-2 segments drawn on the frame, vertical shift applied.
    pub drawn: Vec<LineSegment>,
}

/// Everything reported for one processed frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    pub frame_index: usize,
    pub width: usize,
    pub height: usize,
    pub full_line: FullLineStage,
    pub segments: SegmentStage,
    pub lane_centers: Vec<LaneCenter>,
    pub timings: TimingBreakdown,
}

impl FrameReport {
    /// One-line summary used in the run log.
    pub fn summary(&self) -> String {
        format!(
            "frame {}: threshold {}->{} ({} calls), lines {}/{}, segments {}/{}, centers {}, {:.1} ms",
            self.frame_index,
            self.full_line.start_threshold,
            self.full_line.end_threshold,
            self.full_line.transform_calls,
            self.full_line.kept_lines.len(),
            self.full_line.raw_lines,
            self.segments.pass1_segments,
            self.segments.pass2_segments,
            self.lane_centers.len(),
            self.timings.total_ms
        )
    }
}

/// Aggregate written at the end of a run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub input: String,
    pub frames_processed: usize,
    pub frames_with_center: usize,
    pub total_ms: f64,
    pub frames: Vec<FrameReport>,
}

impl RunReport {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    pub fn record(&mut self, frame: FrameReport) {
        self.frames_processed += 1;
        if !frame.lane_centers.is_empty() {
            self.frames_with_center += 1;
        }
        self.total_ms += frame.timings.total_ms;
        self.frames.push(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_report_counts_frames_with_centers() {
        let mut run = RunReport::new("clip.gif");
        run.record(FrameReport::default());
        run.record(FrameReport {
            frame_index: 1,
            lane_centers: vec![LaneCenter { x: 10, y: 20 }],
            ..FrameReport::default()
        });
        assert_eq!(run.frames_processed, 2);
        assert_eq!(run.frames_with_center, 1);
        let json = serde_json::to_value(&run).unwrap();
        assert_eq!(json["framesWithCenter"], 1);
        assert_eq!(json["frames"][1]["laneCenters"][0]["x"], 10);
    }

    #[test]
    fn summary_mentions_thresholds() {
        let report = FrameReport {
            full_line: FullLineStage {
                start_threshold: 200,
                end_threshold: 175,
                transform_calls: 5,
                ..FullLineStage::default()
            },
            ..FrameReport::default()
        };
        assert!(report.summary().contains("threshold 200->175 (5 calls)"));
    }
}
