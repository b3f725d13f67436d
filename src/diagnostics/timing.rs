use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Wall-clock duration of one pipeline stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Per-frame timing trace, stages in execution order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    /// Record the time elapsed since `start` under `label` and return a
    /// fresh instant for the next stage.
    pub fn lap(&mut self, label: impl Into<String>, start: Instant) -> Instant {
        self.push(label, elapsed_ms(start));
        Instant::now()
    }

    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

#[inline]
pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laps_are_recorded_in_order() {
        let mut t = TimingBreakdown::default();
        let start = Instant::now();
        let next = t.lap("edges", start);
        t.lap("hough", next);
        let labels: Vec<&str> = t.stages.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["edges", "hough"]);
        assert!(t.stage_ms("edges").is_some_and(|ms| ms >= 0.0));
        assert!(t.stage_ms("missing").is_none());
    }

    #[test]
    fn serialises_camel_case() {
        let mut t = TimingBreakdown::default();
        t.push("edges", 1.5);
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"totalMs\""), "{json}");
        assert!(json.contains("\"elapsedMs\":1.5"), "{json}");
    }
}
