//! Border rejection and sequential lane-center pairing.
//!
//! Pairing only ever compares a segment with the immediately preceding
//! retained one; interleaved segments can therefore produce spurious or
//! missed pairs.
use super::params::PairingParams;
use crate::types::{LaneCenter, LineSegment, Point};

/// True when both endpoints lie in `[margin, width - margin]` horizontally.
#[inline]
pub fn inside_border(segment: &LineSegment, width: i32, margin: i32) -> bool {
    let ok = |x: i32| x >= margin && x <= width - margin;
    ok(segment.x1) && ok(segment.x2)
}

/// Segments surviving the border filter, in input order.
pub fn retain_inside_border(segments: &[LineSegment], width: usize, margin: i32) -> Vec<LineSegment> {
    segments
        .iter()
        .copied()
        .filter(|s| inside_border(s, width as i32, margin))
        .collect()
}

/// Single-entry buffer of the pairing scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PairingSlot {
    held: Option<Point>,
}

impl PairingSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<Point> {
        self.held
    }

    /// Offer the first endpoint of the next retained segment. Emits the
    /// midpoint when the buffered point lies inside the lane-width window,
    /// clearing the buffer; otherwise the point replaces the buffer.
    pub fn offer(&mut self, p: Point, params: &PairingParams) -> Option<LaneCenter> {
        if let Some(q) = self.held {
            let dx = (q.x - p.x).abs();
            if dx > params.lane_width_min && dx < params.lane_width_max {
                self.held = None;
                return Some(LaneCenter::midpoint(q, p));
            }
        }
        self.held = Some(p);
        None
    }
}

/// Scan already filtered segments in order and collect lane centers.
pub fn pair_sequential(segments: &[LineSegment], params: &PairingParams) -> Vec<LaneCenter> {
    let mut slot = PairingSlot::new();
    segments
        .iter()
        .filter_map(|s| slot.offer(s.start(), params))
        .collect()
}
