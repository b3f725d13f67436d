//! Multiply-with-carry generator used to pick the visiting order of edge
//! points in the probabilistic transform.
//!
//! The recurrence is the one used by OpenCV's `cv::RNG`, so a given edge map
//! is always visited in the same order and detection is reproducible.

const MWC_COEFF: u64 = 4_164_903_690;

#[derive(Clone, Debug)]
pub struct MwcRng {
    state: u64,
}

impl MwcRng {
    /// A zero seed is replaced by `0xffff_ffff`.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 0xffff_ffff } else { seed },
        }
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = (self.state as u32 as u64)
            .wrapping_mul(MWC_COEFF)
            .wrapping_add(self.state >> 32);
        self.state as u32
    }

    /// Integer in `[a, b)`; returns `a` when the range is empty.
    #[inline]
    pub fn uniform(&mut self, a: usize, b: usize) -> usize {
        if a >= b {
            return a;
        }
        a + (self.next_u32() as usize) % (b - a)
    }
}

impl Default for MwcRng {
    fn default() -> Self {
        Self::new(u64::MAX)
    }
}
