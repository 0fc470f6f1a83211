//! Transition-timing ring used by the channel monitor.

use crate::timings::Category;

/// Default number of inter-edge durations kept by the ring.
pub const DEFAULT_RING_LEN: usize = 16;

/// Fixed-size ring of the most recent inter-edge durations.
///
/// Filled from the edge interrupt while the channel monitor is active,
/// evaluated from the foreground. One slot per edge, overwriting the
/// oldest once full.
pub struct TimingRing<const N: usize> {
    buf: [u32; N],
    at: usize,
    cycled: bool,
    last_edge: u32,
}

impl<const N: usize> TimingRing<N> {
    pub const fn new() -> Self {
        TimingRing {
            buf: [0; N],
            at: 0,
            cycled: false,
            last_edge: 0,
        }
    }

    /// Restart a capture round. Stale slot contents are not cleared;
    /// the evaluation only runs after the ring has wrapped once, at
    /// which point every slot is fresh.
    pub fn reset(&mut self) {
        self.at = 0;
        self.cycled = false;
    }

    /// Record one edge timestamp (µs, wrapping).
    pub fn record(&mut self, ts: u32) {
        self.buf[self.at] = ts.wrapping_sub(self.last_edge);
        self.last_edge = ts;

        self.at += 1;
        if self.at >= N {
            self.at = 0;
            self.cycled = true;
        }
    }

    /// True once the ring has wrapped at least once since the last
    /// reset.
    pub fn has_cycled(&self) -> bool {
        self.cycled
    }

    /// Share of slots holding a code-like duration, in percent
    /// (0..=100).
    pub fn code_like_percent(&self) -> u32 {
        let mut hits = 0u32;
        for &dt in self.buf.iter() {
            if Category::from_duration(dt).is_code_like() {
                hits += 1;
            }
        }
        100 * hits / N as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill<const N: usize>(ring: &mut TimingRing<N>, durations: &[u32]) {
        let mut ts = ring.last_edge;
        for &dt in durations {
            ts = ts.wrapping_add(dt);
            ring.record(ts);
        }
    }

    #[test]
    fn cycles_after_n_records() {
        let mut ring: TimingRing<16> = TimingRing::new();
        fill(&mut ring, &[300; 15]);
        assert!(!ring.has_cycled());
        fill(&mut ring, &[300; 1]);
        assert!(ring.has_cycled());
    }

    #[test]
    fn reset_clears_cycled() {
        let mut ring: TimingRing<16> = TimingRing::new();
        fill(&mut ring, &[300; 16]);
        assert!(ring.has_cycled());
        ring.reset();
        assert!(!ring.has_cycled());
    }

    #[test]
    fn percent_over_mixed_content() {
        let mut ring: TimingRing<16> = TimingRing::new();
        // 12 code-like, 4 noise.
        fill(&mut ring, &[300; 6]);
        fill(&mut ring, &[900; 6]);
        fill(&mut ring, &[3000; 4]);
        assert_eq!(ring.code_like_percent(), 75);
    }

    #[test]
    fn percent_tracks_most_recent_window() {
        let mut ring: TimingRing<16> = TimingRing::new();
        fill(&mut ring, &[300; 16]);
        assert_eq!(ring.code_like_percent(), 100);

        // Noise overwrites the oldest slots.
        fill(&mut ring, &[3000; 16]);
        assert_eq!(ring.code_like_percent(), 0);
    }

    #[test]
    fn separator_counts_as_code_like() {
        let mut ring: TimingRing<4> = TimingRing::new();
        fill(&mut ring, &[8000, 300, 900, 8000]);
        assert_eq!(ring.code_like_percent(), 100);
    }
}
