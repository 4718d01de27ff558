//! Scroll-convergence detection.
//!
//! Lazy-loaded result pages grow while the browser scrolls. The tracker
//! watches consecutive height measurements and reports the page as settled
//! once the height stops growing for a configured number of checks in a row.

/// Outcome of a single post-scroll height measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollState {
    /// Height increased since the last measurement.
    Grew,
    /// Height unchanged, but not yet enough consecutive checks to stop.
    Stagnant,
    /// Height unchanged for the configured number of consecutive checks.
    Settled,
}

#[derive(Debug)]
pub struct ScrollTracker {
    last_height: i64,
    stagnant_checks: u32,
    threshold: u32,
}

impl ScrollTracker {
    pub fn new(initial_height: i64, threshold: u32) -> Self {
        Self {
            last_height: initial_height,
            stagnant_checks: 0,
            threshold,
        }
    }

    /// Feed one height measurement. Any growth resets the stagnation count;
    /// the page counts as settled only after `threshold` unchanged
    /// measurements in a row.
    pub fn observe(&mut self, height: i64) -> ScrollState {
        if height == self.last_height {
            self.stagnant_checks += 1;
            if self.stagnant_checks >= self.threshold {
                ScrollState::Settled
            } else {
                ScrollState::Stagnant
            }
        } else {
            self.stagnant_checks = 0;
            self.last_height = height;
            ScrollState::Grew
        }
    }

    pub fn last_height(&self) -> i64 {
        self.last_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drives the tracker with a simulated height sequence and returns the
    /// number of observations made before it settled.
    fn checks_until_settled(initial: i64, heights: &[i64], threshold: u32) -> usize {
        let mut tracker = ScrollTracker::new(initial, threshold);
        for (i, &height) in heights.iter().enumerate() {
            if tracker.observe(height) == ScrollState::Settled {
                return i + 1;
            }
        }
        panic!("height sequence never settled");
    }

    #[test]
    fn test_settles_after_threshold_stagnant_checks() {
        // Height grows for k = 4 scrolls, then stops changing. The loop must
        // perform exactly k + 3 checks before stopping.
        let heights = [1200, 1800, 2400, 3000, 3000, 3000, 3000];
        assert_eq!(checks_until_settled(1000, &heights, 3), 7);
    }

    #[test]
    fn test_immediate_stagnation() {
        // No growth at all: settles on the third check.
        let heights = [1000, 1000, 1000];
        assert_eq!(checks_until_settled(1000, &heights, 3), 3);
    }

    #[test]
    fn test_growth_resets_stagnation_count() {
        let mut tracker = ScrollTracker::new(1000, 3);
        assert_eq!(tracker.observe(1000), ScrollState::Stagnant);
        assert_eq!(tracker.observe(1000), ScrollState::Stagnant);
        // Late content arrives: the count starts over.
        assert_eq!(tracker.observe(1600), ScrollState::Grew);
        assert_eq!(tracker.observe(1600), ScrollState::Stagnant);
        assert_eq!(tracker.observe(1600), ScrollState::Stagnant);
        assert_eq!(tracker.observe(1600), ScrollState::Settled);
    }

    #[test]
    fn test_tracks_latest_height() {
        let mut tracker = ScrollTracker::new(1000, 3);
        tracker.observe(2500);
        assert_eq!(tracker.last_height(), 2500);
        tracker.observe(2500);
        assert_eq!(tracker.last_height(), 2500);
    }

    #[test]
    fn test_custom_threshold() {
        let heights = [500, 500];
        assert_eq!(checks_until_settled(500, &heights, 2), 2);
    }
}
