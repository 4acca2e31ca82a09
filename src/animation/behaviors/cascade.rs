//! Cascade motion with staggered per-dancer delays in stored order.

use super::traits::TransitionBehavior;
use crate::formation::DancerPosition;

/// Cascade where dancers start one after another in stored order.
///
/// # Timing
///
/// Dancer `i` of `n` starts at global progress `(i / n) * spread`:
/// - Dancer 0: starts immediately
/// - Dancer n-1: starts at just under `spread`
///
/// Every dancer still arrives at global progress 1, so later dancers
/// move faster.
#[derive(Debug, Clone, Copy)]
pub struct Cascade {
    /// Fraction of the transition over which start times are spread.
    pub spread: f32,
    name: &'static str,
}

impl Cascade {
    /// Light ripple used by the `staggered` style.
    pub const STAGGERED: Cascade = Cascade {
        spread: 0.3,
        name: "staggered",
    };

    /// Widest spread of any style, used by the `cascade` style.
    pub const FULL: Cascade = Cascade {
        spread: 0.7,
        name: "cascade",
    };

    /// Start delay for dancer `idx` of `total`.
    #[must_use]
    pub fn delay_for(&self, idx: usize, total: usize) -> f32 {
        if total == 0 {
            return 0.0;
        }
        idx as f32 / total as f32 * self.spread
    }
}

impl Default for Cascade {
    fn default() -> Self {
        Self::FULL
    }
}

impl TransitionBehavior for Cascade {
    fn stagger_delays(&self, source: &[DancerPosition]) -> Vec<f32> {
        let total = source.len();
        (0..total).map(|i| self.delay_for(i, total)).collect()
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_dancer_starts_immediately() {
        assert_eq!(Cascade::FULL.delay_for(0, 10), 0.0);
        assert_eq!(Cascade::STAGGERED.delay_for(0, 10), 0.0);
    }

    #[test]
    fn test_delays_scale_with_spread() {
        // 4 dancers, dancer 2: 2/4 of the spread
        assert!((Cascade::STAGGERED.delay_for(2, 4) - 0.15).abs() < 1e-6);
        assert!((Cascade::FULL.delay_for(2, 4) - 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_last_delay_stays_below_spread() {
        let d = Cascade::FULL.delay_for(99, 100);
        assert!(d < 0.7);
        assert!(d > 0.69);
    }

    #[test]
    fn test_names_follow_style() {
        assert_eq!(Cascade::STAGGERED.name(), "staggered");
        assert_eq!(Cascade::FULL.name(), "cascade");
    }

    #[test]
    fn test_zero_dancers() {
        assert_eq!(Cascade::default().delay_for(0, 0), 0.0);
        assert!(Cascade::default().stagger_delays(&[]).is_empty());
    }
}
