//! Wave motion: start order follows stage position, not stored order.

use super::traits::TransitionBehavior;
use crate::formation::DancerPosition;

/// Which side of the stage moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveDirection {
    /// Smallest source x starts first.
    LeftToRight,
    /// Largest source x starts first.
    RightToLeft,
}

/// Wave across the stage: dancers are ranked by their source x position
/// and start in rank order, `(rank / n) * spread` into the transition.
///
/// Dancers sharing an x position keep their stored order.
#[derive(Debug, Clone, Copy)]
pub struct Wave {
    /// Direction of travel.
    pub direction: WaveDirection,
    /// Fraction of the transition over which start times are spread.
    pub spread: f32,
}

impl Wave {
    /// Default spread for both wave styles.
    pub const SPREAD: f32 = 0.5;

    /// Stage-left to stage-right wave.
    pub const LEFT_TO_RIGHT: Wave = Wave {
        direction: WaveDirection::LeftToRight,
        spread: Self::SPREAD,
    };

    /// Stage-right to stage-left wave.
    pub const RIGHT_TO_LEFT: Wave = Wave {
        direction: WaveDirection::RightToLeft,
        spread: Self::SPREAD,
    };

    /// Rank of each dancer (by stored index) in start order.
    #[must_use]
    pub fn ranks(&self, source: &[DancerPosition]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..source.len()).collect();
        match self.direction {
            WaveDirection::LeftToRight => {
                order.sort_by(|&a, &b| source[a].x.total_cmp(&source[b].x));
            }
            WaveDirection::RightToLeft => {
                order.sort_by(|&a, &b| source[b].x.total_cmp(&source[a].x));
            }
        }

        let mut ranks = vec![0; source.len()];
        for (rank, idx) in order.into_iter().enumerate() {
            ranks[idx] = rank;
        }
        ranks
    }
}

impl TransitionBehavior for Wave {
    fn stagger_delays(&self, source: &[DancerPosition]) -> Vec<f32> {
        let total = source.len() as f32;
        self.ranks(source)
            .into_iter()
            .map(|rank| rank as f32 / total * self.spread)
            .collect()
    }

    fn name(&self) -> &'static str {
        match self.direction {
            WaveDirection::LeftToRight => "wave-lr",
            WaveDirection::RightToLeft => "wave-rl",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formation::{DancerId, PositionId};

    fn at_x(xs: &[f32]) -> Vec<DancerPosition> {
        xs.iter()
            .enumerate()
            .map(|(i, &x)| DancerPosition {
                id: PositionId(i as u64),
                dancer_id: DancerId(format!("d{i}")),
                name: format!("D{i}"),
                x,
                y: 50.0,
                color: "#000000".to_owned(),
            })
            .collect()
    }

    #[test]
    fn test_left_to_right_ranks_by_ascending_x() {
        let source = at_x(&[70.0, 10.0, 40.0]);
        assert_eq!(Wave::LEFT_TO_RIGHT.ranks(&source), vec![2, 0, 1]);
        let delays = Wave::LEFT_TO_RIGHT.stagger_delays(&source);
        assert_eq!(delays[1], 0.0);
        assert!((delays[0] - 2.0 / 3.0 * 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_right_to_left_ranks_by_descending_x() {
        let source = at_x(&[70.0, 10.0, 40.0]);
        assert_eq!(Wave::RIGHT_TO_LEFT.ranks(&source), vec![0, 2, 1]);
    }

    #[test]
    fn test_ties_keep_stored_order() {
        let source = at_x(&[50.0, 50.0, 50.0]);
        assert_eq!(Wave::LEFT_TO_RIGHT.ranks(&source), vec![0, 1, 2]);
        assert_eq!(Wave::RIGHT_TO_LEFT.ranks(&source), vec![0, 1, 2]);
    }

    #[test]
    fn test_names() {
        assert_eq!(Wave::LEFT_TO_RIGHT.name(), "wave-lr");
        assert_eq!(Wave::RIGHT_TO_LEFT.name(), "wave-rl");
    }
}
