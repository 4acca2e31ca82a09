use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::interpolation::PairingPolicy;

/// Wall-clock length of a single formation-to-formation transition.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TransitionSpeed {
    /// One second per transition.
    Fast,
    /// Two seconds per transition.
    #[default]
    Normal,
    /// Three seconds per transition.
    Slow,
}

impl TransitionSpeed {
    /// Transition length in milliseconds.
    #[must_use]
    pub const fn millis(self) -> u64 {
        match self {
            Self::Fast => 1000,
            Self::Normal => 2000,
            Self::Slow => 3000,
        }
    }

    /// Transition length as a [`Duration`].
    #[must_use]
    pub const fn duration(self) -> Duration {
        Duration::from_millis(self.millis())
    }
}

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema,
)]
#[schemars(title = "Playback", inline)]
#[serde(default)]
/// Playback sequencer timing and dancer pairing.
pub struct PlaybackOptions {
    /// Duration of each transition.
    #[schemars(title = "Speed")]
    pub speed: TransitionSpeed,
    /// Settle delay between chained transitions in full playback.
    #[schemars(title = "Gap (ms)", range(min = 0, max = 5000))]
    pub gap_ms: u64,
    /// How dancers in consecutive formations are matched up.
    #[schemars(title = "Pairing")]
    pub pairing: PairingPolicy,
}

impl PlaybackOptions {
    /// Settle delay as a [`Duration`].
    #[must_use]
    pub const fn gap(&self) -> Duration {
        Duration::from_millis(self.gap_ms)
    }
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            speed: TransitionSpeed::Normal,
            gap_ms: 500,
            pairing: PairingPolicy::ById,
        }
    }
}
