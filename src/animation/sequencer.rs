//! Playback sequencer: drives transition progress over wall-clock time.
//!
//! The host calls [`PlaybackSequencer::tick`] once per animation frame.
//! The sequencer only reads formations; the one thing it moves is the
//! sequence cursor, as each transition lands.

use std::time::Duration;

use serde::Serialize;
use web_time::Instant;

use super::interpolation::{interpolate_formations, PairingPolicy};
use crate::formation::{DancerPosition, Sequence};
use crate::options::{PlaybackOptions, TransitionSpeed};

/// What kind of playback is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackMode {
    /// One transition from the cursor to its successor, then stop there.
    Preview,
    /// Every transition in order, then rewind to the first formation.
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    /// Moving from formation `from` into `from + 1`.
    Transitioning { from: usize, started: Instant },
    /// Showing formation `from + 1` before the cursor moves onto it.
    GapPause { from: usize, started: Instant },
}

/// Snapshot of transient playback state. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    /// Whether preview or full playback is running.
    pub is_playing: bool,
    /// Whether a transition is in flight (as opposed to a gap pause).
    pub is_transitioning: bool,
    /// Progress of the current transition in `[0, 1]`.
    pub progress: f32,
    /// Length of one transition in milliseconds.
    pub speed_ms: u64,
}

/// State machine: `Idle → Transitioning → GapPause → (Transitioning | Idle)`.
#[derive(Debug, Clone)]
pub struct PlaybackSequencer {
    phase: Phase,
    mode: PlaybackMode,
    progress: f32,
    speed: TransitionSpeed,
    gap: Duration,
    pairing: PairingPolicy,
}

impl PlaybackSequencer {
    /// Idle sequencer with the given timing.
    #[must_use]
    pub fn new(options: &PlaybackOptions) -> Self {
        Self {
            phase: Phase::Idle,
            mode: PlaybackMode::Full,
            progress: 0.0,
            speed: options.speed,
            gap: options.gap(),
            pairing: options.pairing,
        }
    }

    /// Change the transition length at `now`.
    ///
    /// A running transition keeps the progress it has reached and covers
    /// the remainder at the new speed.
    pub fn set_speed(&mut self, speed: TransitionSpeed, now: Instant) {
        if let Phase::Transitioning { from, started } = self.phase {
            let reached = self.elapsed_fraction(started, now);
            let started = now
                .checked_sub(speed.duration().mul_f32(reached))
                .unwrap_or(now);
            self.phase = Phase::Transitioning { from, started };
            self.progress = reached;
        }
        self.speed = speed;
    }

    /// Current transition length.
    #[must_use]
    pub fn speed(&self) -> TransitionSpeed {
        self.speed
    }

    /// Adopt new timing and pairing settings at `now`.
    pub fn apply_options(&mut self, options: &PlaybackOptions, now: Instant) {
        self.set_speed(options.speed, now);
        self.gap = options.gap();
        self.pairing = options.pairing;
    }

    /// Whether preview or full playback is running.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. })
    }

    /// Progress of the current transition.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// The running playback mode, if any.
    #[must_use]
    pub fn mode(&self) -> Option<PlaybackMode> {
        self.is_playing().then_some(self.mode)
    }

    /// Source index of the transition currently shown, if any.
    #[must_use]
    pub fn active_transition(&self) -> Option<usize> {
        match self.phase {
            Phase::Idle => None,
            Phase::Transitioning { from, .. } | Phase::GapPause { from, .. } => {
                Some(from)
            }
        }
    }

    /// Snapshot of the transient playback state.
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            is_playing: self.is_playing(),
            is_transitioning: self.is_transitioning(),
            progress: self.progress,
            speed_ms: self.speed.millis(),
        }
    }

    /// Start full playback from the first formation.
    ///
    /// The cursor moves to formation 0 before the first transition, wherever
    /// it was. No-op (returns false) with fewer than two formations or while
    /// already playing.
    pub fn play(&mut self, sequence: &mut Sequence, now: Instant) -> bool {
        if self.is_playing() || sequence.len() < 2 {
            log::debug!(
                "play ignored: {} formation(s), playing={}",
                sequence.len(),
                self.is_playing()
            );
            return false;
        }
        sequence.set_current_index(0);
        self.start(PlaybackMode::Full, 0, now);
        log::info!("full playback started over {} formations", sequence.len());
        true
    }

    /// Preview the single transition out of the current formation.
    ///
    /// No-op (returns false) at the last formation or while playing.
    pub fn preview(&mut self, sequence: &Sequence, now: Instant) -> bool {
        let from = sequence.current_index();
        if self.is_playing() || sequence.transition_pair(from).is_none() {
            log::debug!("preview ignored at formation {from}");
            return false;
        }
        self.start(PlaybackMode::Preview, from, now);
        log::debug!("previewing transition {from} -> {}", from + 1);
        true
    }

    /// Cancel playback immediately. Safe to call in any state.
    pub fn stop(&mut self) {
        if self.is_playing() {
            log::debug!("playback stopped");
        }
        self.phase = Phase::Idle;
        self.progress = 0.0;
    }

    /// Advance to `now`. Returns whether playback is still running.
    pub fn tick(&mut self, sequence: &mut Sequence, now: Instant) -> bool {
        match self.phase {
            Phase::Idle => {}
            Phase::Transitioning { from, started } => {
                if sequence.transition_pair(from).is_none() {
                    self.stop();
                    return false;
                }
                self.progress = self.elapsed_fraction(started, now);
                if self.progress >= 1.0 {
                    self.finish_transition(sequence, from, now);
                }
            }
            Phase::GapPause { from, started } => {
                if now.saturating_duration_since(started) >= self.gap {
                    self.advance(sequence, from + 1, now);
                }
            }
        }
        self.is_playing()
    }

    /// Dancer positions to draw right now: interpolated while a transition
    /// is shown, otherwise the current formation as stored.
    #[must_use]
    pub fn render_positions(&self, sequence: &Sequence) -> Vec<DancerPosition> {
        self.active_transition()
            .and_then(|from| sequence.transition_pair(from))
            .map_or_else(
                || sequence.current().dancers.clone(),
                |(source, target)| {
                    interpolate_formations(
                        source,
                        target,
                        self.progress,
                        self.pairing,
                    )
                },
            )
    }

    fn start(&mut self, mode: PlaybackMode, from: usize, now: Instant) {
        self.mode = mode;
        self.progress = 0.0;
        self.phase = Phase::Transitioning { from, started: now };
    }

    fn elapsed_fraction(&self, started: Instant, now: Instant) -> f32 {
        let total = self.speed.duration();
        if total.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(started);
        (elapsed.as_secs_f32() / total.as_secs_f32()).min(1.0)
    }

    fn finish_transition(
        &mut self,
        sequence: &mut Sequence,
        from: usize,
        now: Instant,
    ) {
        match self.mode {
            PlaybackMode::Preview => {
                sequence.set_current_index(from + 1);
                self.phase = Phase::Idle;
                self.progress = 0.0;
                log::debug!("preview landed on formation {}", from + 1);
            }
            PlaybackMode::Full => {
                self.phase = Phase::GapPause { from, started: now };
            }
        }
    }

    /// Land on `arrived` after a gap pause, then chain or rewind.
    fn advance(&mut self, sequence: &mut Sequence, arrived: usize, now: Instant) {
        sequence.set_current_index(arrived);
        if sequence.transition_pair(arrived).is_some() {
            self.start(PlaybackMode::Full, arrived, now);
        } else {
            sequence.set_current_index(0);
            self.phase = Phase::Idle;
            self.progress = 0.0;
            log::info!("full playback finished, rewound to formation 0");
        }
    }
}

impl Default for PlaybackSequencer {
    fn default() -> Self {
        Self::new(&PlaybackOptions::default())
    }
}
