//! Read-only query methods and lifecycle helpers for
//! [`ChoreographyEngine`].

use std::path::Path;

use web_time::Instant;

use super::{construction, ChoreographyEngine};
use crate::animation::PlaybackState;
use crate::error::ChoreoError;
use crate::formation::{Sequence, StageMarker};
use crate::options::Options;

// ── Queries ──

impl ChoreographyEngine {
    /// The saved formation sequence and its cursor.
    #[must_use]
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Transient playback state for the controls.
    #[must_use]
    pub fn playback_state(&self) -> PlaybackState {
        self.sequencer.state()
    }

    /// Markers to draw this frame: interpolated during playback, the
    /// current formation otherwise.
    #[must_use]
    pub fn render_markers(&self) -> Vec<StageMarker> {
        self.sequencer
            .render_positions(&self.sequence)
            .iter()
            .map(StageMarker::from)
            .collect()
    }

    /// Formation array for the storage collaborator.
    pub fn to_json(&self) -> Result<String, ChoreoError> {
        self.sequence.to_json()
    }
}

// ── Lifecycle ──

impl ChoreographyEngine {
    /// Advance playback to `now`. Returns whether playback is still
    /// running.
    ///
    /// Call once per animation frame:
    /// ```ignore
    /// engine.tick(Instant::now());
    /// draw(engine.render_markers());
    /// ```
    pub fn tick(&mut self, now: Instant) -> bool {
        self.sequencer.tick(&mut self.sequence, now)
    }

    /// Replace the active options. A running transition keeps its progress
    /// under the new timing; a new cluster seed restarts the seeded stream.
    pub fn set_options(&mut self, options: Options) {
        self.sequencer.apply_options(&options.playback, Instant::now());
        if options.layout != self.options.layout {
            self.cluster_rng = construction::cluster_rng(&options.layout);
        }
        self.options = options;
    }

    /// Load a TOML preset and make it the active options.
    pub fn load_preset(&mut self, path: &Path) -> Result<(), ChoreoError> {
        let options = Options::load(path).inspect_err(|e| {
            log::error!("failed to load preset {}: {e}", path.display());
        })?;
        log::info!("loaded options preset {}", path.display());
        self.set_options(options);
        Ok(())
    }

    /// Save the active options as a TOML preset.
    pub fn save_preset(&self, path: &Path) -> Result<(), ChoreoError> {
        self.options.save(path).inspect_err(|e| {
            log::error!("failed to save preset {}: {e}", path.display());
        })
    }
}
