//! Centralized engine options with TOML preset support.
//!
//! Playback timing, stage geometry and layout generation settings are
//! consolidated here. Options serialize to/from TOML so a studio can keep
//! named presets (e.g. a slow rehearsal preset) next to its choreography.

mod layout;
mod playback;
mod stage;

use std::path::Path;

pub use layout::LayoutOptions;
pub use playback::{PlaybackOptions, TransitionSpeed};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use stage::{StageOptions, DEFAULT_PALETTE};

use crate::error::ChoreoError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[playback]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Playback sequencer settings.
    pub playback: PlaybackOptions,
    /// Stage geometry and colors.
    pub stage: StageOptions,
    /// Layout template settings.
    pub layout: LayoutOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ChoreoError> {
        let content = std::fs::read_to_string(path).map_err(ChoreoError::Io)?;
        toml::from_str(&content)
            .map_err(|e| ChoreoError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ChoreoError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ChoreoError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ChoreoError::Io)?;
        }
        std::fs::write(path, content).map_err(ChoreoError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
