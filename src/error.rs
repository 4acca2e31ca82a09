//! Crate-level error types.

use std::fmt;

/// Errors produced by the choreo crate.
///
/// Editing and playback never fail; only the I/O edges (saved formations,
/// option presets) return this.
#[derive(Debug)]
pub enum ChoreoError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Saved formation JSON could not be read or written.
    SequenceParse(serde_json::Error),
}

impl fmt::Display for ChoreoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::SequenceParse(e) => {
                write!(f, "saved formations parse error: {e}")
            }
        }
    }
}

impl std::error::Error for ChoreoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::SequenceParse(e) => Some(e),
            Self::OptionsParse(_) => None,
        }
    }
}

impl From<std::io::Error> for ChoreoError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ChoreoError {
    fn from(e: serde_json::Error) -> Self {
        Self::SequenceParse(e)
    }
}
