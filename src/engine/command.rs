//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a toolbar button, a
//! drag gesture, or a programmatic call, is represented as a
//! `ChoreographyCommand`. Consumers construct commands and pass them to
//! [`ChoreographyEngine::execute`](super::ChoreographyEngine::execute).

use crate::formation::{DancerId, LayoutTemplate, TransitionStyle};
use crate::options::TransitionSpeed;

/// A discrete or parameterized operation the engine can perform.
///
/// The engine never cares *how* a command was triggered:
///
/// ```ignore
/// engine.execute(ChoreographyCommand::AddFormation);
/// engine.execute(ChoreographyCommand::Mirror { formation: 2 });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ChoreographyCommand {
    // ── Formation list ──────────────────────────────────────────────
    /// Move the editing cursor.
    SelectFormation {
        /// Formation to view/edit.
        index: usize,
    },

    /// Append a copy of the last formation.
    AddFormation,

    /// Insert a copy of a formation right after it.
    DuplicateFormation {
        /// Formation to copy.
        index: usize,
    },

    /// Remove a formation (never the last remaining one).
    DeleteFormation {
        /// Formation to remove.
        index: usize,
    },

    /// Rename a formation.
    RenameFormation {
        /// Formation to rename.
        index: usize,
        /// New display name.
        name: String,
    },

    /// Replace a formation's count annotation.
    SetCountLabel {
        /// Formation to annotate.
        index: usize,
        /// New label, e.g. "9-16".
        label: String,
    },

    /// Set how dancers arrive at a formation.
    SetTransitionStyle {
        /// Target formation (ignored for the first).
        formation: usize,
        /// Arrival style.
        style: TransitionStyle,
    },

    // ── Positions ───────────────────────────────────────────────────
    /// Re-place every dancer of a formation with a template.
    ApplyTemplate {
        /// Formation to lay out.
        formation: usize,
        /// Layout to apply.
        template: LayoutTemplate,
    },

    /// Move one dancer in one formation (clamped to the stage margin).
    DragDancer {
        /// Formation being edited.
        formation: usize,
        /// Dancer being dragged.
        dancer: DancerId,
        /// Percent of stage width.
        x: f32,
        /// Percent of stage depth.
        y: f32,
    },

    /// Flip a formation left-to-right.
    Mirror {
        /// Formation to flip.
        formation: usize,
    },

    // ── Cast ────────────────────────────────────────────────────────
    /// Add a new dancer to every formation.
    AddDancer,

    /// Remove a dancer from every formation.
    RemoveDancer {
        /// Dancer to remove.
        dancer: DancerId,
    },

    /// Rename a dancer in every formation.
    RenameDancer {
        /// Dancer to rename.
        dancer: DancerId,
        /// New display name.
        name: String,
    },

    // ── Playback ────────────────────────────────────────────────────
    /// Change the transition length.
    SetSpeed(TransitionSpeed),

    /// Play every transition from the first formation.
    ///
    /// The cursor jumps to formation 0 before the first transition starts,
    /// whatever formation was selected, and rests there again when playback
    /// finishes.
    Play,

    /// Preview the transition out of the current formation.
    Preview,

    /// Cancel playback.
    Stop,
}

impl ChoreographyCommand {
    /// Whether this command changes the saved sequence (or its cursor).
    /// Such commands are ignored while playback runs.
    #[must_use]
    pub const fn is_edit(&self) -> bool {
        !matches!(
            self,
            Self::SetSpeed(_) | Self::Play | Self::Preview | Self::Stop
        )
    }
}
