//! Stage formations: the durable choreography data.
//!
//! A [`Formation`] is one named snapshot of every dancer's stage position;
//! a [`Sequence`] is the ordered, never-empty list of them. Coordinates are
//! percentages of stage width/height, `(0, 0)` upstage-left and `(100, 100)`
//! downstage-right.
//!
//! Everything in this module is plain serializable data. Transient playback
//! state lives in [`crate::animation`] and never touches these types except
//! for reading them.

pub mod cast;
pub mod sequence;
pub mod template;

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use cast::CastMember;
pub use sequence::Sequence;
pub use template::LayoutTemplate;

/// Stored coordinates are multiples of `1 / STAGE_GRID`. Every such value in
/// `[0, 100]` is exact in `f32`, and so is `100 - x`.
pub const STAGE_GRID: f32 = 256.0;

/// Round a stage point onto the storage grid.
#[must_use]
pub fn on_stage_grid(p: Vec2) -> Vec2 {
    (p * STAGE_GRID).round() / STAGE_GRID
}

/// Cast-wide dancer identity, stable across every formation of a sequence.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DancerId(pub String);

impl DancerId {
    /// Borrow the underlying identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DancerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl fmt::Display for DancerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one dancer-position record inside one formation.
///
/// Regenerated whenever a formation's dancers are cloned, so no two
/// formations ever share a position id.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct PositionId(pub u64);

/// Identifier of a formation within a sequence.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct FormationId(pub u64);

/// Timing pattern used when dancers move *into* a formation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionStyle {
    /// Everyone moves together.
    #[default]
    Direct,
    /// Small per-dancer offset in stored order.
    Staggered,
    /// Dancers start moving from stage left to stage right.
    #[serde(rename = "wave-lr")]
    WaveLeftToRight,
    /// Dancers start moving from stage right to stage left.
    #[serde(rename = "wave-rl")]
    WaveRightToLeft,
    /// Large per-dancer offset in stored order.
    Cascade,
}

impl TransitionStyle {
    /// Every style, in menu order.
    pub const ALL: [TransitionStyle; 5] = [
        Self::Direct,
        Self::Staggered,
        Self::WaveLeftToRight,
        Self::WaveRightToLeft,
        Self::Cascade,
    ];

    /// Serialized name of the style.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Staggered => "staggered",
            Self::WaveLeftToRight => "wave-lr",
            Self::WaveRightToLeft => "wave-rl",
            Self::Cascade => "cascade",
        }
    }
}

impl FromStr for TransitionStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.name() == s)
            .ok_or_else(|| format!("unknown transition style '{s}'"))
    }
}

/// One dancer's position within one formation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DancerPosition {
    /// Per-formation record id.
    pub id: PositionId,
    /// Cast-wide identity of the dancer standing here.
    pub dancer_id: DancerId,
    /// Display name.
    pub name: String,
    /// Percent of stage width.
    pub x: f32,
    /// Percent of stage depth.
    pub y: f32,
    /// Marker color, fixed when the dancer joins the cast.
    pub color: String,
}

impl DancerPosition {
    /// Stage position as a vector.
    #[must_use]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Copy of this record moved to `pos`.
    #[must_use]
    pub fn moved_to(&self, pos: Vec2) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            ..self.clone()
        }
    }
}

/// A named snapshot of every dancer's stage position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formation {
    /// Formation id.
    pub id: FormationId,
    /// Display name, e.g. "Formation 3".
    pub name: String,
    /// Free-text musical count annotation, e.g. "17-24".
    pub count_label: String,
    /// Dancer positions in stored order.
    pub dancers: Vec<DancerPosition>,
    /// Style used to arrive at this formation from its predecessor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_style: Option<TransitionStyle>,
}

impl Formation {
    /// Arrival style, defaulting to [`TransitionStyle::Direct`].
    #[must_use]
    pub fn entry_style(&self) -> TransitionStyle {
        self.transition_style.unwrap_or_default()
    }

    /// Position record for a cast member, if they appear here.
    #[must_use]
    pub fn dancer(&self, dancer_id: &DancerId) -> Option<&DancerPosition> {
        self.dancers.iter().find(|d| &d.dancer_id == dancer_id)
    }

    /// Round every dancer onto the storage grid.
    pub(crate) fn snap_to_grid(&mut self) {
        for dancer in &mut self.dancers {
            let p = on_stage_grid(dancer.pos());
            dancer.x = p.x;
            dancer.y = p.y;
        }
    }
}

/// What the presentation layer draws for one dancer on one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageMarker {
    /// Position record id.
    pub id: PositionId,
    /// Cast-wide dancer identity.
    pub dancer_id: DancerId,
    /// Percent of stage width.
    pub x: f32,
    /// Percent of stage depth.
    pub y: f32,
    /// Marker color.
    pub color: String,
}

impl From<&DancerPosition> for StageMarker {
    fn from(d: &DancerPosition) -> Self {
        Self {
            id: d.id,
            dancer_id: d.dancer_id.clone(),
            x: d.x,
            y: d.y,
            color: d.color.clone(),
        }
    }
}
