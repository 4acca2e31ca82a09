//! Cast list input and the default formation seeded from it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{
    on_stage_grid, DancerId, DancerPosition, Formation, FormationId,
    PositionId, TransitionStyle,
};

/// Fallback marker color when the palette is empty.
const FALLBACK_COLOR: &str = "#888888";

/// A cast member as supplied by the roster collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    /// Roster id, reused as the dancer's [`DancerId`].
    pub id: DancerId,
    /// Display name.
    pub name: String,
}

impl CastMember {
    /// Cast member from plain strings.
    pub fn new(id: &str, name: impl Into<String>) -> Self {
        Self {
            id: DancerId::from(id),
            name: name.into(),
        }
    }
}

/// Palette color for the `index`-th dancer, wrapping round-robin.
pub(crate) fn palette_color(palette: &[String], index: usize) -> String {
    if palette.is_empty() {
        return FALLBACK_COLOR.to_owned();
    }
    palette[index % palette.len()].clone()
}

/// First palette color no current dancer wears; round-robin by cast size
/// once every color is taken.
pub(crate) fn next_unused_color(
    palette: &[String],
    dancers: &[DancerPosition],
) -> String {
    palette
        .iter()
        .find(|c| dancers.iter().all(|d| &d.color != *c))
        .cloned()
        .unwrap_or_else(|| palette_color(palette, dancers.len()))
}

/// Cell centers of a near-square grid holding `n` dancers.
fn grid_positions(n: usize) -> Vec<Vec2> {
    if n == 0 {
        return Vec::new();
    }
    let cols = (n as f32).sqrt().ceil() as usize;
    let rows = n.div_ceil(cols);
    (0..n)
        .map(|i| {
            let (row, col) = (i / cols, i % cols);
            on_stage_grid(Vec2::new(
                (col + 1) as f32 * 100.0 / (cols + 1) as f32,
                (row + 1) as f32 * 100.0 / (rows + 1) as f32,
            ))
        })
        .collect()
}

/// The opening formation for a brand-new piece: every cast member on a
/// grid, colors drawn from the palette in cast order.
pub(crate) fn seed_formation(
    cast: &[CastMember],
    palette: &[String],
) -> Formation {
    let dancers = cast
        .iter()
        .zip(grid_positions(cast.len()))
        .enumerate()
        .map(|(i, (member, p))| DancerPosition {
            id: PositionId(i as u64 + 1),
            dancer_id: member.id.clone(),
            name: member.name.clone(),
            x: p.x,
            y: p.y,
            color: palette_color(palette, i),
        })
        .collect();

    Formation {
        id: FormationId(1),
        name: "Formation 1".to_owned(),
        count_label: "1-8".to_owned(),
        dancers,
        transition_style: Some(TransitionStyle::Direct),
    }
}
